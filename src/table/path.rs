//! Dot-separated paths into JSON values
//!
//! A path such as `properties.nics.*.ips` is split on `.` into segments.
//! Segments are either literal keys or the `*` wildcard, which projects the
//! rest of the path across every element of an array (or every value of an
//! object) and collects the hits into a new array.
//!
//! A key made only of digits also indexes into arrays, so `entities.0.id`
//! reads the first element. Keys containing a literal `.` or `~` are written
//! with the escapes `~1` and `~0`.

use serde_json::Value;
use std::borrow::Cow;
use std::fmt;

/// A single step of a [`JsonPath`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Object key, or array index when applied to an array
    Key(String),
    /// `*`: every element of an array or every value of an object
    Wildcard,
}

/// A parsed field path
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct JsonPath {
    segments: Vec<Segment>,
}

impl JsonPath {
    /// Parse a dot-separated path.
    ///
    /// The empty string is the identity path. Returns `None` when the path
    /// contains an empty segment (`a..b`, `.a`, `a.`).
    pub fn parse(path: &str) -> Option<Self> {
        if path.is_empty() {
            return Some(JsonPath::default());
        }

        let mut segments = Vec::new();
        for raw in path.split('.') {
            if raw.is_empty() {
                return None;
            }
            if raw == "*" {
                segments.push(Segment::Wildcard);
            } else {
                segments.push(Segment::Key(unescape(raw)));
            }
        }

        Some(JsonPath { segments })
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Evaluate the path against `value`.
    ///
    /// Plain key paths borrow from `value`; paths with a wildcard build an
    /// owned array. `None` means the path did not resolve.
    pub fn resolve<'a>(&self, value: &'a Value) -> Option<Cow<'a, Value>> {
        walk(&self.segments, value)
    }
}

impl fmt::Display for JsonPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, segment) in self.segments.iter().enumerate() {
            if idx > 0 {
                f.write_str(".")?;
            }
            match segment {
                Segment::Key(key) => f.write_str(&escape(key))?,
                Segment::Wildcard => f.write_str("*")?,
            }
        }
        Ok(())
    }
}

fn walk<'a>(segments: &[Segment], value: &'a Value) -> Option<Cow<'a, Value>> {
    let Some((head, rest)) = segments.split_first() else {
        return Some(Cow::Borrowed(value));
    };

    match head {
        Segment::Key(key) => {
            let child = match value {
                Value::Object(map) => map.get(key)?,
                Value::Array(items) => items.get(key.parse::<usize>().ok()?)?,
                _ => return None,
            };
            walk(rest, child)
        }
        Segment::Wildcard => {
            let children: Box<dyn Iterator<Item = &'a Value> + 'a> = match value {
                Value::Array(items) => Box::new(items.iter()),
                Value::Object(map) => Box::new(map.values()),
                _ => return None,
            };

            // Elements where the remainder misses are skipped, not nulled
            let projected: Vec<Value> = children
                .filter_map(|child| walk(rest, child))
                .map(Cow::into_owned)
                .collect();

            if projected.is_empty() {
                None
            } else {
                Some(Cow::Owned(Value::Array(projected)))
            }
        }
    }
}

fn unescape(raw: &str) -> String {
    raw.replace("~1", ".").replace("~0", "~")
}

fn escape(key: &str) -> String {
    key.replace('~', "~0").replace('.', "~1")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn eval(path: &str, value: &Value) -> Option<Value> {
        JsonPath::parse(path)
            .unwrap()
            .resolve(value)
            .map(Cow::into_owned)
    }

    #[test]
    fn test_parse_segments() {
        let path = JsonPath::parse("items.*.v").unwrap();
        assert_eq!(
            path.segments(),
            &[
                Segment::Key("items".to_string()),
                Segment::Wildcard,
                Segment::Key("v".to_string()),
            ]
        );
        assert!(JsonPath::parse("").unwrap().is_root());
    }

    #[test]
    fn test_parse_rejects_empty_segments() {
        assert!(JsonPath::parse("a..b").is_none());
        assert!(JsonPath::parse(".a").is_none());
        assert!(JsonPath::parse("a.").is_none());
    }

    #[test]
    fn test_escaped_keys() {
        let path = JsonPath::parse("labels.app~1kubernetes~0io").unwrap();
        assert_eq!(
            path.segments()[1],
            Segment::Key("app.kubernetes~io".to_string())
        );
        assert_eq!(path.to_string(), "labels.app~1kubernetes~0io");

        let value = json!({"labels": {"app.kubernetes~io": "web"}});
        assert_eq!(eval("labels.app~1kubernetes~0io", &value), Some(json!("web")));
    }

    #[test]
    fn test_nested_keys() {
        let value = json!({"properties": {"name": "vdc", "location": "de/fra"}});
        assert_eq!(eval("properties.name", &value), Some(json!("vdc")));
        assert_eq!(eval("properties.missing", &value), None);
        assert_eq!(eval("properties.name.deeper", &value), None);
    }

    #[test]
    fn test_explicit_null_resolves() {
        let value = json!({"metadata": {"etag": null}});
        assert_eq!(eval("metadata.etag", &value), Some(Value::Null));
    }

    #[test]
    fn test_array_index() {
        let value = json!({"entities": [{"id": "a"}, {"id": "b"}]});
        assert_eq!(eval("entities.1.id", &value), Some(json!("b")));
        assert_eq!(eval("entities.2.id", &value), None);
        assert_eq!(eval("entities.x.id", &value), None);
    }

    #[test]
    fn test_wildcard_over_array() {
        let value = json!({"items": [{"v": 1}, {"v": 2}, {"w": 3}]});
        assert_eq!(eval("items.*.v", &value), Some(json!([1, 2])));
        assert_eq!(eval("items.*.missing", &value), None);
        assert_eq!(eval("items.*", &value), Some(json!([{"v": 1}, {"v": 2}, {"w": 3}])));
    }

    #[test]
    fn test_wildcard_over_object_and_scalar() {
        let value = json!({"ports": {"a": 80, "b": 443}, "name": "lb"});
        assert_eq!(eval("ports.*", &value), Some(json!([80, 443])));
        assert_eq!(eval("name.*", &value), None);
    }

    #[test]
    fn test_nested_wildcards_keep_structure() {
        let value = json!({
            "nics": [
                {"ips": ["10.0.0.1", "10.0.0.2"]},
                {"ips": ["10.0.1.1"]}
            ]
        });
        assert_eq!(
            eval("nics.*.ips.*", &value),
            Some(json!([["10.0.0.1", "10.0.0.2"], ["10.0.1.1"]]))
        );
    }

    #[test]
    fn test_wildcard_over_empty_array_misses() {
        let value = json!({"items": []});
        assert_eq!(eval("items.*.v", &value), None);
    }

    #[test]
    fn test_resolve_borrows_without_wildcard() {
        let value = json!({"a": {"b": 1}});
        let path = JsonPath::parse("a.b").unwrap();
        assert!(matches!(path.resolve(&value), Some(Cow::Borrowed(_))));
    }
}
