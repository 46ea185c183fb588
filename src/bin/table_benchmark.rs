//! Benchmark for extracting and rendering a large list response
//!
//! Builds a paginated server listing (pages wrapped in an outer array) and
//! times record extraction and text rendering separately.

use ionosctl_table::table::{convert_to_records, render_table, ResourceTable};
use serde_json::json;
use std::time::Instant;

const PAGES: usize = 10;
const PAGE_SIZE: usize = 100;

fn main() -> anyhow::Result<()> {
    println!("=== ionosctl-table Benchmark ===\n");

    let mut pages = Vec::with_capacity(PAGES);
    for page in 0..PAGES {
        let mut items = Vec::with_capacity(PAGE_SIZE);
        for i in 0..PAGE_SIZE {
            let n = page * PAGE_SIZE + i;
            items.push(json!({
                "id": format!("srv-{:05}", n),
                "metadata": {"state": if n % 7 == 0 { "BUSY" } else { "AVAILABLE" }},
                "properties": {
                    "name": format!("server-{}", n),
                    "cores": 2 + n % 6,
                    "ram": 1024 * (1 + n % 8),
                    "availabilityZone": "AUTO"
                },
                "entities": {
                    "nics": {
                        "items": [
                            {"properties": {"ips": [format!("10.0.{}.{}", page, i)]}},
                            {"properties": {"ips": [format!("192.168.{}.{}", page, i)]}}
                        ]
                    }
                }
            }));
        }
        pages.push(json!(items));
    }
    let response = json!({"items": pages});

    let servers = ResourceTable::new("items")
        .with_column("ServerId", "id")
        .with_column("Name", "properties.name")
        .with_column("Cores", "properties.cores")
        .with_column("Ram", "properties.ram")
        .with_column("State", "metadata.state")
        .with_column("Ips", "entities.nics.items.*.properties.ips.*")
        .with_column("Missing", "properties.cpuFamily");

    println!("Extracting {} servers from {} pages...", PAGES * PAGE_SIZE, PAGES);
    let start = Instant::now();
    let records = convert_to_records(&servers.root_path, &servers.mapping(), &response)?;
    let extract_duration = start.elapsed();

    println!("Time: {:?}", extract_duration);
    println!("Records: {}", records.len());
    println!(
        "Average per record: {:.2}us\n",
        extract_duration.as_micros() as f64 / records.len() as f64
    );

    println!("Rendering text table...");
    let start = Instant::now();
    let output = render_table(&records, &servers.all_columns(), false);
    let render_duration = start.elapsed();

    println!("Time: {:?}", render_duration);
    println!("Output size: {} bytes, {} lines\n", output.len(), output.lines().count());

    println!("Total: {:?}", extract_duration + render_duration);

    Ok(())
}
