//! ionosctl-table: Render an IONOS Cloud API response as a table
//!
//! Reads one JSON response and prints it the way `ionosctl` commands do.
//!
//! Usage:
//!   # Columns from a resource table file
//!   ionosctl-table --table datacenters.json response.json
//!
//!   # Columns from flags, response on stdin
//!   curl ... | ionosctl-table --root-path items --path DatacenterId=id --path Name=properties.name
//!
//!   # Pick columns and output format
//!   ionosctl-table --table servers.json --cols Name,Cores -o json response.json

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use colored::Colorize;
use ionosctl_table::table::{parse_cols, OutputFormat, PrintOptions, ResourceTable};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs::File;
use std::io::{BufReader, Read, Write};
use tracing_subscriber::EnvFilter;

static COLUMN_PATH_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Za-z_][A-Za-z0-9_]*)=(.+)$").unwrap());

#[derive(Parser, Debug)]
#[command(name = "ionosctl-table")]
#[command(about = "Render an IONOS Cloud API response as a table", long_about = None)]
struct Args {
    /// Response file (use stdin if omitted)
    #[arg(value_name = "FILE")]
    input: Option<String>,

    /// Resource table definition (JSON with rootPath, columns, defaultColumns)
    #[arg(long, conflicts_with = "paths")]
    table: Option<String>,

    /// Column definition as NAME=PATH, repeatable
    #[arg(long = "path", value_name = "NAME=PATH")]
    paths: Vec<String>,

    /// Path to the list of items in the response
    #[arg(long, default_value = "", conflicts_with = "table")]
    root_path: String,

    /// Columns shown without --cols (comma-separated, default: all)
    #[arg(long, conflicts_with = "table")]
    default_cols: Vec<String>,

    /// Columns to print (comma-separated)
    #[arg(long)]
    cols: Vec<String>,

    /// Output format
    #[arg(long, short = 'o', value_enum, default_value_t = OutputFormat::Text)]
    output: OutputFormat,

    /// Don't print the header line
    #[arg(long)]
    no_headers: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    if let Err(err) = run(args) {
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(args: Args) -> Result<()> {
    let table = load_table(&args)?;
    tracing::info!(
        root_path = table.root_path.as_str(),
        columns = table.columns.len(),
        "loaded resource table"
    );

    let reader = if let Some(file_path) = &args.input {
        let file = File::open(file_path).with_context(|| format!("Failed to open file: {}", file_path))?;
        Box::new(BufReader::new(file)) as Box<dyn Read>
    } else {
        Box::new(std::io::stdin()) as Box<dyn Read>
    };

    let options = PrintOptions {
        format: args.output,
        no_headers: args.no_headers,
    };
    let requested = parse_cols(&args.cols);

    let mut diagnostics: Vec<u8> = Vec::new();
    let output = ionosctl_table::render_response(reader, &table, &requested, options, &mut diagnostics)?;

    let diagnostics = String::from_utf8_lossy(&diagnostics);
    for line in diagnostics.lines() {
        eprintln!("{} {}", "Warning:".yellow().bold(), line);
    }

    let mut stdout = std::io::stdout().lock();
    write!(stdout, "{}", output)?;
    if !output.ends_with('\n') && !output.is_empty() {
        writeln!(stdout)?;
    }
    stdout.flush()?;

    Ok(())
}

/// Build the resource table from --table or from --path flags
fn load_table(args: &Args) -> Result<ResourceTable> {
    if let Some(table_path) = &args.table {
        let file = File::open(table_path)
            .with_context(|| format!("Failed to open table definition: {}", table_path))?;
        let table: ResourceTable = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Failed to parse table definition: {}", table_path))?;
        return Ok(table);
    }

    if args.paths.is_empty() {
        bail!("No columns defined. Pass --table FILE or at least one --path NAME=PATH");
    }

    let mut table = ResourceTable::new(args.root_path.clone());
    for raw in &args.paths {
        let (name, path) = parse_column_path(raw)?;
        table = table.with_column(name, path);
    }

    Ok(table.with_defaults(parse_cols(&args.default_cols)))
}

fn parse_column_path(raw: &str) -> Result<(String, String)> {
    let captures = COLUMN_PATH_REGEX
        .captures(raw)
        .ok_or_else(|| anyhow!("Invalid column definition '{}', expected NAME=PATH", raw))?;
    Ok((captures[1].to_string(), captures[2].to_string()))
}
