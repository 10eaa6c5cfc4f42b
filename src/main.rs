mod report;

use anyhow::Context as _;
use permtax::{Catalog, Query, parse_records, resolve_verbose_with};
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "PERMTAX_LOG";

fn main() {
    let config = match parse_args() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    init_tracing();

    if let Err(err) = run(&config) {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();
}

fn run(config: &CliConfig) -> anyhow::Result<()> {
    let json = match &config.input {
        Some(path) => std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?,
        None => read_stdin().context("failed to read stdin")?,
    };
    let records = parse_records(&json).context("invalid permission list")?;

    let catalog = match &config.catalog {
        Some(path) => Catalog::from_path(path)?,
        None => Catalog::builtin().clone(),
    };

    let res = resolve_verbose_with(&records, &catalog, &config.query);

    if config.json {
        println!("{}", serde_json::to_string_pretty(&res.taxonomy)?);
    } else {
        report::print_taxonomy(&res.taxonomy, &res.details, &config.query, config.color);
    }
    Ok(())
}

struct CliConfig {
    input: Option<PathBuf>,
    catalog: Option<PathBuf>,
    query: Query,
    json: bool,
    color: bool,
}

fn parse_args() -> Result<CliConfig, String> {
    let mut input: Option<PathBuf> = None;
    let mut catalog: Option<PathBuf> = None;
    let mut query = Query::new();
    let mut json = false;
    let mut color = io::stdout().is_terminal();
    let mut args = std::env::args().skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-V" | "--version" => {
                println!("permtax {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--color" => color = true,
            "--no-color" => color = false,
            "--json" => json = true,
            "--input" | "-i" => {
                let value = args.next().ok_or_else(|| "error: --input expects a value".to_string())?;
                set_once(&mut input, PathBuf::from(value), "input")?;
            }
            "--catalog" => {
                let value = args.next().ok_or_else(|| "error: --catalog expects a value".to_string())?;
                set_once(&mut catalog, PathBuf::from(value), "catalog")?;
            }
            "--search" | "-s" => {
                query.search = args.next().ok_or_else(|| "error: --search expects a value".to_string())?;
            }
            "--module" | "-m" => {
                query.module = Some(args.next().ok_or_else(|| "error: --module expects a value".to_string())?);
            }
            _ if arg.starts_with("--input=") => {
                set_once(&mut input, PathBuf::from(arg.trim_start_matches("--input=")), "input")?;
            }
            _ if arg.starts_with("--catalog=") => {
                set_once(&mut catalog, PathBuf::from(arg.trim_start_matches("--catalog=")), "catalog")?;
            }
            _ if arg.starts_with("--search=") => query.search = arg.trim_start_matches("--search=").to_string(),
            _ if arg.starts_with("--module=") => query.module = Some(arg.trim_start_matches("--module=").to_string()),
            _ if arg.starts_with('-') && arg != "-" => {
                return Err(format!("error: unknown option '{arg}'"));
            }
            _ => {
                // A lone positional is the input file; `-` means stdin.
                if arg != "-" {
                    set_once(&mut input, PathBuf::from(arg), "input")?;
                }
            }
        }
    }

    Ok(CliConfig { input, catalog, query, json, color })
}

fn set_once(slot: &mut Option<PathBuf>, value: PathBuf, what: &str) -> Result<(), String> {
    if slot.is_some() {
        return Err(format!("error: {what} provided multiple times"));
    }
    *slot = Some(value);
    Ok(())
}

fn read_stdin() -> io::Result<String> {
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;
    Ok(buffer)
}

fn print_help() {
    println!("{}", help_text());
}

fn help_text() -> String {
    format!(
        "permtax {version}

Resolve a flat permission list into a module/category tree.

Usage:
  permtax [OPTIONS] [<file> | -]
  permtax [OPTIONS] --input <file>

Input is a JSON array of {{ id, code, name, module?, description? }} records.
When no file is given (or the file is '-'), the list is read from stdin.

Options:
  -i, --input <file>         Permission list to read.
      --catalog <file>       JSON catalog overriding the built-in tables.
  -s, --search <text>        Only show permissions whose name, code or
                             description contains <text>.
  -m, --module <key>         Only show one module (e.g. erp, aup, pig).
      --json                 Print the resolved taxonomy as JSON.
      --color                Force ANSI color output.
      --no-color             Disable ANSI color output.
  -h, --help                 Show this help message.
  -V, --version              Print version information.

Environment:
  {log_env}                Tracing filter (e.g. debug, permtax=trace).

Exit codes:
  0  Success.
  1  Unreadable input or catalog.
  2  Invalid arguments.
",
        version = env!("CARGO_PKG_VERSION"),
        log_env = LOG_ENV,
    )
}
