use std::collections::BTreeMap;
use std::fs;
use std::io::Read;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use netscreen_core::TableDefinition;
use netscreen_parser::session::normalize_line_endings;
use netscreen_parser::{DEFAULT_DISPATCHER, OutputFormat, ParseOutput, format_output};
use rayon::prelude::*;
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "netscreen")]
#[command(about = "Parse captured network device show-command output into structured records")]
#[command(version)]
struct Cli {
    /// Log dispatch and parsing decisions to stderr (overridden by RUST_LOG).
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Parse one captured response from a file or stdin.
    Parse(ParseArgs),
    /// Parse many captured responses of the same command in parallel.
    Batch(BatchArgs),
    /// List the commands vendor parsers recognize.
    Commands,
    /// Dump the built-in table definitions.
    Tables(TablesArgs),
}

#[derive(Debug, Args)]
struct ParseArgs {
    /// Command that produced the output (abbreviations are accepted).
    #[arg(long)]
    command: String,
    /// File holding the captured output; stdin when omitted.
    #[arg(long)]
    input: Option<PathBuf>,
    /// Output format.
    #[arg(long, default_value = "json")]
    format: OutputFormat,
    /// Split lines on this separator as-is instead of normalizing line endings.
    #[arg(long)]
    separator: Option<String>,
}

#[derive(Debug, Args)]
struct BatchArgs {
    /// Command that produced every input file.
    #[arg(long)]
    command: String,
    /// Captured output files.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,
    /// Number of parallel jobs (default: number of CPUs).
    #[arg(long)]
    jobs: Option<usize>,
}

#[derive(Debug, Args)]
struct TablesArgs {
    /// Output format (json or yaml).
    #[arg(long, default_value = "yaml")]
    format: OutputFormat,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Command::Parse(args) => run_parse(args),
        Command::Batch(args) => run_batch(args),
        Command::Commands => run_commands(),
        Command::Tables(args) => run_tables(args),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn read_input(input: Option<&PathBuf>) -> Result<String, String> {
    match input {
        Some(path) => fs::read_to_string(path)
            .map_err(|err| format!("Failed to read '{}': {err}", path.display())),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .map_err(|err| format!("Failed to read stdin: {err}"))?;
            Ok(text)
        }
    }
}

/// Renders a result, or the "nothing found" marker for the format.
fn render(output: Option<&ParseOutput>, format: OutputFormat) -> Result<String, String> {
    match output {
        Some(output) => format_output(output, format),
        None => Ok(match format {
            OutputFormat::Json | OutputFormat::Yaml => "null".to_string(),
            OutputFormat::Markdown | OutputFormat::Table => "(no result)".to_string(),
        }),
    }
}

fn run_parse(args: ParseArgs) -> Result<(), String> {
    let raw = read_input(args.input.as_ref())?;
    let dispatch = DEFAULT_DISPATCHER.dispatch(&args.command);
    debug!(command = %args.command, parser = %dispatch.label(), "Parsing input");

    let output = match args.separator.as_deref() {
        Some("") => return Err("--separator must not be empty".to_string()),
        Some(separator) => dispatch.parse(&raw, separator),
        None => dispatch.parse(&normalize_line_endings(&raw), netscreen_core::LINE_SEPARATOR),
    };

    let rendered = render(output.as_ref(), args.format)?;
    println!("{}", rendered.trim_end_matches('\n'));
    Ok(())
}

fn run_batch(args: BatchArgs) -> Result<(), String> {
    let jobs = args.jobs.unwrap_or_else(rayon::current_num_threads).max(1);
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(jobs)
        .build()
        .map_err(|err| format!("Failed to build thread pool: {err}"))?;

    let dispatch = DEFAULT_DISPATCHER.dispatch(&args.command);
    debug!(command = %args.command, parser = %dispatch.label(), files = args.inputs.len(), jobs, "Parsing batch");

    let outcomes: Vec<(String, Result<Option<ParseOutput>, String>)> = pool.install(|| {
        args.inputs
            .par_iter()
            .map(|path| {
                let outcome = read_input(Some(path)).map(|raw| {
                    dispatch.parse(&normalize_line_endings(&raw), netscreen_core::LINE_SEPARATOR)
                });
                (path.display().to_string(), outcome)
            })
            .collect()
    });

    let mut results: BTreeMap<String, Option<ParseOutput>> = BTreeMap::new();
    for (path, outcome) in outcomes {
        results.insert(path, outcome?);
    }

    let json = serde_json::to_string_pretty(&results)
        .map_err(|err| format!("JSON serialization failed: {err}"))?;
    println!("{json}");
    Ok(())
}

fn run_commands() -> Result<(), String> {
    let commands = DEFAULT_DISPATCHER.supported_commands();
    let vendor_width = commands.iter().map(|c| c.vendor.len()).max().unwrap_or(6);
    let command_width = commands.iter().map(|c| c.command.len()).max().unwrap_or(7);

    println!(
        "{:<vw$}  {:<cw$}  SHORTEST",
        "VENDOR",
        "COMMAND",
        vw = vendor_width,
        cw = command_width
    );
    for info in &commands {
        println!(
            "{:<vw$}  {:<cw$}  {}",
            info.vendor,
            info.command,
            info.shortest,
            vw = vendor_width,
            cw = command_width
        );
    }
    Ok(())
}

#[derive(Serialize)]
struct TableEntry {
    vendor: &'static str,
    #[serde(flatten)]
    definition: TableDefinition,
}

fn run_tables(args: TablesArgs) -> Result<(), String> {
    let entries: Vec<TableEntry> = DEFAULT_DISPATCHER
        .tables()
        .into_iter()
        .map(|(vendor, definition)| TableEntry { vendor, definition })
        .collect();

    let rendered = match args.format {
        OutputFormat::Json => serde_json::to_string_pretty(&entries)
            .map_err(|err| format!("JSON serialization failed: {err}"))?,
        OutputFormat::Yaml => serde_yaml::to_string(&entries)
            .map_err(|err| format!("YAML serialization failed: {err}"))?,
        other => {
            return Err(format!(
                "tables supports json or yaml output, not {other:?}"
            ));
        }
    };
    println!("{}", rendered.trim_end_matches('\n'));
    Ok(())
}
