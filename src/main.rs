//! csvcalc - Evaluate formula tables stored as delimited text

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use csvcalc_core::storage::{self, LoadOptions, RenderMode, RenderOptions};
use csvcalc_core::Table;
use csvcalc_engine::CellAddress;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(name = "csvcalc", version, about = "Evaluate formula tables stored as delimited text")]
struct Cli {
    /// Table file to evaluate ("-" reads stdin)
    file: PathBuf,

    /// Field delimiter
    #[arg(short, long, default_value_t = ',')]
    delimiter: char,

    /// Only print these cells, as ADDR=value (can be repeated)
    #[arg(short = 'c', long = "cell", value_name = "ADDR")]
    cells: Vec<CellAddress>,

    /// Print raw cell text instead of evaluated values
    #[arg(long)]
    raw: bool,

    /// Output format for the full grid
    #[arg(long, value_enum, default_value_t = OutputFormat::Csv)]
    format: OutputFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Csv,
    Json,
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "error".into()),
        )
        .with_writer(io::stderr)
        .init();
}

fn load_table(path: &Path, options: &LoadOptions) -> csvcalc_core::Result<Table> {
    if path == Path::new("-") {
        Table::load(io::stdin().lock(), options)
    } else {
        Table::load_file(path, options)
    }
}

/// Print the requested cells. Returns false if any of them failed.
fn print_cells(table: &mut Table, cells: &[CellAddress], mode: RenderMode) -> Result<bool> {
    let mut out = io::stdout().lock();
    let mut all_ok = true;
    for addr in cells {
        debug!(cell = %addr, "printing cell");
        let result = match mode {
            RenderMode::Evaluated => table.evaluate(addr.as_str()),
            RenderMode::Raw => table.raw_at(addr.as_str()).map(str::to_string),
        };
        match result {
            Ok(value) => writeln!(out, "{}={}", addr, value)?,
            Err(err) => {
                all_ok = false;
                writeln!(out, "{}={}", addr, storage::error_placeholder(&err))?;
            }
        }
    }
    Ok(all_ok)
}

fn run(cli: &Cli) -> Result<ExitCode> {
    let options = LoadOptions {
        delimiter: cli.delimiter,
    };
    let mut table = load_table(&cli.file, &options).context("Error loading table")?;
    let mode = if cli.raw {
        RenderMode::Raw
    } else {
        RenderMode::Evaluated
    };

    if !cli.cells.is_empty() {
        let all_ok = print_cells(&mut table, &cli.cells, mode)?;
        return Ok(if all_ok {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        });
    }

    let mut out = io::stdout().lock();
    let report = match cli.format {
        OutputFormat::Csv => {
            let render = RenderOptions {
                delimiter: cli.delimiter,
                mode,
            };
            storage::write_grid(&mut table, &mut out, &render)?
        }
        OutputFormat::Json => storage::write_json(&mut table, &mut out, mode)?,
    };
    out.flush()?;
    debug!(rendered = report.rendered, failed = report.failed, "grid rendered");

    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
