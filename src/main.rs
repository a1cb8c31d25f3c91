//! fwtable - Firewall Table Records
//!
//! A small CLI over the firewall table records produced by device-tree driven
//! platform tooling. The heavy lifting (table generation, subsystem and
//! master-ID resolution) happens in the host tool; this binary renders,
//! exports and sanity-checks the table files it emits.
//!
//! # Usage
//!
//! ```bash
//! fwtable print table.json                     # Fixed-width listing
//! fwtable print table.json --format tsv        # Tab-separated listing
//! fwtable print table.json --subsystem 0x1c000003
//! fwtable export table.json -o table.txt       # Render to a file
//! fwtable check table.json                     # Advisory validation
//! ```
//!
//! Numeric arguments accept `0x` hexadecimal or decimal notation. Logging goes
//! to stderr (configure with `RUST_LOG`) so stdout stays machine-parseable.

use clap::{Parser, Subcommand};
use fwtable::core::store;
use fwtable::utils::parse_hex_u32;
use fwtable::validators;
use fwtable::{Error, FirewallTableEntry};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Line format for `print` and `export`
#[derive(Debug, Clone, Copy, strum::Display, strum::EnumString)]
enum OutputFormat {
    /// Space-padded columns for human review
    #[strum(serialize = "fixed")]
    Fixed,
    /// Tab-separated fields for downstream tooling
    #[strum(serialize = "tsv")]
    Tsv,
}

#[derive(Parser)]
#[command(name = "fwtable")]
#[command(about = "Render and check firewall permission tables", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a table file to stdout
    Print {
        /// Path to the JSON table file
        file: PathBuf,
        /// Output format (fixed or tsv)
        #[arg(short, long, default_value = "fixed")]
        format: OutputFormat,
        /// Only show entries owned by this subsystem id
        #[arg(short, long, value_parser = parse_hex_u32)]
        subsystem: Option<u32>,
    },
    /// Render a table file to another file
    Export {
        /// Path to the JSON table file
        file: PathBuf,
        /// Destination path
        #[arg(short, long)]
        output: PathBuf,
        /// Output format (fixed or tsv)
        #[arg(short, long, default_value = "tsv")]
        format: OutputFormat,
    },
    /// Run advisory validation over every entry
    Check {
        /// Path to the JSON table file
        file: PathBuf,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match handle_cli(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn handle_cli(command: Commands) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Print {
            file,
            format,
            subsystem,
        } => {
            let table = store::load_table(&file)?;
            let selected: Vec<&FirewallTableEntry> = match subsystem {
                Some(id) => table.entries_for_subsystem(id).collect(),
                None => table.entries.iter().collect(),
            };

            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            for entry in selected {
                match format {
                    OutputFormat::Fixed => writeln!(out, "{entry}")?,
                    OutputFormat::Tsv => entry.write_entry(&mut out)?,
                }
            }
        }
        Commands::Export {
            file,
            output,
            format,
        } => {
            let table = store::load_table(&file)?;
            let rendered = match format {
                OutputFormat::Fixed => table.render().into_bytes(),
                OutputFormat::Tsv => {
                    let mut buf = Vec::new();
                    table.write_tsv(&mut buf)?;
                    buf
                }
            };

            // Same atomic pattern as table saves: temp file, then rename
            let dir = output
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
            tmp.write_all(&rendered)?;
            tmp.persist(&output)?;

            println!("✓ Exported {} entries to {}", table.len(), output.display());
        }
        Commands::Check { file } => {
            let table = store::load_table(&file)?;
            let mut errors = 0usize;
            let mut warnings = 0usize;

            for (idx, entry) in table.entries.iter().enumerate() {
                let row = format!("entry {idx} ({})", entry.module_tag);

                for (field, tag) in [("module_tag", &entry.module_tag), ("pm_tag", &entry.pm_tag)]
                {
                    if let Err(message) = validators::validate_tag(tag) {
                        errors += 1;
                        let e = Error::Validation {
                            field: format!("{row}.{field}"),
                            message,
                        };
                        println!("✗ {e}");
                    }
                }

                match validators::validate_region(entry.base_addr, entry.size) {
                    Err(message) => {
                        errors += 1;
                        let e = Error::Validation {
                            field: format!("{row}.size"),
                            message,
                        };
                        println!("✗ {e}");
                    }
                    Ok(Some(warning)) => {
                        warnings += 1;
                        println!("  ! {row}: {warning}");
                    }
                    Ok(None) => {}
                }

                if let Some(note) = validators::check_aperture_size(entry.size) {
                    println!("  - {row}: {note}");
                }

                for mid in &entry.mid_list {
                    if let Some(warning) = validators::check_mid(mid) {
                        warnings += 1;
                        println!("  ! {row}: {warning}");
                    }
                }
            }

            if errors > 0 {
                return Err(format!("{errors} error(s), {warnings} warning(s)").into());
            }
            println!("✓ {} entries checked, {warnings} warning(s)", table.len());
        }
    }

    Ok(())
}
