use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use doc_intel::cli::{OutlineArgs, OutlineMode, init_tracing};
use doc_intel::config::Config;
use doc_intel::outline::{CollectionOutcome, process_all_collections, process_named_collection};
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = OutlineArgs::parse();
    init_tracing();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Setup problems (config, paths) are errors; collection problems are reported and
/// the run still exits 0.
fn run(args: OutlineArgs) -> Result<()> {
    let mode = args.mode();
    if mode == OutlineMode::Help {
        OutlineArgs::command().print_help()?;
        println!();
        return Ok(());
    }

    let config = Config::load(args.config.as_deref())?;
    let input_dir = std::path::absolute(&args.input_dir)
        .with_context(|| format!("Invalid input directory {}", args.input_dir.display()))?;
    let output_dir = std::path::absolute(&args.output_dir)
        .with_context(|| format!("Invalid output directory {}", args.output_dir.display()))?;

    match mode {
        OutlineMode::All => {
            println!("Processing all collections from {}", input_dir.display());
            println!("Output will be saved to {}", output_dir.display());

            match process_all_collections(&input_dir, &output_dir, &config.outline) {
                Ok(summary) => {
                    println!("\nProcessing complete:");
                    println!("  Successfully processed: {} collections", summary.processed);
                    println!("  Failed: {} collections", summary.failed);
                }
                Err(e) => eprintln!("Error: {:#}", e),
            }
        }
        OutlineMode::Collection(name) => {
            println!("Processing {}", name);

            match process_named_collection(&input_dir, &name, &output_dir, &config.outline) {
                Ok(CollectionOutcome::Written(path)) => {
                    println!("Success: Output saved to {}", path.display());
                }
                Ok(CollectionOutcome::Skipped(reason)) => {
                    eprintln!("Processing failed: {}", reason);
                }
                Err(e) => eprintln!("Error: {:#}", e),
            }
        }
        OutlineMode::Help => {}
    }

    Ok(())
}
