use anyhow::Result;
use clap::Parser;
use doc_intel::cli::{SearchArgs, init_tracing};
use doc_intel::config::Config;
use doc_intel::error::ValidationError;
use doc_intel::search::{InputSource, SemanticSearch};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let args = SearchArgs::parse();
    init_tracing();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: SearchArgs) -> Result<()> {
    let mut config = Config::load(args.config.as_deref())?;
    args.apply_to(&mut config);
    config.validate()?;

    let input = std::path::absolute(&args.input)?;
    if !input.is_file() {
        return Err(ValidationError::InputNotFound(input.display().to_string()).into());
    }

    let output = std::path::absolute(&args.output)?;
    let search = SemanticSearch::new(config)?;
    search
        .run(InputSource::Path(input), Some(&output))
        .await?;

    println!("Results saved to {}", output.display());
    Ok(())
}
