//! Command-line arguments and logging setup shared by the two binaries

use crate::config::Config;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Version string with the commit and build time baked in by `build.rs`
pub const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (commit ",
    env!("GIT_COMMIT_HASH"),
    ", built ",
    env!("BUILD_TIMESTAMP"),
    ")"
);

/// Extract ranked heading outlines from challenge collections
#[derive(Parser, Debug)]
#[command(name = "doc-outline", version = VERSION)]
pub struct OutlineArgs {
    /// Process every collection in the input directory
    #[arg(long)]
    pub all: bool,

    /// Process a single collection (e.g. "Collection 1")
    #[arg(long)]
    pub collection: Option<String>,

    /// Directory containing the collections
    #[arg(long, default_value = "challenge_pdfs")]
    pub input_dir: PathBuf,

    /// Directory the JSON reports are written to
    #[arg(long, default_value = "../challenge_outputs_json")]
    pub output_dir: PathBuf,

    /// Config file (defaults to the platform config directory)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// What `doc-outline` was asked to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutlineMode {
    All,
    Collection(String),
    /// Neither flag given
    Help,
}

impl OutlineArgs {
    /// `--all` wins over `--collection`
    pub fn mode(&self) -> OutlineMode {
        if self.all {
            OutlineMode::All
        } else if let Some(name) = &self.collection {
            OutlineMode::Collection(name.clone())
        } else {
            OutlineMode::Help
        }
    }
}

/// Offline semantic search over local PDFs
#[derive(Parser, Debug)]
#[command(name = "doc-search", version = VERSION)]
pub struct SearchArgs {
    /// Path to the input JSON spec
    pub input: PathBuf,

    /// Output JSON file
    #[arg(default_value = "outline.json")]
    pub output: PathBuf,

    /// Local directory holding the embedding model files
    #[arg(long, short = 'm', env = "FASTEMBED_EMBEDDING_MODEL")]
    pub model_path: Option<PathBuf>,

    /// Number of passages to return
    #[arg(long)]
    pub top_k: Option<usize>,

    /// Config file (defaults to the platform config directory)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl SearchArgs {
    /// Apply flags on top of file and environment configuration
    pub fn apply_to(&self, config: &mut Config) {
        if let Some(model_path) = &self.model_path {
            config.embedding.model_path = Some(model_path.clone());
        }
        if let Some(top_k) = self.top_k {
            config.search.top_k = top_k;
        }
    }
}

/// Install the stderr log subscriber, filtered by `RUST_LOG` (default `info`)
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init();
}
