use super::extract_outline_from_pdf;
use crate::config::OutlineConfig;
use crate::error::{ExtractionError, ValidationError};
use crate::types::{ChallengeInput, OutlineMetadata, OutlineReport, OutlineSection};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Metadata value used when the input omits a persona or task
const UNKNOWN: &str = "Unknown";

/// What happened to a single collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectionOutcome {
    /// The report was written to this path
    Written(PathBuf),
    /// The collection lacked required inputs
    Skipped(String),
}

/// Counts for a batch run over every collection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProcessingSummary {
    pub processed: usize,
    /// Collections that were skipped or errored
    pub failed: usize,
}

/// Output file name for a collection: lowercased, spaces removed, `_output.json` suffix
pub fn output_file_name(collection_name: &str) -> String {
    format!(
        "{}_output.json",
        collection_name.to_lowercase().replace(' ', "")
    )
}

/// Build the outline report of one collection and write it to `output_dir`
///
/// A collection without an input file or PDF directory is skipped with a warning, as
/// are listed PDFs that do not exist. Malformed input and extraction failures are errors.
pub fn process_collection(
    collection_path: &Path,
    output_dir: &Path,
    config: &OutlineConfig,
) -> Result<CollectionOutcome> {
    let collection_name = collection_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| collection_path.display().to_string());

    let input_file = collection_path.join(&config.input_file_name);
    if !input_file.is_file() {
        tracing::warn!(
            "{} not found, skipping {}",
            input_file.display(),
            collection_name
        );
        return Ok(CollectionOutcome::Skipped(format!(
            "missing {}",
            config.input_file_name
        )));
    }

    let content = std::fs::read_to_string(&input_file)
        .with_context(|| format!("Failed to read {}", input_file.display()))?;
    let input: ChallengeInput = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {}", input_file.display()))?;

    let pdfs_dir = collection_path.join(&config.pdf_dir_name);
    if !pdfs_dir.is_dir() {
        tracing::warn!(
            "{} directory not found in {}",
            config.pdf_dir_name,
            collection_name
        );
        return Ok(CollectionOutcome::Skipped(format!(
            "missing {} directory",
            config.pdf_dir_name
        )));
    }

    let mut input_documents = Vec::new();
    let mut extracted_sections = Vec::new();

    for document in &input.documents {
        let filename = document.filename();
        let pdf_path = pdfs_dir.join(filename);
        if !pdf_path.is_file() {
            tracing::warn!("{} not found", pdf_path.display());
            continue;
        }

        tracing::info!("Processing {}...", filename);
        input_documents.push(filename.to_string());

        let outline = extract_outline_from_pdf(&pdf_path)?;
        extracted_sections.extend(outline.outline.into_iter().enumerate().map(|(idx, entry)| {
            OutlineSection {
                document: filename.to_string(),
                section_title: entry.text,
                importance_rank: idx + 1,
                page_number: entry.page,
            }
        }));
    }

    let report = OutlineReport {
        metadata: OutlineMetadata {
            input_documents,
            persona: input.persona_role().unwrap_or(UNKNOWN).to_string(),
            job_to_be_done: input.job_task().unwrap_or(UNKNOWN).to_string(),
            processing_timestamp: processing_timestamp(),
        },
        extracted_sections,
    };

    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create {}", output_dir.display()))?;

    let output_name = output_file_name(&collection_name);
    let output_path = output_dir.join(&output_name);
    let json = serde_json::to_string_pretty(&report)?;
    std::fs::write(&output_path, json)
        .with_context(|| format!("Failed to write {}", output_path.display()))?;

    tracing::info!(
        "Successfully processed {} -> {} ({} sections)",
        collection_name,
        output_name,
        report.extracted_sections.len()
    );
    Ok(CollectionOutcome::Written(output_path))
}

/// Process the collection called `name` inside `input_dir`
pub fn process_named_collection(
    input_dir: &Path,
    name: &str,
    output_dir: &Path,
    config: &OutlineConfig,
) -> Result<CollectionOutcome> {
    let collection_path = input_dir.join(name);
    if !collection_path.is_dir() {
        return Err(ValidationError::CollectionNotFound {
            name: name.to_string(),
            dir: input_dir.display().to_string(),
        }
        .into());
    }

    process_collection(&collection_path, output_dir, config)
}

/// Process every collection directory in `input_dir`, in name order
///
/// One collection failing does not stop the others; it is logged and counted.
pub fn process_all_collections(
    input_dir: &Path,
    output_dir: &Path,
    config: &OutlineConfig,
) -> Result<ProcessingSummary> {
    if !input_dir.is_dir() {
        return Err(ExtractionError::DirectoryNotFound(input_dir.display().to_string()).into());
    }

    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create {}", output_dir.display()))?;

    let collections = find_collections(input_dir, &config.collection_prefix)?;

    let mut summary = ProcessingSummary::default();
    for collection in &collections {
        match process_collection(collection, output_dir, config) {
            Ok(CollectionOutcome::Written(_)) => summary.processed += 1,
            Ok(CollectionOutcome::Skipped(_)) => summary.failed += 1,
            Err(e) => {
                tracing::error!("Error processing {}: {:#}", collection.display(), e);
                summary.failed += 1;
            }
        }
    }

    tracing::info!(
        "Processing complete: {} processed, {} failed",
        summary.processed,
        summary.failed
    );
    Ok(summary)
}

/// Directories directly inside `input_dir` whose name starts with `prefix`, in name order
fn find_collections(input_dir: &Path, prefix: &str) -> Result<Vec<PathBuf>> {
    let mut collections = Vec::new();
    for entry in WalkDir::new(input_dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = entry.with_context(|| format!("Failed to read {}", input_dir.display()))?;
        let is_collection = entry.file_name().to_string_lossy().starts_with(prefix);
        if is_collection && entry.file_type().is_dir() {
            collections.push(entry.into_path());
        }
    }
    Ok(collections)
}

/// Local time with microseconds and no offset, e.g. `2025-07-10T15:31:22.632389`
fn processing_timestamp() -> String {
    chrono::Local::now()
        .format("%Y-%m-%dT%H:%M:%S%.6f")
        .to_string()
}
