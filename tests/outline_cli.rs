/// Exit status and messages of the doc-outline binary
mod common;

use anyhow::Result;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn doc_outline(root: &Path, args: &[&str]) -> Result<Output> {
    Ok(Command::new(env!("CARGO_BIN_EXE_doc-outline"))
        .args(args)
        .current_dir(root)
        .env("XDG_CONFIG_HOME", root.join("config"))
        .env("RUST_LOG", "warn")
        .output()?)
}

#[test]
fn test_missing_input_dir_reports_and_exits_zero() -> Result<()> {
    let root = TempDir::new()?;
    let output = doc_outline(root.path(), &["--all", "--input-dir", "missing"])?;

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Directory not found"), "stderr: {}", stderr);

    Ok(())
}

#[test]
fn test_unknown_collection_reports_and_exits_zero() -> Result<()> {
    let root = TempDir::new()?;
    std::fs::create_dir(root.path().join("challenge_pdfs"))?;
    let output = doc_outline(root.path(), &["--collection", "Collection 9"])?;

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Collection 'Collection 9' not found"),
        "stderr: {}",
        stderr
    );

    Ok(())
}

#[test]
fn test_skipped_collection_exits_zero() -> Result<()> {
    let root = TempDir::new()?;
    std::fs::create_dir_all(root.path().join("challenge_pdfs").join("Collection 1"))?;
    let output = doc_outline(root.path(), &["--collection", "Collection 1"])?;

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Processing failed"));

    Ok(())
}

#[test]
fn test_single_collection_writes_report() -> Result<()> {
    let root = TempDir::new()?;
    let collection = root.path().join("challenge_pdfs").join("Collection 1");
    std::fs::create_dir_all(collection.join("PDFs"))?;
    std::fs::write(
        collection.join("challenge1b_input.json"),
        r#"{"documents": [{"filename": "guide.pdf"}], "persona": {"role": "Travel Planner"}}"#,
    )?;
    common::write_guide(&collection.join("PDFs").join("guide.pdf"))?;

    let output = doc_outline(
        root.path(),
        &["--collection", "Collection 1", "--output-dir", "out"],
    )?;

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Success: Output saved to"));

    let report: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(
        root.path().join("out").join("collection1_output.json"),
    )?)?;
    assert_eq!(report["metadata"]["persona"], "Travel Planner");
    assert_eq!(
        report["extracted_sections"][0]["section_title"],
        "Comprehensive Guide to Nice"
    );

    Ok(())
}

#[test]
fn test_no_mode_prints_help() -> Result<()> {
    let root = TempDir::new()?;
    let output = doc_outline(root.path(), &[])?;

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("--collection"));

    Ok(())
}
