/// Search pipeline through the public API, with a stand-in embedding model
mod common;

use anyhow::Result;
use doc_intel::config::Config;
use doc_intel::embedding::EmbeddingProvider;
use doc_intel::search::{InputSource, SemanticSearch};
use std::sync::Arc;
use tempfile::TempDir;

struct ConstantEmbedding;

impl EmbeddingProvider for ConstantEmbedding {
    fn embed_batch(&self, texts: Vec<String>) -> Result<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|_| vec![1.0, 0.0, 0.0, 0.0]).collect())
    }

    fn dimension(&self) -> usize {
        4
    }

    fn model_name(&self) -> &str {
        "constant"
    }
}

#[tokio::test]
async fn test_search_report_has_required_keys() -> Result<()> {
    let root = TempDir::new()?;
    let collection = root.path().join("Collection 1");
    std::fs::create_dir_all(collection.join("PDFs"))?;
    std::fs::write(
        collection.join("challenge1b_input.json"),
        r#"{
            "challenge_info": {"description": "Create and manage fillable forms"},
            "documents": [{"filename": "Learn Acrobat - Fill and Sign.pdf"}],
            "persona": {"role": "HR professional"},
            "job_to_be_done": {"task": "Create fillable forms for onboarding."}
        }"#,
    )?;

    let mut config = Config::default();
    config.vector_db.persist_dir = root.path().join("index");
    let search = SemanticSearch::with_provider(Arc::new(ConstantEmbedding), config);

    let output = root.path().join("outline.json");
    search
        .run(
            InputSource::Path(collection.join("challenge1b_input.json")),
            Some(&output),
        )
        .await?;

    let report: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&output)?)?;
    let object = report.as_object().expect("report is an object");
    for key in ["metadata", "extracted_sections", "subsection_analysis"] {
        assert!(object.contains_key(key), "missing key {}", key);
    }
    assert_eq!(
        report["metadata"]["input_documents"],
        serde_json::json!(["Learn Acrobat - Fill and Sign.pdf"])
    );
    assert_eq!(report["metadata"]["persona"], "HR professional");
    assert!(root.path().join("index").exists());

    Ok(())
}

#[tokio::test]
async fn test_search_over_generated_pdfs() -> Result<()> {
    let root = TempDir::new()?;
    let pdfs = root.path().join("PDFs");
    std::fs::create_dir_all(&pdfs)?;
    common::write_guide(&pdfs.join("Guide.pdf"))?;
    common::write_cuisine(&pdfs.join("Cuisine.pdf"))?;
    std::fs::write(
        root.path().join("spec.json"),
        r#"{
            "query": "fish stew",
            "documents": ["Guide.pdf", "Cuisine.pdf"],
            "persona": {"role": "Travel Planner"},
            "persist_dir": "index"
        }"#,
    )?;

    let mut config = Config::default();
    config.search.top_k = 10;
    let search = SemanticSearch::with_provider(Arc::new(ConstantEmbedding), config);
    let report = search
        .run(InputSource::Path(root.path().join("spec.json")), None)
        .await?;

    assert_eq!(report.extracted_sections.len(), 3);
    let mut ranks: Vec<_> = report.extracted_sections.iter().map(|s| s.rank).collect();
    ranks.sort_unstable();
    assert_eq!(ranks, vec![1, 2, 3]);

    let mut titles: Vec<_> = report
        .extracted_sections
        .iter()
        .map(|s| (s.document.as_str(), s.section_title.as_str()))
        .collect();
    titles.sort_unstable();
    assert_eq!(
        titles,
        vec![
            ("Cuisine.pdf", "Flavours of Provence"),
            ("Guide.pdf", "2.1 Coastal Walks"),
            ("Guide.pdf", "Comprehensive Guide to Nice"),
        ]
    );
    assert!(
        report
            .subsection_analysis
            .iter()
            .any(|s| s.text.ends_with("Bouillabaisse is a fish stew"))
    );

    Ok(())
}
