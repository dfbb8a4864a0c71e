use super::*;

#[test]
fn test_heading_level_from_depth() {
    assert_eq!(HeadingLevel::from_depth(1), HeadingLevel::H1);
    assert_eq!(HeadingLevel::from_depth(2), HeadingLevel::H2);
    assert_eq!(HeadingLevel::from_depth(3), HeadingLevel::H3);
    assert_eq!(HeadingLevel::from_depth(0), HeadingLevel::H3);
    assert_eq!(HeadingLevel::from_depth(7), HeadingLevel::H3);
}

#[test]
fn test_heading_level_serializes_as_label() {
    let entry = OutlineEntry {
        level: HeadingLevel::H2,
        text: "Getting Started".to_string(),
        page: 3,
    };
    let json = serde_json::to_value(&entry).unwrap();
    assert_eq!(json["level"], "H2");
    assert_eq!(json["page"], 3);
    assert_eq!(HeadingLevel::H1.to_string(), "H1");
}

#[test]
fn test_challenge_input_full() {
    let json = r#"{
        "challenge_info": {
            "challenge_id": "round_1b_002",
            "test_case_name": "travel_planner",
            "description": "France Travel"
        },
        "documents": [
            {"filename": "South of France - Cities.pdf", "title": "South of France - Cities"},
            {"filename": "South of France - Cuisine.pdf", "title": "South of France - Cuisine"}
        ],
        "persona": {"role": "Travel Planner"},
        "job_to_be_done": {"task": "Plan a trip of 4 days for a group of 10 college friends."}
    }"#;

    let input: ChallengeInput = serde_json::from_str(json).unwrap();
    assert_eq!(input.description(), Some("France Travel"));
    assert_eq!(input.persona_role(), Some("Travel Planner"));
    assert_eq!(
        input.job_task(),
        Some("Plan a trip of 4 days for a group of 10 college friends.")
    );
    assert_eq!(input.documents.len(), 2);
    assert_eq!(input.documents[0].filename(), "South of France - Cities.pdf");
    assert!(input.query.is_none());
}

#[test]
fn test_challenge_input_empty_object() {
    let input: ChallengeInput = serde_json::from_str("{}").unwrap();
    assert!(input.documents.is_empty());
    assert!(input.persona_role().is_none());
    assert!(input.job_task().is_none());
    assert!(input.description().is_none());
}

#[test]
fn test_document_ref_variants() {
    let docs: Vec<DocumentRef> =
        serde_json::from_str(r#"[{"filename": "dir/a.pdf"}, "other/b.pdf", "c.pdf"]"#).unwrap();

    assert!(matches!(docs[0], DocumentRef::Entry { .. }));
    assert_eq!(docs[0].filename(), "dir/a.pdf");
    assert_eq!(docs[0].base_name(), "a.pdf");
    assert_eq!(docs[1], DocumentRef::Path("other/b.pdf".to_string()));
    assert_eq!(docs[1].base_name(), "b.pdf");
    assert_eq!(docs[2].base_name(), "c.pdf");
}

#[test]
fn test_outline_report_shape() {
    let report = OutlineReport {
        metadata: OutlineMetadata {
            input_documents: vec![],
            persona: "Unknown".to_string(),
            job_to_be_done: "Unknown".to_string(),
            processing_timestamp: "2025-01-01T00:00:00.000000".to_string(),
        },
        extracted_sections: vec![],
    };

    let json = serde_json::to_value(&report).unwrap();
    assert!(json["metadata"]["input_documents"].is_array());
    assert_eq!(json["metadata"]["persona"], "Unknown");
    assert!(json["metadata"]["processing_timestamp"].is_string());
    assert_eq!(json["extracted_sections"], serde_json::json!([]));
}

#[test]
fn test_search_report_shape() {
    let report = SearchReport {
        metadata: SearchMetadata {
            input_documents: vec!["a.pdf".to_string()],
            persona: String::new(),
            job_to_be_done: String::new(),
        },
        extracted_sections: vec![RankedSection {
            document: "a.pdf".to_string(),
            section_title: "Beaches".to_string(),
            rank: 1,
        }],
        subsection_analysis: vec![],
    };

    let json = serde_json::to_value(&report).unwrap();
    let object = json.as_object().unwrap();
    assert!(object.contains_key("metadata"));
    assert!(object.contains_key("extracted_sections"));
    assert!(object.contains_key("subsection_analysis"));
    assert_eq!(json["extracted_sections"][0]["rank"], 1);
}

#[test]
fn test_chunk_metadata_id_defaults_to_empty() {
    let metadata: ChunkMetadata =
        serde_json::from_str(r#"{"source": "a.pdf", "page": 2}"#).unwrap();
    assert_eq!(metadata.id, "");
    assert_eq!(metadata.page, 2);
}
