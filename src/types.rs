use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Outline heading level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
}

impl HeadingLevel {
    /// Map a bookmark depth to a level; anything outside 1..=3 becomes H3
    pub fn from_depth(depth: usize) -> Self {
        match depth {
            1 => HeadingLevel::H1,
            2 => HeadingLevel::H2,
            _ => HeadingLevel::H3,
        }
    }
}

impl fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            HeadingLevel::H1 => "H1",
            HeadingLevel::H2 => "H2",
            HeadingLevel::H3 => "H3",
        };
        f.write_str(label)
    }
}

/// A detected heading
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineEntry {
    pub level: HeadingLevel,
    pub text: String,
    /// 1-based page number
    pub page: usize,
}

/// Title plus ordered headings of one PDF
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentOutline {
    pub title: String,
    pub outline: Vec<OutlineEntry>,
}

/// A challenge input document (`challenge1b_input.json` or a search spec)
///
/// Every field is optional; each flow reads the ones it needs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChallengeInput {
    /// Explicit search query, takes precedence over the challenge description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub challenge_info: Option<ChallengeInfo>,
    /// Directory of PDFs to search, relative to the spec file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_path: Option<String>,
    /// Directory for the vector index, relative to the spec file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub persist_dir: Option<String>,
    #[serde(default)]
    pub documents: Vec<DocumentRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub persona: Option<Persona>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_to_be_done: Option<JobToBeDone>,
}

impl ChallengeInput {
    pub fn persona_role(&self) -> Option<&str> {
        self.persona.as_ref().and_then(|p| p.role.as_deref())
    }

    pub fn job_task(&self) -> Option<&str> {
        self.job_to_be_done.as_ref().and_then(|j| j.task.as_deref())
    }

    pub fn description(&self) -> Option<&str> {
        self.challenge_info
            .as_ref()
            .and_then(|c| c.description.as_deref())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChallengeInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub challenge_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_case_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Persona {
    #[serde(default)]
    pub role: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobToBeDone {
    #[serde(default)]
    pub task: Option<String>,
}

/// Entry of `documents[]`: either `{"filename": ..., "title": ...}` or a bare path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DocumentRef {
    Entry {
        filename: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        title: Option<String>,
    },
    Path(String),
}

impl DocumentRef {
    /// The file name or path as written in the input
    pub fn filename(&self) -> &str {
        match self {
            DocumentRef::Entry { filename, .. } => filename,
            DocumentRef::Path(path) => path,
        }
    }

    /// Final path component of [`Self::filename`]
    pub fn base_name(&self) -> String {
        let filename = self.filename();
        Path::new(filename)
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| filename.to_string())
    }
}

/// Output of the outline extractor for one collection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutlineReport {
    pub metadata: OutlineMetadata,
    pub extracted_sections: Vec<OutlineSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutlineMetadata {
    pub input_documents: Vec<String>,
    pub persona: String,
    pub job_to_be_done: String,
    pub processing_timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlineSection {
    pub document: String,
    pub section_title: String,
    /// 1-based position of the heading within its document's outline
    pub importance_rank: usize,
    pub page_number: usize,
}

/// Output of the semantic search flow
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchReport {
    pub metadata: SearchMetadata,
    pub extracted_sections: Vec<RankedSection>,
    pub subsection_analysis: Vec<SubsectionAnalysis>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchMetadata {
    pub input_documents: Vec<String>,
    pub persona: String,
    pub job_to_be_done: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedSection {
    pub document: String,
    pub section_title: String,
    pub rank: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubsectionAnalysis {
    pub document: String,
    pub text: String,
}

/// Where a text chunk came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkMetadata {
    /// PDF file name
    pub source: String,
    /// 1-based page number
    pub page: usize,
    /// `source:page:n`, assigned just before indexing
    #[serde(default)]
    pub id: String,
}

/// A single hit from the vector index
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    pub id: String,
    pub source: String,
    pub page: usize,
    pub content: String,
    /// Similarity derived from the vector distance (0.0 to 1.0)
    pub score: f32,
}

#[cfg(test)]
mod tests;
