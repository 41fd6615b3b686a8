//! Request and response types for textbook API endpoints.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// File extensions the server accepts for upload.
pub const ALLOWED_EXTENSIONS: &[&str] = &["pdf", "docx", "doc", "md"];

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ParseStatus {
    Pending,
    Processing,
    Completed,
    Failed,
    #[serde(other)]
    Unknown,
}

impl ParseStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Textbook {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub version: Option<String>,
    pub file_type: String,
    pub parse_status: ParseStatus,
    #[serde(default)]
    pub statistics: Option<Value>,
    /// Present only on the detail endpoint.
    #[serde(default)]
    pub units: Vec<Unit>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Unit {
    pub id: String,
    pub unit_number: u32,
    pub title: String,
    #[serde(default)]
    pub vocabulary_count: u32,
    #[serde(default)]
    pub grammar_count: u32,
    #[serde(default)]
    pub sentence_count: u32,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct KnowledgePoint {
    pub id: String,
    pub unit_id: String,
    #[serde(default)]
    pub unit_name: Option<String>,
    pub point_type: String,
    pub content: String,
    #[serde(default)]
    pub phonetic: Option<String>,
    #[serde(default)]
    pub part_of_speech: Option<String>,
    #[serde(default)]
    pub chinese_meaning: Option<String>,
    #[serde(default)]
    pub collocations: Option<Vec<String>>,
    #[serde(default)]
    pub examples: Option<Vec<String>>,
}

/// Filter for the knowledge point listing; unset fields are omitted.
#[derive(Debug, Serialize, Default, Clone, PartialEq, Eq)]
pub struct KnowledgeFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub point_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
}

/// `None` parses every unit.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ParseRequest {
    pub unit_numbers: Option<Vec<u32>>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct UploadResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: String,
    pub textbook: Textbook,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ParseResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub statistics: Option<Value>,
    #[serde(default)]
    pub knowledge_points_count: u64,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: String,
}
