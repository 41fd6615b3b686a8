//! Request and response types for chat API endpoints.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ChatRequest {
    pub message: String,
    pub textbook_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ChatReply {
    pub answer: String,
    #[serde(default)]
    pub suggested_topics: Vec<String>,
}

/// Knowledge lookup; `point_type` is one of vocabulary, grammar, or sentence.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct KnowledgeQuery {
    pub query: String,
    pub textbook_id: Option<String>,
    pub unit_id: Option<String>,
    pub point_type: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct KnowledgeHit {
    pub id: String,
    #[serde(rename = "type")]
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

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct KnowledgeQueryResponse {
    pub query: String,
    #[serde(default)]
    pub results: Vec<KnowledgeHit>,
    #[serde(default)]
    pub related_topics: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ExplainRequest {
    pub knowledge_point_id: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ExplainedPoint {
    pub id: String,
    #[serde(rename = "type")]
    pub point_type: String,
    pub content: String,
    #[serde(default)]
    pub phonetic: Option<String>,
    #[serde(default)]
    pub part_of_speech: Option<String>,
    #[serde(default)]
    pub chinese_meaning: Option<String>,
    #[serde(default)]
    pub unit_name: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Explanation {
    pub knowledge_point: ExplainedPoint,
    pub explanation: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ChatHistory {
    #[serde(default)]
    pub messages: Vec<Value>,
    /// Server notice, e.g. when history is not available yet.
    #[serde(default)]
    pub message: Option<String>,
}
