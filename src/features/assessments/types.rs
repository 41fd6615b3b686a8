//! Request and response types for test API endpoints.

use crate::util::Difficulty;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TestType {
    #[default]
    Unit,
    Comprehensive,
}

/// Test generation options. Unset lists mean "all units" and "all point types";
/// an unset `question_count` lets the server pick.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct GenerateTestRequest {
    pub textbook_id: String,
    pub test_type: TestType,
    pub unit_numbers: Option<Vec<u32>>,
    pub point_types: Option<Vec<String>>,
    pub difficulty: Difficulty,
    pub question_count: Option<u32>,
}

impl GenerateTestRequest {
    #[must_use]
    pub fn new(textbook_id: impl Into<String>) -> Self {
        Self {
            textbook_id: textbook_id.into(),
            test_type: TestType::default(),
            unit_numbers: None,
            point_types: None,
            difficulty: Difficulty::default(),
            question_count: None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Question {
    pub id: String,
    #[serde(rename = "type")]
    pub question_type: String,
    pub question: String,
    #[serde(default)]
    pub options: Option<Vec<String>>,
    /// Suggested seconds to spend.
    #[serde(default)]
    pub time_limit: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct GeneratedTest {
    pub test_id: String,
    pub questions: Vec<Question>,
    pub total_questions: u32,
    #[serde(default)]
    pub time_limit: Option<u64>,
    #[serde(default)]
    pub difficulty: Difficulty,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct AnswerSubmission {
    pub question_id: String,
    pub answer: String,
    /// Seconds spent on the question.
    #[serde(default)]
    pub time_spent: u32,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct SubmitTestRequest {
    pub answers: Vec<AnswerSubmission>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TestResult {
    pub test_id: String,
    pub total_questions: u32,
    pub correct_count: u32,
    pub wrong_count: u32,
    pub score: f64,
    pub passed: bool,
    #[serde(default)]
    pub correct_answers: Vec<Value>,
    #[serde(default)]
    pub wrong_answers: Vec<Value>,
    #[serde(default)]
    pub analysis: Value,
    #[serde(default)]
    pub review_test_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TestRecord {
    pub id: String,
    pub test_type: String,
    #[serde(default)]
    pub test_scope: Value,
    pub total_questions: u32,
    #[serde(default)]
    pub correct_count: u32,
    #[serde(default)]
    pub score: f64,
    #[serde(default)]
    pub difficulty: Difficulty,
    pub status: String,
    pub started_at: String,
    #[serde(default)]
    pub completed_at: Option<String>,
}

/// Page of test records; the server caps `page_size` at 50.
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
pub struct RecordsPage {
    pub page: u32,
    pub page_size: u32,
}

impl Default for RecordsPage {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: 10,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct WeakPoint {
    pub knowledge_point: Value,
    pub wrong_count: u32,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct MonthlyProgress {
    pub month: String,
    #[serde(default)]
    pub tests: u32,
    #[serde(default)]
    pub total_questions: u32,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Statistics {
    pub total_tests: u32,
    pub total_questions: u32,
    pub correct_rate: f64,
    #[serde(default)]
    pub weak_points: Vec<WeakPoint>,
    #[serde(default)]
    pub learning_progress: Vec<MonthlyProgress>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ReviewTest {
    #[serde(default)]
    pub message: String,
    pub test: Value,
}
