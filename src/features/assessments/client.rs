//! Client wrappers for test API endpoints.

use crate::client::{ApiClient, AppError};
use crate::features::assessments::types::{
    AnswerSubmission, GenerateTestRequest, GeneratedTest, RecordsPage, ReviewTest, Statistics,
    SubmitTestRequest, TestRecord, TestResult,
};
use serde_json::Value;

/// Largest records page the server serves.
pub const MAX_PAGE_SIZE: u32 = 50;

/// Generates a test from a parsed textbook.
pub async fn generate_test(
    api: &ApiClient,
    request: &GenerateTestRequest,
) -> Result<GeneratedTest, AppError> {
    api.post_json("/tests/generate", request).await
}

/// Fetches a previously generated test. The payload shape is server-defined.
pub async fn get_test(api: &ApiClient, test_id: &str) -> Result<Value, AppError> {
    api.get(&format!("/tests/{test_id}")).await
}

/// Submits answers and returns the graded result.
pub async fn submit_test(
    api: &ApiClient,
    test_id: &str,
    answers: Vec<AnswerSubmission>,
) -> Result<TestResult, AppError> {
    let path = format!("/tests/{test_id}/submit");
    api.post_json(&path, &SubmitTestRequest { answers }).await
}

/// Lists past tests, newest first. Page numbers start at 1.
pub async fn test_records(api: &ApiClient, page: RecordsPage) -> Result<Vec<TestRecord>, AppError> {
    let page = RecordsPage {
        page: page.page.max(1),
        page_size: page.page_size.clamp(1, MAX_PAGE_SIZE),
    };
    api.get_with_query("/tests/records", &page).await
}

pub async fn statistics(api: &ApiClient) -> Result<Statistics, AppError> {
    api.get("/tests/statistics").await
}

/// Builds a review test from the wrong answers of a finished test.
pub async fn generate_review_test(
    api: &ApiClient,
    wrong_test_id: &str,
) -> Result<ReviewTest, AppError> {
    api.post_empty(&format!("/tests/review/{wrong_test_id}")).await
}

/// Builds a drill from collected wrong answers. Request and response are
/// passed through as JSON.
pub async fn generate_wrong_test(api: &ApiClient, request: &Value) -> Result<Value, AppError> {
    api.post_json("/tests/wrong-test", request).await
}
