//! Client wrappers for textbook API endpoints.

use crate::client::{ApiClient, AppError};
use crate::features::textbooks::types::{
    ALLOWED_EXTENSIONS, KnowledgeFilter, KnowledgePoint, ParseRequest, ParseResponse,
    StatusMessage, Textbook, UploadResponse,
};
use reqwest::multipart::{Form, Part};
use std::path::Path;

/// Whether the server accepts files with this name's extension.
#[must_use]
pub fn is_supported_file(file_name: &str) -> bool {
    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            ALLOWED_EXTENSIONS
                .iter()
                .any(|allowed| allowed.eq_ignore_ascii_case(ext))
        })
}

/// Uploads a textbook file. A blank `version` is not sent.
pub async fn upload_textbook(
    api: &ApiClient,
    file_name: &str,
    contents: Vec<u8>,
    name: &str,
    version: Option<&str>,
) -> Result<UploadResponse, AppError> {
    let part = Part::bytes(contents).file_name(file_name.to_string());
    let mut form = Form::new().part("file", part).text("name", name.to_string());
    if let Some(version) = version.map(str::trim).filter(|v| !v.is_empty()) {
        form = form.text("version", version.to_string());
    }
    api.post_multipart("/textbooks/upload", form).await
}

/// Starts parsing a textbook; `None` parses every unit.
pub async fn parse_textbook(
    api: &ApiClient,
    textbook_id: &str,
    unit_numbers: Option<Vec<u32>>,
) -> Result<ParseResponse, AppError> {
    let path = format!("/textbooks/{textbook_id}/parse");
    api.post_json(&path, &ParseRequest { unit_numbers }).await
}

/// Lists the current user's textbooks.
pub async fn list_textbooks(api: &ApiClient) -> Result<Vec<Textbook>, AppError> {
    api.get("/textbooks").await
}

/// Fetches one textbook with its units.
pub async fn get_textbook(api: &ApiClient, textbook_id: &str) -> Result<Textbook, AppError> {
    api.get(&format!("/textbooks/{textbook_id}")).await
}

pub async fn delete_textbook(api: &ApiClient, textbook_id: &str) -> Result<StatusMessage, AppError> {
    api.delete(&format!("/textbooks/{textbook_id}")).await
}

/// Lists knowledge points of a textbook, optionally filtered by unit and type.
pub async fn knowledge_points(
    api: &ApiClient,
    textbook_id: &str,
    filter: &KnowledgeFilter,
) -> Result<Vec<KnowledgePoint>, AppError> {
    let path = format!("/textbooks/{textbook_id}/knowledge");
    api.get_with_query(&path, filter).await
}
