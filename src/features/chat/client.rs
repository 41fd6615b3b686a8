//! Client wrappers for chat API endpoints.

use crate::client::{ApiClient, AppError};
use crate::features::chat::types::{
    ChatHistory, ChatReply, ChatRequest, ExplainRequest, Explanation, KnowledgeQuery,
    KnowledgeQueryResponse,
};

/// Default number of history messages requested.
pub const DEFAULT_HISTORY_LIMIT: u32 = 20;
/// Largest history page the server serves.
pub const MAX_HISTORY_LIMIT: u32 = 100;

/// Asks the tutor a free-form question, optionally scoped to a textbook.
pub async fn chat(
    api: &ApiClient,
    message: &str,
    textbook_id: Option<&str>,
) -> Result<ChatReply, AppError> {
    let request = ChatRequest {
        message: message.to_string(),
        textbook_id: textbook_id.map(ToString::to_string),
    };
    api.post_json("/chat/chat", &request).await
}

/// Searches knowledge points matching a query.
pub async fn query_knowledge(
    api: &ApiClient,
    query: &KnowledgeQuery,
) -> Result<KnowledgeQueryResponse, AppError> {
    api.post_json("/chat/query", query).await
}

/// Requests a detailed explanation of one knowledge point.
pub async fn explain_knowledge(
    api: &ApiClient,
    knowledge_point_id: &str,
) -> Result<Explanation, AppError> {
    let request = ExplainRequest {
        knowledge_point_id: knowledge_point_id.to_string(),
    };
    api.post_json("/chat/explain", &request).await
}

/// Fetches recent chat messages; `limit` is clamped to `1..=100`.
pub async fn chat_history(api: &ApiClient, limit: u32) -> Result<ChatHistory, AppError> {
    let limit = limit.clamp(1, MAX_HISTORY_LIMIT);
    api.get_with_query("/chat/history", &[("limit", limit)]).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ClientConfig;
    use crate::features::auth::token::TokenStore;
    use crate::storage::MemoryStorage;
    use anyhow::Result;
    use serde_json::json;
    use std::{net::TcpListener, sync::Arc};
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn can_bind_localhost() -> bool {
        TcpListener::bind("127.0.0.1:0").is_ok()
    }

    fn api_for(server: &MockServer) -> Result<ApiClient> {
        let config = ClientConfig::new(&format!("{}/api", server.uri()))?;
        Ok(ApiClient::new(
            &config,
            TokenStore::new(Arc::new(MemoryStorage::new())),
        )?)
    }

    #[tokio::test]
    async fn chat_sends_null_textbook_when_unscoped() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat/chat"))
            .and(body_json(json!({"message": "What is a noun?", "textbook_id": null})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "answer": "A noun names a thing.",
                "suggested_topics": ["pronouns"]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let api = api_for(&server)?;
        let reply = chat(&api, "What is a noun?", None).await?;
        assert_eq!(reply.answer, "A noun names a thing.");
        assert_eq!(reply.suggested_topics, vec!["pronouns".to_string()]);
        Ok(())
    }

    #[tokio::test]
    async fn query_sends_filters_in_body() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat/query"))
            .and(body_json(json!({
                "query": "apple",
                "textbook_id": "tb-1",
                "unit_id": null,
                "point_type": "vocabulary"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "query": "apple",
                "results": [{"id": "kp-1", "type": "vocabulary", "content": "apple"}],
                "related_topics": []
            })))
            .expect(1)
            .mount(&server)
            .await;

        let api = api_for(&server)?;
        let query = KnowledgeQuery {
            query: "apple".to_string(),
            textbook_id: Some("tb-1".to_string()),
            point_type: Some("vocabulary".to_string()),
            ..KnowledgeQuery::default()
        };
        let response = query_knowledge(&api, &query).await?;
        assert_eq!(response.results[0].point_type, "vocabulary");
        Ok(())
    }

    #[tokio::test]
    async fn explain_decodes_point_and_text() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat/explain"))
            .and(body_json(json!({"knowledge_point_id": "kp-1"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "knowledge_point": {
                    "id": "kp-1", "type": "grammar", "content": "present simple",
                    "unit_name": "Unit 1"
                },
                "explanation": "Used for habits."
            })))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/chat/explain"))
            .and(body_json(json!({"knowledge_point_id": "missing"})))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({"detail": "知识点不存在"})))
            .mount(&server)
            .await;

        let api = api_for(&server)?;
        let explanation = explain_knowledge(&api, "kp-1").await?;
        assert_eq!(explanation.knowledge_point.unit_name.as_deref(), Some("Unit 1"));

        let err = explain_knowledge(&api, "missing").await.unwrap_err();
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.message(), "知识点不存在");
        Ok(())
    }

    #[tokio::test]
    async fn history_limit_is_clamped() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/chat/history"))
            .and(query_param("limit", "100"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "messages": [],
                "message": "对话历史功能开发中"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let api = api_for(&server)?;
        let history = chat_history(&api, 500).await?;
        assert!(history.messages.is_empty());
        assert!(history.message.is_some());
        Ok(())
    }
}
