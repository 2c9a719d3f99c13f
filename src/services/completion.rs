// src/services/completion.rs
use crate::config::InsightConfig;
use crate::error::InsightError;
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;

/// Body of a Responses API call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompletionRequest {
    pub model: String,
    pub instructions: String,
    pub input: String,
}

/// Language-model completion endpoint: takes instructions plus input, returns
/// the raw text the model produced.
#[async_trait]
pub trait CompletionService: Send + Sync {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, InsightError>;

    fn provider_name(&self) -> &str;
}

pub struct OpenAiClient {
    api_key: String,
    base_url: String,
    client: Client,
}

impl OpenAiClient {
    pub fn new(api_key: String, base_url: String, client: Client) -> Self {
        Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    pub fn from_config(config: &InsightConfig, client: Client) -> Self {
        Self::new(
            config.openai_api_key.clone(),
            config.openai_base_url.clone(),
            client,
        )
    }

    fn endpoint(&self) -> String {
        format!("{}/responses", self.base_url)
    }
}

#[async_trait]
impl CompletionService for OpenAiClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, InsightError> {
        let response = self
            .client
            .post(self.endpoint())
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(InsightError::Api {
                service: "OpenAI",
                status: status.as_u16(),
                body,
            });
        }

        let body: Value = response.json().await?;
        output_text(&body)
            .ok_or_else(|| InsightError::Parse("OpenAI response contained no output text".into()))
    }

    fn provider_name(&self) -> &str {
        "OpenAI"
    }
}

/// Pulls the generated text out of a Responses API payload. Prefers the
/// aggregated `output_text` field, otherwise joins every `output_text` content
/// item in order.
pub fn output_text(body: &Value) -> Option<String> {
    if let Some(text) = body.get("output_text").and_then(|t| t.as_str()) {
        return Some(text.to_string());
    }

    let parts: Vec<&str> = body
        .get("output")?
        .as_array()?
        .iter()
        .filter_map(|item| item.get("content").and_then(|c| c.as_array()))
        .flatten()
        .filter(|content| content.get("type").and_then(|t| t.as_str()) == Some("output_text"))
        .filter_map(|content| content.get("text").and_then(|t| t.as_str()))
        .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.concat())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_output_text_from_message_items() {
        let body = json!({
            "id": "resp_123",
            "output": [
                { "type": "reasoning", "summary": [] },
                {
                    "type": "message",
                    "role": "assistant",
                    "content": [
                        { "type": "output_text", "text": "[{\"ticker\":\"AAPL\",", "annotations": [] },
                        { "type": "output_text", "text": "\"company\":\"Apple Inc.\"}]", "annotations": [] }
                    ]
                }
            ]
        });
        assert_eq!(
            output_text(&body).as_deref(),
            Some(r#"[{"ticker":"AAPL","company":"Apple Inc."}]"#)
        );
    }

    #[test]
    fn test_output_text_prefers_aggregate_field() {
        let body = json!({ "output_text": "[]", "output": [] });
        assert_eq!(output_text(&body).as_deref(), Some("[]"));
    }

    #[test]
    fn test_output_text_missing() {
        assert!(output_text(&json!({ "output": [] })).is_none());
        assert!(output_text(&json!({ "error": "boom" })).is_none());
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let client = OpenAiClient::new("k".into(), "http://localhost:9000/v1/".into(), Client::new());
        assert_eq!(client.endpoint(), "http://localhost:9000/v1/responses");
        assert_eq!(client.provider_name(), "OpenAI");
    }
}
