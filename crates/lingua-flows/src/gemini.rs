use std::time::Duration;

use async_trait::async_trait;
use lingua_config::genai::GenAiConfig;
use serde_json::{Value, json};

use crate::{BackendMetadata, FlowError, GenerateRequest, GenerativeBackend};

/// Google Gemini `generateContent` backend with JSON-mode output
#[derive(Clone)]
pub struct GeminiBackend {
    client: reqwest::Client,
    api_key: String,
    endpoint: String,
    model: String,
    temperature: f32,
}

impl GeminiBackend {
    pub fn from_config(config: &GenAiConfig) -> Result<Self, FlowError> {
        let mut builder = reqwest::Client::builder();
        if config.timeout_seconds > 0 {
            builder = builder.timeout(Duration::from_secs(config.timeout_seconds));
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            endpoint: config.generate_url(),
            model: config.model.clone(),
            temperature: config.temperature,
        })
    }

    fn request_body(&self, request: &GenerateRequest) -> Value {
        json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": request.prompt }]
            }],
            "generationConfig": {
                "temperature": self.temperature,
                "responseMimeType": "application/json",
                "responseSchema": request.output_schema
            }
        })
    }
}

#[async_trait]
impl GenerativeBackend for GeminiBackend {
    async fn generate(&self, request: GenerateRequest) -> Result<Value, FlowError> {
        if self.api_key.trim().is_empty() {
            return Err(FlowError::AuthenticationError);
        }

        let response = self
            .client
            .post(&self.endpoint)
            .header("x-goog-api-key", &self.api_key)
            .json(&self.request_body(&request))
            .send()
            .await?;

        let status = response.status();
        if status.as_u16() == 429 {
            return Err(FlowError::RateLimitExceeded);
        }

        if status.as_u16() == 401 || status.as_u16() == 403 {
            return Err(FlowError::AuthenticationError);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(flow = %request.flow, %status, "backend rejected request");
            return Err(FlowError::ApiError(format!(
                "HTTP {}: {}",
                status,
                api_error_message(&body)
            )));
        }

        let json: Value = response
            .json()
            .await
            .map_err(|e| FlowError::ApiError(format!("Failed to parse response: {}", e)))?;

        extract_output(&request.flow, &json)
    }

    fn metadata(&self) -> BackendMetadata {
        BackendMetadata {
            name: "Google AI".to_string(),
            model: self.model.clone(),
            requires_api_key: true,
        }
    }
}

/// Pull the model's JSON answer out of a `generateContent` response body
pub fn extract_output(flow: &str, body: &Value) -> Result<Value, FlowError> {
    if let Some(reason) = body["promptFeedback"]["blockReason"].as_str() {
        return Err(FlowError::ApiError(format!("Prompt blocked: {reason}")));
    }

    let text: String = body["candidates"]
        .get(0)
        .and_then(|c| c["content"]["parts"].as_array())
        .map(|parts| {
            parts
                .iter()
                .filter_map(|p| p["text"].as_str())
                .collect::<Vec<_>>()
                .concat()
        })
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(FlowError::EmptyOutput {
            flow: flow.to_string(),
        });
    }

    serde_json::from_str(&text).map_err(|e| FlowError::MalformedOutput {
        flow: flow.to_string(),
        reason: e.to_string(),
    })
}

fn api_error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| body.chars().take(200).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_json_from_first_candidate() {
        let body = json!({
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [{ "text": "{\"translation\":" }, { "text": " \"Hola\"}" }]
                }
            }]
        });

        let value = extract_output("translateTextFlow", &body).unwrap();
        assert_eq!(value["translation"], "Hola");
    }

    #[test]
    fn missing_candidates_is_empty_output() {
        let err = extract_output("defineMeaningFlow", &json!({ "candidates": [] })).unwrap_err();
        assert!(matches!(err, FlowError::EmptyOutput { ref flow } if flow == "defineMeaningFlow"));
    }

    #[test]
    fn non_json_text_is_malformed() {
        let body = json!({
            "candidates": [{ "content": { "parts": [{ "text": "Hola" }] } }]
        });
        let err = extract_output("translateTextFlow", &body).unwrap_err();
        assert!(matches!(err, FlowError::MalformedOutput { .. }));
    }

    #[test]
    fn blocked_prompt_is_reported() {
        let body = json!({ "promptFeedback": { "blockReason": "SAFETY" } });
        let err = extract_output("translateTextFlow", &body).unwrap_err();
        assert!(err.to_string().contains("SAFETY"));
    }

    #[test]
    fn api_error_message_prefers_structured_error() {
        let body = r#"{"error":{"code":400,"message":"API key not valid"}}"#;
        assert_eq!(api_error_message(body), "API key not valid");
        assert_eq!(api_error_message("plain failure"), "plain failure");
    }

    #[test]
    fn request_body_asks_for_json() {
        let backend = GeminiBackend::from_config(&GenAiConfig::default()).unwrap();
        let body = backend.request_body(&GenerateRequest {
            flow: "f".to_string(),
            prompt: "p".to_string(),
            output_schema: json!({ "type": "OBJECT" }),
        });

        assert_eq!(body["contents"][0]["parts"][0]["text"], "p");
        assert_eq!(body["generationConfig"]["responseMimeType"], "application/json");
        assert_eq!(body["generationConfig"]["responseSchema"]["type"], "OBJECT");
    }

    #[tokio::test]
    async fn missing_key_fails_before_network() {
        let backend = GeminiBackend::from_config(&GenAiConfig::default()).unwrap();
        let err = backend
            .generate(GenerateRequest {
                flow: "f".to_string(),
                prompt: "p".to_string(),
                output_schema: Value::Null,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, FlowError::AuthenticationError));
    }

    #[test]
    fn timeout_config_builds_and_reports_metadata() {
        let config = GenAiConfig {
            model: "gemini-1.5-pro".to_string(),
            timeout_seconds: 30,
            ..GenAiConfig::default()
        };

        let backend = GeminiBackend::from_config(&config).unwrap();
        let metadata = backend.metadata();

        assert_eq!(metadata.name, "Google AI");
        assert_eq!(metadata.model, "gemini-1.5-pro");
        assert!(metadata.requires_api_key);
    }
}
