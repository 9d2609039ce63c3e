use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use crate::{BackendMetadata, FlowError, GenerateRequest, GenerativeBackend};

/// Scripted backend: answers are queued per flow name and every request is
/// recorded, so tests can assert on what would have gone over the wire.
#[derive(Default)]
pub struct MockBackend {
    responses: Mutex<HashMap<String, VecDeque<Result<Value, String>>>>,
    requests: Mutex<Vec<GenerateRequest>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful answer for `flow`
    pub fn respond(&self, flow: &str, output: Value) -> &Self {
        self.push(flow, Ok(output))
    }

    /// Queue a failure for `flow`
    pub fn fail(&self, flow: &str, message: &str) -> &Self {
        self.push(flow, Err(message.to_string()))
    }

    fn push(&self, flow: &str, response: Result<Value, String>) -> &Self {
        self.responses
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .entry(flow.to_string())
            .or_default()
            .push_back(response);
        self
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn requests(&self) -> Vec<GenerateRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

#[async_trait]
impl GenerativeBackend for MockBackend {
    async fn generate(&self, request: GenerateRequest) -> Result<Value, FlowError> {
        let flow = request.flow.clone();
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(request);

        let next = self
            .responses
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get_mut(&flow)
            .and_then(|queue| queue.pop_front());

        match next {
            Some(Ok(value)) => Ok(value),
            Some(Err(message)) => Err(FlowError::ApiError(message)),
            None => Err(FlowError::ApiError(format!(
                "no scripted response for {flow}"
            ))),
        }
    }

    fn metadata(&self) -> BackendMetadata {
        BackendMetadata {
            name: "mock".to_string(),
            model: "scripted".to_string(),
            requires_api_key: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[tokio::test]
    async fn replays_scripted_answers_in_order() {
        let backend = MockBackend::new();
        backend
            .respond("f", json!({ "a": 1 }))
            .fail("f", "second call fails");
        let request = GenerateRequest {
            flow: "f".to_string(),
            prompt: "p".to_string(),
            output_schema: Value::Null,
        };

        assert_eq!(backend.generate(request.clone()).await.unwrap(), json!({ "a": 1 }));
        assert!(matches!(
            backend.generate(request.clone()).await,
            Err(FlowError::ApiError(_))
        ));
        assert_eq!(backend.calls(), 2);
        assert!(!backend.metadata().requires_api_key);
    }
}
