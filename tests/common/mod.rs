//! Shared test helpers and a capturing transport.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use colloq::gateway::CompletionRequest;
use colloq::transport::{Transport, TransportError, TransportResponse};

type Scripted = Result<TransportResponse, TransportError>;

/// A transport that records every request and answers from a queue.
#[derive(Default)]
pub struct CaptureTransport {
    responses: Mutex<VecDeque<Scripted>>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl CaptureTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Queue a successful completion with the given text.
    pub fn queue_reply(&self, text: &str) {
        self.queue_status(200, &completion_body(text));
    }

    pub fn queue_status(&self, status: u16, body: &str) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Ok(TransportResponse::new(status, body)));
    }

    pub fn queue_error(&self, error: TransportError) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> CompletionRequest {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no request was sent")
    }
}

#[async_trait]
impl Transport for CaptureTransport {
    async fn send(&self, request: &CompletionRequest) -> Scripted {
        self.requests.lock().unwrap().push(request.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(TransportResponse::new(200, completion_body("Mock response"))))
    }
}

/// A chat completion body with one choice.
pub fn completion_body(text: &str) -> String {
    serde_json::json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": text},
            "finish_reason": "stop"
        }],
        "usage": {"prompt_tokens": 10, "completion_tokens": 20, "total_tokens": 30}
    })
    .to_string()
}
