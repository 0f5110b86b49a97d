use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::ProxyError;
use crate::transport::{Transport, VendorRequest, VendorResponse};

/// Transport double for tests: replays queued responses in order and
/// records every request it was asked to send.
#[derive(Debug, Default)]
pub struct MockTransport {
    responses: Mutex<VecDeque<Result<VendorResponse, MockFailure>>>,
    requests: Mutex<Vec<VendorRequest>>,
}

/// A canned transport-level failure (no vendor response obtained).
#[derive(Debug, Clone)]
pub struct MockFailure(pub String);

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, status: u16, body: impl Into<Vec<u8>>) -> Self {
        self.push(Ok(VendorResponse {
            status,
            body: body.into(),
        }))
    }

    pub fn respond_json(self, status: u16, body: serde_json::Value) -> Self {
        self.respond(status, body.to_string())
    }

    pub fn fail(self, message: &str) -> Self {
        self.push(Err(MockFailure(message.to_string())))
    }

    fn push(self, outcome: Result<VendorResponse, MockFailure>) -> Self {
        self.responses
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push_back(outcome);
        self
    }

    pub fn calls(&self) -> usize {
        self.requests().len()
    }

    pub fn requests(&self) -> Vec<VendorRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: VendorRequest) -> Result<VendorResponse, ProxyError> {
        let service = request.service;
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(request);

        let next = self
            .responses
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .pop_front();

        match next {
            Some(Ok(response)) => Ok(response),
            Some(Err(MockFailure(message))) => Err(ProxyError::Network { service, message }),
            None => Err(ProxyError::Network {
                service,
                message: "no mock response queued".to_string(),
            }),
        }
    }
}
