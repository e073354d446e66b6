#![allow(dead_code)]

use postnl::{
    Client, ClientConfig,
    http::{HttpRequest, HttpResponse, StatusCode, Transport, TransportError},
};
use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};

pub const API_KEY: &str = "test-key";

///
/// MockTransport
///
/// Replays queued responses in order and records every request it sees.
///

#[derive(Default)]
pub struct MockTransport {
    responses: Mutex<VecDeque<Result<HttpResponse, TransportError>>>,
    sent: Mutex<Vec<HttpRequest>>,
}

impl MockTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn respond(&self, status: u16, body: &str) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Ok(HttpResponse::new(
                StatusCode::from_u16(status).unwrap(),
                body.as_bytes(),
            )));
    }

    pub fn fail(&self, err: TransportError) {
        self.responses.lock().unwrap().push_back(Err(err));
    }

    pub fn sent(&self) -> Vec<HttpRequest> {
        self.sent.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

impl Transport for MockTransport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        self.sent.lock().unwrap().push(request.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Connection("no response queued".into())))
    }
}

pub fn rest_client(transport: &Arc<MockTransport>) -> Client {
    Client::new(ClientConfig::new(API_KEY), Arc::clone(transport) as Arc<dyn Transport>)
}
