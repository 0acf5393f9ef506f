use macos_fetch::prelude::*;
use macos_fetch::ports::outbound::{FetchRequest, TransportError};
use std::collections::HashMap;
use std::fs;
use std::sync::{Arc, Mutex};

/// Mock Transport serving canned resources by URL
///
/// A URL without a resource answers 404. Every request is recorded; clones
/// share the record, so a test can keep a handle after moving the mock into
/// a replicator.
#[derive(Default, Clone)]
pub struct MockTransport {
    resources: HashMap<String, Vec<u8>>,
    pub requests: Arc<Mutex<Vec<FetchRequest>>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_resource(mut self, url: &str, content: impl Into<Vec<u8>>) -> Self {
        self.resources.insert(url.to_string(), content.into());
        self
    }

    pub fn requested_urls(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|request| request.url.clone())
            .collect()
    }

    pub fn requests_for(&self, url: &str) -> Vec<FetchRequest> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|request| request.url == url)
            .cloned()
            .collect()
    }
}

impl Transport for MockTransport {
    fn fetch(&self, request: &FetchRequest) -> std::result::Result<(), TransportError> {
        self.requests.lock().unwrap().push(request.clone());
        let Some(content) = self.resources.get(&request.url) else {
            return Err(TransportError::with_status(404));
        };
        if let Some(parent) = request.destination.parent() {
            fs::create_dir_all(parent).map_err(|e| TransportError::new(None, e.to_string()))?;
        }
        fs::write(&request.destination, content).map_err(|e| TransportError::new(None, e.to_string()))
    }
}
