//! In-memory transports shared by the crawler unit tests

use super::{FetchError, FetchedResponse, Transport};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

/// Serves canned responses by exact URL; anything else is a 404
#[derive(Default)]
pub struct MapTransport {
    routes: HashMap<String, FetchedResponse>,
    failures: HashMap<String, FetchError>,
    requests: Mutex<Vec<String>>,
}

impl MapTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_body(self, url: &str, body: impl Into<Vec<u8>>) -> Self {
        self.with_response(url, url, 200, body)
    }

    pub fn with_response(
        mut self,
        url: &str,
        final_url: &str,
        status_code: u16,
        body: impl Into<Vec<u8>>,
    ) -> Self {
        self.routes.insert(
            url.to_string(),
            FetchedResponse {
                final_url: final_url.to_string(),
                status_code,
                content_type: None,
                body: body.into(),
            },
        );
        self
    }

    pub fn with_failure(mut self, url: &str, error: FetchError) -> Self {
        self.failures.insert(url.to_string(), error);
        self
    }

    /// Number of requests made for `url`
    pub fn hits(&self, url: &str) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|u| u.as_str() == url)
            .count()
    }
}

#[async_trait]
impl Transport for MapTransport {
    async fn get(&self, url: &str) -> Result<FetchedResponse, FetchError> {
        self.requests.lock().unwrap().push(url.to_string());

        if let Some(error) = self.failures.get(url) {
            return Err(error.clone());
        }

        Ok(self.routes.get(url).cloned().unwrap_or(FetchedResponse {
            final_url: url.to_string(),
            status_code: 404,
            content_type: Some("text/html".to_string()),
            body: b"<html><body>Not Found</body></html>".to_vec(),
        }))
    }
}

/// Fails every request at the connection level
pub struct UnreachableTransport;

#[async_trait]
impl Transport for UnreachableTransport {
    async fn get(&self, url: &str) -> Result<FetchedResponse, FetchError> {
        Err(FetchError::Timeout {
            url: url.to_string(),
            seconds: 1,
        })
    }
}
