//! Mock implementations for testing.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use crate::error::{PraatError, Result};
use crate::transport::{HttpRequest, HttpResponse, Transport};

/// What the mock does when a URL is requested.
#[derive(Debug, Clone)]
pub enum MockReply {
    Response(HttpResponse),
    NetworkError(String),
}

/// An in-memory [`Transport`] that replays canned replies by URL.
///
/// - Replies queued for a URL are served in order; the last one repeats.
/// - URLs without a reply get a 404.
/// - Every request is recorded.
///
/// # Example
///
/// ```rust,ignore
/// let transport = MockTransport::new()
///     .respond("http://host/a.wav", HttpResponse::new(200, None, wav_bytes(8)));
/// let blob = load_blob(&transport, "http://host/a.wav")?;
/// assert_eq!(transport.requests().len(), 1);
/// ```
#[derive(Default)]
pub struct MockTransport {
    replies: Mutex<HashMap<String, VecDeque<MockReply>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response for `url`.
    pub fn respond(self, url: impl Into<String>, response: HttpResponse) -> Self {
        self.push(url.into(), MockReply::Response(response));
        self
    }

    /// Queue a connection failure for `url`.
    pub fn fail(self, url: impl Into<String>, message: impl Into<String>) -> Self {
        self.push(url.into(), MockReply::NetworkError(message.into()));
        self
    }

    fn push(&self, url: String, reply: MockReply) {
        self.replies
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .entry(url)
            .or_default()
            .push_back(reply);
    }

    /// All requests received so far, in arrival order.
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Requests received for one URL.
    pub fn requests_to(&self, url: &str) -> Vec<HttpRequest> {
        self.requests()
            .into_iter()
            .filter(|req| req.url == url)
            .collect()
    }
}

impl Transport for MockTransport {
    fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        let reply = {
            let mut replies = self.replies.lock().unwrap_or_else(|e| e.into_inner());
            match replies.get_mut(&request.url) {
                Some(queue) if queue.len() > 1 => queue.pop_front(),
                Some(queue) => queue.front().cloned(),
                None => None,
            }
        };

        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(request);

        match reply {
            Some(MockReply::Response(response)) => Ok(response),
            Some(MockReply::NetworkError(message)) => Err(PraatError::Network(message)),
            None => Ok(HttpResponse::new(404, Some("text/html"), "Not Found")),
        }
    }
}
