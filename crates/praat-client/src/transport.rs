//! HTTP transport seam.
//!
//! [`Transport`] is the only place the crate touches the network. The
//! production implementation wraps a `ureq::Agent`; tests substitute an
//! in-memory transport (see [`crate::testing::MockTransport`]).

use std::io::Read;
use std::time::Duration;

use log::debug;

use crate::config::ClientConfig;
use crate::error::{PraatError, Result};
use crate::form::Form;

/// HTTP method of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Method {
    #[default]
    Get,
    Post,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }

    /// Whether requests with this method carry a body.
    pub fn has_body(self) -> bool {
        matches!(self, Method::Post)
    }
}

/// An outgoing request.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub body: Option<Form>,
}

impl HttpRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            url: url.into(),
            body: None,
        }
    }

    pub fn post(url: impl Into<String>, form: Form) -> Self {
        Self {
            method: Method::Post,
            url: url.into(),
            body: Some(form),
        }
    }
}

/// A completed response, whatever its status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16, content_type: Option<&str>, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            content_type: content_type.map(str::to_string),
            body: body.into(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

/// Sends one request and returns its response.
///
/// Implementations complete each call exactly once and never retry. A
/// response with a non-success status is still `Ok`; only failures that
/// produce no status at all are errors.
pub trait Transport: Send + Sync {
    fn send(&self, request: HttpRequest) -> Result<HttpResponse>;
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        (**self).send(request)
    }
}

/// Transport backed by a blocking `ureq` agent.
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    /// Build an agent from the config. Timeouts are only set when configured.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let mut builder = ureq::AgentBuilder::new().user_agent(&config.user_agent);
        if let Some(ms) = config.connect_timeout_ms {
            builder = builder.timeout_connect(Duration::from_millis(ms as u64));
        }
        if let Some(ms) = config.timeout_ms {
            builder = builder.timeout(Duration::from_millis(ms as u64));
        }

        Ok(Self {
            agent: builder.build(),
        })
    }

    fn read_response(response: ureq::Response) -> Result<HttpResponse> {
        let status = response.status();
        let content_type = response.header("Content-Type").map(str::to_string);
        let mut body = Vec::new();
        response.into_reader().read_to_end(&mut body)?;
        Ok(HttpResponse {
            status,
            content_type,
            body,
        })
    }
}

impl Transport for UreqTransport {
    fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        let req = self.agent.request(request.method.as_str(), &request.url);

        let result = match request.body {
            Some(form) if request.method.has_body() => {
                let boundary = Form::new_boundary();
                let body = form.encode(&boundary);
                debug!(
                    target: "praat_client",
                    "{} {} ({} fields, {} bytes)",
                    request.method.as_str(),
                    request.url,
                    form.len(),
                    body.len()
                );
                req.set("Content-Type", &Form::content_type(&boundary))
                    .send_bytes(&body)
            }
            _ => {
                debug!(target: "praat_client", "{} {}", request.method.as_str(), request.url);
                req.call()
            }
        };

        match result {
            Ok(resp) => Self::read_response(resp),
            // ureq reports 4xx/5xx as errors; callers want the status.
            Err(ureq::Error::Status(_, resp)) => Self::read_response(resp),
            Err(ureq::Error::Transport(transport)) => Err(PraatError::Network(format!(
                "{} {}: {}",
                request.method.as_str(),
                request.url,
                transport
            ))),
        }
    }
}
