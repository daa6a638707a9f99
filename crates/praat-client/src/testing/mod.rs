//! Testing utilities for praat-client.
//!
//! Mocks and fixtures for exercising the client without a running Praat
//! service.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use praat_client::testing::{wav_bytes, MockTransport};
//! use praat_client::transport::HttpResponse;
//!
//! let transport = MockTransport::new()
//!     .respond("http://host/a.wav", HttpResponse::new(200, Some("audio/wav"), wav_bytes(160)))
//!     .respond("http://localhost:8080/align", HttpResponse::new(200, Some("text/plain"), "hi 0 0.4"));
//! ```

pub mod fixtures;
pub mod mocks;

pub use fixtures::*;
pub use mocks::*;
