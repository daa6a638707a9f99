//! praat-client - Client for a remote Praat speech-processing service.
//!
//! The service performs forced alignment, pitch analysis and prosody,
//! intensity and duration transfer on WAV recordings. This crate fetches
//! the recordings by URL, uploads them as multipart forms to the
//! service's routes and decodes the replies into typed results.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use praat_client::{ClientConfig, PraatClient, TransferOptions};
//!
//! let client = PraatClient::with_config(ClientConfig::new("http://localhost:8080"))?;
//!
//! let src_ts = client.calc_timestamps("http://cdn/native.wav", "the cat sat")?;
//! let tgt_ts = client.calc_timestamps("http://cdn/learner.wav", "the cat sat")?;
//!
//! let wav = client.transfer(
//!     "http://cdn/native.wav",
//!     "http://cdn/learner.wav",
//!     &src_ts,
//!     &tgt_ts,
//!     TransferOptions::PROSODY | TransferOptions::DURATION,
//! )?;
//! ```
//!
//! ## Module Organization
//!
//! - [`client`] - One method per remote operation
//! - [`loader`] - Fetching audio resources
//! - [`form`] - Routes, form fields and the multipart encoding
//! - [`response`] - Decoding replies into [`ServiceReply`] and timestamps
//! - [`transport`] - The HTTP seam ([`Transport`], [`UreqTransport`])
//! - [`config`] - Client configuration
//!
//! ## Logging
//!
//! Diagnostics go through the `log` facade under the `praat_client` target.
//! Install any logger to see them.

pub mod client;
pub mod config;
pub mod error;
pub mod form;
pub mod loader;
pub mod response;
pub mod transport;
pub mod types;

/// Testing utilities (mocks, fixtures)
#[doc(hidden)]
pub mod testing;

pub use client::PraatClient;
pub use config::{ClientConfig, DEFAULT_BASE_URL};
pub use error::{PraatError, Result};
pub use form::{FieldValue, Form, FormField, OperationRequest, Route};
pub use loader::{load_blob, load_pair, load_resource};
pub use response::{parse_alignment, parse_timestamps, ServiceReply};
pub use transport::{HttpRequest, HttpResponse, Method, Transport, UreqTransport};
pub use types::{AudioBlob, AveragePitch, Timestamp, TransferOptions};
