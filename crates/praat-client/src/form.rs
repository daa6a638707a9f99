//! Request assembly: routes, form fields and the multipart wire encoding.
//!
//! Field names are a contract with the service. They are matched against the
//! keyword arguments of the remote handlers, so a misnamed field is silently
//! treated as missing on the other side.

use std::fmt::Write as _;

use uuid::Uuid;

use crate::error::{PraatError, Result};
use crate::types::{AudioBlob, Timestamp};

/// Content type sent for blob parts that do not declare one.
const DEFAULT_BLOB_CONTENT_TYPE: &str = "application/octet-stream";

/// Filename attached to blob parts. Browsers send `blob` for unnamed Blobs
/// and the service does not look at it.
const BLOB_FILENAME: &str = "blob";

/// A named operation on the Praat service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Align,
    AveragePitch,
    ProsodicSynthesis,
    IntensitySynthesis,
    DurationSynthesis,
    Synthesize,
    Echo,
    StoreWord,
    RecallWord,
}

impl Route {
    /// Path relative to the service base address.
    pub fn path(self) -> &'static str {
        match self {
            Route::Align => "align",
            Route::AveragePitch => "avgpitch",
            Route::ProsodicSynthesis => "prosodicsynthesis",
            Route::IntensitySynthesis => "intensitysynthesis",
            Route::DurationSynthesis => "durationsynthesis",
            Route::Synthesize => "synthesize",
            Route::Echo => "echo",
            Route::StoreWord => "db/store",
            Route::RecallWord => "db/get",
        }
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}

/// Value of one form field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Blob(AudioBlob),
    Text(String),
    Timestamps(Vec<Timestamp>),
}

impl From<AudioBlob> for FieldValue {
    fn from(blob: AudioBlob) -> Self {
        FieldValue::Blob(blob)
    }
}

impl From<String> for FieldValue {
    fn from(text: String) -> Self {
        FieldValue::Text(text)
    }
}

impl From<&str> for FieldValue {
    fn from(text: &str) -> Self {
        FieldValue::Text(text.to_string())
    }
}

impl From<Vec<Timestamp>> for FieldValue {
    fn from(timestamps: Vec<Timestamp>) -> Self {
        FieldValue::Timestamps(timestamps)
    }
}

impl From<&[Timestamp]> for FieldValue {
    fn from(timestamps: &[Timestamp]) -> Self {
        FieldValue::Timestamps(timestamps.to_vec())
    }
}

/// A named form field.
#[derive(Debug, Clone, PartialEq)]
pub struct FormField {
    pub name: String,
    pub value: FieldValue,
}

/// An ordered multipart form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Form {
    fields: Vec<FormField>,
}

impl Form {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a form from `(name, value)` pairs, keeping their order.
    pub fn build<N, V, I>(fields: I) -> Self
    where
        I: IntoIterator<Item = (N, V)>,
        N: Into<String>,
        V: Into<FieldValue>,
    {
        let mut form = Form::new();
        for (name, value) in fields {
            form.push(name, value);
        }
        form
    }

    /// Append a field. Duplicate names are kept as separate parts.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.push(FormField {
            name: name.into(),
            value: value.into(),
        });
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.push(name, value);
        self
    }

    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|field| field.name == name)
            .map(|field| &field.value)
    }

    /// Reject forms carrying an empty audio blob.
    ///
    /// The service would accept such a request and fail deep inside Praat,
    /// so this is checked before anything is sent.
    pub fn validate(&self) -> Result<()> {
        for field in &self.fields {
            if let FieldValue::Blob(blob) = &field.value {
                if blob.is_empty() {
                    return Err(PraatError::MissingField(field.name.clone()));
                }
            }
        }
        Ok(())
    }

    /// A fresh multipart boundary.
    pub fn new_boundary() -> String {
        format!("----praat-client-{}", Uuid::new_v4().simple())
    }

    /// `Content-Type` header value for a body encoded with `boundary`.
    pub fn content_type(boundary: &str) -> String {
        format!("multipart/form-data; boundary={}", boundary)
    }

    /// Encode the form as a `multipart/form-data` body.
    ///
    /// The exact bytes are pinned by `test_encode_multipart_body`; a
    /// transport with its own multipart builder must reproduce them.
    pub fn encode(&self, boundary: &str) -> Vec<u8> {
        let mut body = Vec::new();

        for field in &self.fields {
            body.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
            match &field.value {
                FieldValue::Blob(blob) => {
                    let content_type = blob.content_type().unwrap_or(DEFAULT_BLOB_CONTENT_TYPE);
                    body.extend_from_slice(
                        format!(
                            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n\
                             Content-Type: {}\r\n\r\n",
                            escape_quotes(&field.name),
                            BLOB_FILENAME,
                            content_type
                        )
                        .as_bytes(),
                    );
                    body.extend_from_slice(blob.as_bytes());
                }
                FieldValue::Text(text) => {
                    write_text_part(&mut body, &field.name, text);
                }
                FieldValue::Timestamps(timestamps) => {
                    write_text_part(&mut body, &field.name, &encode_timestamps(timestamps));
                }
            }
            body.extend_from_slice(b"\r\n");
        }

        body.extend_from_slice(format!("--{}--\r\n", boundary).as_bytes());
        body
    }
}

/// A form addressed to a route.
#[derive(Debug, Clone, PartialEq)]
pub struct OperationRequest {
    pub route: Route,
    pub form: Form,
}

impl OperationRequest {
    pub fn new(route: Route, form: Form) -> Self {
        Self { route, form }
    }
}

/// Flatten timestamps the way the service reads them back:
/// `word,begin,end,word,begin,end,...`.
pub fn encode_timestamps(timestamps: &[Timestamp]) -> String {
    let mut out = String::new();
    for (i, ts) in timestamps.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        // f64 Display is the shortest round-trip form, so 0.0 prints as "0".
        let _ = write!(out, "{},{},{}", ts.word, ts.begin, ts.end);
    }
    out
}

fn write_text_part(body: &mut Vec<u8>, name: &str, text: &str) {
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{}\"\r\n\r\n",
            escape_quotes(name)
        )
        .as_bytes(),
    );
    body.extend_from_slice(text.as_bytes());
}

fn escape_quotes(name: &str) -> String {
    name.replace('"', "%22")
}
