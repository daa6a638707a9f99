//! Decoding of service replies.
//!
//! The service answers every operation with either audio or text, and text
//! in place of audio means something went wrong. [`ServiceReply`] makes that
//! convention explicit at the edge so the rest of the crate deals in tagged
//! values.

use crate::error::{PraatError, Result};
use crate::transport::HttpResponse;
use crate::types::{AudioBlob, Timestamp};

/// Literal prefix the aligner uses to report failures.
const ERROR_MARKER: &str = "Error";

/// A decoded reply body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceReply {
    Audio(AudioBlob),
    Text(String),
}

impl ServiceReply {
    /// Classify a successfully transported response.
    ///
    /// - empty body: `Text("")`
    /// - `audio/*` or `application/octet-stream`: `Audio`
    /// - any other declared type (`text/*`, JSON, XML, ...): `Text`
    /// - no declared type: `Audio` if the body is a RIFF file, else `Text`
    pub fn from_response(response: HttpResponse) -> Self {
        if response.body.is_empty() {
            return ServiceReply::Text(String::new());
        }

        let is_text = match response.content_type.as_deref() {
            Some(ct) => !is_binary_content_type(ct),
            None => !response.body.starts_with(b"RIFF"),
        };

        if is_text {
            ServiceReply::Text(String::from_utf8_lossy(&response.body).into_owned())
        } else {
            let blob = AudioBlob::new(response.body);
            match response.content_type {
                Some(ct) => ServiceReply::Audio(blob.with_content_type(ct)),
                None => ServiceReply::Audio(blob),
            }
        }
    }

    /// Expect audio; text becomes a service-reported error carrying it.
    pub fn into_audio(self) -> Result<AudioBlob> {
        match self {
            ServiceReply::Audio(blob) => Ok(blob),
            ServiceReply::Text(text) => Err(PraatError::ServiceReported(text)),
        }
    }

    /// The reply as text, decoding audio bytes lossily.
    pub fn into_text(self) -> String {
        match self {
            ServiceReply::Text(text) => text,
            ServiceReply::Audio(blob) => String::from_utf8_lossy(blob.as_bytes()).into_owned(),
        }
    }
}

/// Only audio and opaque binary types count as a successful binary reply.
fn is_binary_content_type(content_type: &str) -> bool {
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase();
    mime.starts_with("audio/") || mime == "application/octet-stream"
}

/// Parse an alignment reply into timestamps.
///
/// The reply must be text, must not be blank and must not start with
/// `Error`. Its whitespace-separated tokens group into `word begin end`
/// triples. Nothing is returned unless every triple parses.
pub fn parse_alignment(reply: ServiceReply) -> Result<Vec<Timestamp>> {
    let text = match reply {
        ServiceReply::Text(text) => text,
        ServiceReply::Audio(blob) => {
            return Err(PraatError::MalformedResponse(format!(
                "expected alignment text, got {} bytes of audio",
                blob.len()
            )));
        }
    };

    if text.trim().is_empty() || text.starts_with(ERROR_MARKER) {
        return Err(PraatError::ServiceReported(text));
    }

    parse_timestamps(&text)
}

/// Parse `word begin end word begin end ...` into timestamps.
pub fn parse_timestamps(text: &str) -> Result<Vec<Timestamp>> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    if tokens.len() % 3 != 0 {
        return Err(PraatError::MalformedResponse(format!(
            "expected word/begin/end triples, got {} tokens",
            tokens.len()
        )));
    }

    tokens
        .chunks_exact(3)
        .map(|triple| -> Result<Timestamp> {
            Ok(Timestamp::new(
                triple[0],
                parse_seconds(triple[1])?,
                parse_seconds(triple[2])?,
            ))
        })
        .collect()
}

fn parse_seconds(token: &str) -> Result<f64> {
    token
        .parse::<f64>()
        .map_err(|_| PraatError::MalformedResponse(format!("invalid time value: {:?}", token)))
}

/// Read the integer status codes the word store replies with (`1`, `0`,
/// `-1`, `-2`).
pub fn parse_status_code(text: &str) -> Option<i32> {
    text.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> ServiceReply {
        ServiceReply::Text(s.to_string())
    }

    #[test]
    fn test_classify_text_content_type() {
        let resp = HttpResponse::new(200, Some("text/html;charset=utf-8"), "Error: unknown.");
        assert_eq!(ServiceReply::from_response(resp), text("Error: unknown."));
    }

    #[test]
    fn test_classify_audio_content_type() {
        let resp = HttpResponse::new(200, Some("audio/wav"), vec![0u8, 1, 2]);
        let blob = ServiceReply::from_response(resp).into_audio().unwrap();
        assert_eq!(blob.as_bytes(), &[0, 1, 2]);
        assert_eq!(blob.content_type(), Some("audio/wav"));
    }

    #[test]
    fn test_classify_octet_stream_is_audio() {
        let resp = HttpResponse::new(200, Some("Application/Octet-Stream"), vec![9u8; 4]);
        assert!(matches!(
            ServiceReply::from_response(resp),
            ServiceReply::Audio(_)
        ));
    }

    #[test]
    fn test_structured_text_types_are_not_audio() {
        for ct in [
            "application/json",
            "application/xml",
            "application/problem+json; charset=utf-8",
        ] {
            let resp = HttpResponse::new(200, Some(ct), "{\"error\":\"x\"}");
            let err = ServiceReply::from_response(resp).into_audio().unwrap_err();
            assert!(
                matches!(err, PraatError::ServiceReported(ref p) if p == "{\"error\":\"x\"}"),
                "content type {}",
                ct
            );
        }
    }

    #[test]
    fn test_classify_empty_body_is_text() {
        let resp = HttpResponse::new(200, Some("audio/wav"), Vec::new());
        assert_eq!(ServiceReply::from_response(resp), text(""));
    }

    #[test]
    fn test_classify_without_content_type_sniffs_riff() {
        let resp = HttpResponse::new(200, None, b"RIFF\x24\0\0\0WAVE".to_vec());
        assert!(matches!(
            ServiceReply::from_response(resp),
            ServiceReply::Audio(_)
        ));

        let resp = HttpResponse::new(200, None, "cat 0 1");
        assert_eq!(ServiceReply::from_response(resp), text("cat 0 1"));
    }

    #[test]
    fn test_text_instead_of_audio_is_service_error() {
        let err = text("Error: Synthesis needs both source (srcwav) and target (twav).")
            .into_audio()
            .unwrap_err();
        assert!(matches!(err, PraatError::ServiceReported(ref p) if p.starts_with("Error: Synthesis")));

        let err = text("").into_audio().unwrap_err();
        assert!(matches!(err, PraatError::ServiceReported(ref p) if p.is_empty()));
    }

    #[test]
    fn test_parse_alignment_example() {
        let ts = parse_alignment(text("cat 0.0 0.5 sat 0.5 1.1")).unwrap();
        assert_eq!(
            ts,
            vec![
                Timestamp::new("cat", 0.0, 0.5),
                Timestamp::new("sat", 0.5, 1.1)
            ]
        );
    }

    #[test]
    fn test_parse_alignment_trailing_whitespace() {
        // The aligner terminates every triple with a space.
        let ts = parse_alignment(text("the 0.1 0.3 dog 0.3 0.72 \n")).unwrap();
        assert_eq!(ts.len(), 2);
        assert_eq!(ts[1].word, "dog");
        assert_eq!(ts[1].end, 0.72);
    }

    #[test]
    fn test_parse_alignment_wrong_token_count() {
        let err = parse_alignment(text("cat 0.0 sat 0.5 1.1")).unwrap_err();
        assert!(matches!(err, PraatError::MalformedResponse(ref d) if d.contains("5 tokens")));
    }

    #[test]
    fn test_parse_alignment_bad_float() {
        let err = parse_alignment(text("cat zero 0.5")).unwrap_err();
        assert!(matches!(err, PraatError::MalformedResponse(_)));
    }

    #[test]
    fn test_parse_alignment_error_marker() {
        let err = parse_alignment(text("Error: No word tier.")).unwrap_err();
        assert!(matches!(err, PraatError::ServiceReported(ref p) if p == "Error: No word tier."));
    }

    #[test]
    fn test_parse_alignment_empty() {
        assert!(matches!(
            parse_alignment(text("")),
            Err(PraatError::ServiceReported(_))
        ));
        assert!(matches!(
            parse_alignment(text("  \n")),
            Err(PraatError::ServiceReported(_))
        ));
    }

    #[test]
    fn test_parse_alignment_rejects_audio() {
        let reply = ServiceReply::Audio(AudioBlob::new(vec![1u8, 2]));
        assert!(matches!(
            parse_alignment(reply),
            Err(PraatError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_parse_status_code() {
        assert_eq!(parse_status_code("1"), Some(1));
        assert_eq!(parse_status_code(" -2\n"), Some(-2));
        assert_eq!(parse_status_code("ok"), None);
    }

    #[test]
    fn test_into_text_decodes_audio() {
        let reply = ServiceReply::Audio(AudioBlob::new(b"181.2".to_vec()));
        assert_eq!(reply.into_text(), "181.2");
    }
}
