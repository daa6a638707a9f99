//! Value types exchanged with the Praat service.

use std::fmt;
use std::ops::BitOr;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::PraatError;

/// An immutable audio payload, usually a WAV file.
///
/// Cloning is cheap; the bytes are shared.
#[derive(Clone, PartialEq, Eq)]
pub struct AudioBlob {
    bytes: Arc<[u8]>,
    content_type: Option<String>,
}

impl AudioBlob {
    /// Wrap raw bytes with no declared content type.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        let bytes: Vec<u8> = bytes.into();
        Self {
            bytes: Arc::from(bytes),
            content_type: None,
        }
    }

    /// Attach a MIME type, e.g. `audio/wav`.
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// True if the payload starts with a RIFF/WAVE header.
    pub fn is_wav(&self) -> bool {
        self.bytes.len() >= 12 && &self.bytes[0..4] == b"RIFF" && &self.bytes[8..12] == b"WAVE"
    }

    pub fn to_vec(&self) -> Vec<u8> {
        self.bytes.to_vec()
    }
}

impl fmt::Debug for AudioBlob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AudioBlob")
            .field("len", &self.bytes.len())
            .field("content_type", &self.content_type)
            .finish()
    }
}

impl From<Vec<u8>> for AudioBlob {
    fn from(bytes: Vec<u8>) -> Self {
        AudioBlob::new(bytes)
    }
}

impl AsRef<[u8]> for AudioBlob {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

/// One aligned word: `(word, begin seconds, end seconds)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Timestamp {
    pub word: String,
    pub begin: f64,
    pub end: f64,
}

impl Timestamp {
    pub fn new(word: impl Into<String>, begin: f64, end: f64) -> Self {
        Self {
            word: word.into(),
            begin,
            end,
        }
    }

    /// Length of the word in seconds.
    pub fn duration(&self) -> f64 {
        self.end - self.begin
    }
}

impl<W: Into<String>> From<(W, f64, f64)> for Timestamp {
    fn from((word, begin, end): (W, f64, f64)) -> Self {
        Timestamp::new(word, begin, end)
    }
}

/// Set of properties to carry from source to target speech.
///
/// Combine with `|`:
///
/// ```
/// use praat_client::TransferOptions;
///
/// let opts = TransferOptions::PROSODY | TransferOptions::DURATION;
/// assert_eq!(opts.to_string(), "prosody,duration");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct TransferOptions(u8);

impl TransferOptions {
    pub const NONE: TransferOptions = TransferOptions(0);
    pub const PROSODY: TransferOptions = TransferOptions(0b001);
    pub const INTENSITY: TransferOptions = TransferOptions(0b010);
    pub const DURATION: TransferOptions = TransferOptions(0b100);
    pub const ALL: TransferOptions = TransferOptions(0b111);

    // Wire order is fixed.
    const NAMES: [(TransferOptions, &'static str); 3] = [
        (TransferOptions::PROSODY, "prosody"),
        (TransferOptions::INTENSITY, "intensity"),
        (TransferOptions::DURATION, "duration"),
    ];

    pub fn contains(self, other: TransferOptions) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Parse a comma-separated list such as `"prosody,duration"`.
    pub fn parse(s: &str) -> Result<Self, PraatError> {
        s.split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .try_fold(TransferOptions::NONE, |acc, name| {
                TransferOptions::NAMES
                    .iter()
                    .find(|(_, n)| n.eq_ignore_ascii_case(name))
                    .map(|(flag, _)| acc | *flag)
                    .ok_or_else(|| PraatError::InvalidOption(name.to_string()))
            })
    }
}

impl Default for TransferOptions {
    /// The service's own default: `prosody,duration`.
    fn default() -> Self {
        TransferOptions::PROSODY | TransferOptions::DURATION
    }
}

impl BitOr for TransferOptions {
    type Output = TransferOptions;

    fn bitor(self, rhs: TransferOptions) -> TransferOptions {
        TransferOptions(self.0 | rhs.0)
    }
}

impl fmt::Display for TransferOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = TransferOptions::NAMES
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| *name)
            .collect();
        f.write_str(&names.join(","))
    }
}

impl fmt::Debug for TransferOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TransferOptions({})", self)
    }
}

impl FromStr for TransferOptions {
    type Err = PraatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TransferOptions::parse(s)
    }
}

/// Average pitch as returned by the service, forwarded unparsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AveragePitch {
    raw: String,
}

impl AveragePitch {
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    /// The payload exactly as the service sent it.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Attempt to read the payload as a frequency in Hz.
    ///
    /// Praat prints values like `"182.34 Hz"`; the first token is parsed.
    pub fn hz(&self) -> Option<f64> {
        self.raw.split_whitespace().next()?.parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_audio_blob_shares_bytes() {
        let blob = AudioBlob::new(vec![1u8, 2, 3]).with_content_type("audio/wav");
        let copy = blob.clone();
        assert_eq!(copy.as_bytes(), &[1, 2, 3]);
        assert_eq!(copy.content_type(), Some("audio/wav"));
        assert_eq!(blob, copy);
        assert!(!blob.is_wav());
    }

    #[test]
    fn test_audio_blob_detects_wav() {
        let mut bytes = b"RIFF".to_vec();
        bytes.extend_from_slice(&36u32.to_le_bytes());
        bytes.extend_from_slice(b"WAVE");
        assert!(AudioBlob::new(bytes).is_wav());
    }

    #[test]
    fn test_timestamp_from_tuple() {
        let ts: Timestamp = ("cat", 0.0, 0.5).into();
        assert_eq!(ts, Timestamp::new("cat", 0.0, 0.5));
        assert_eq!(ts.duration(), 0.5);
    }

    #[test]
    fn test_transfer_options_display_order() {
        let opts = TransferOptions::DURATION | TransferOptions::PROSODY;
        assert_eq!(opts.to_string(), "prosody,duration");
        assert_eq!(TransferOptions::ALL.to_string(), "prosody,intensity,duration");
        assert_eq!(TransferOptions::NONE.to_string(), "");
        assert_eq!(TransferOptions::default(), opts);
    }

    #[test]
    fn test_transfer_options_parse() {
        let opts = TransferOptions::parse("prosody,duration").unwrap();
        assert!(opts.contains(TransferOptions::PROSODY));
        assert!(opts.contains(TransferOptions::DURATION));
        assert!(!opts.contains(TransferOptions::INTENSITY));
        assert_eq!(opts.to_string(), "prosody,duration");

        let opts: TransferOptions = " Intensity , ".parse().unwrap();
        assert_eq!(opts, TransferOptions::INTENSITY);
        assert!(TransferOptions::parse("").unwrap().is_empty());
    }

    #[test]
    fn test_transfer_options_rejects_unknown() {
        let err = TransferOptions::parse("prosody,timbre").unwrap_err();
        assert!(matches!(err, PraatError::InvalidOption(ref name) if name == "timbre"));
    }

    #[test]
    fn test_average_pitch() {
        let pitch = AveragePitch::new("182.5 Hz\n");
        assert_eq!(pitch.raw(), "182.5 Hz\n");
        assert_eq!(pitch.hz(), Some(182.5));
        assert_eq!(AveragePitch::new("--undefined--").hz(), None);
    }
}
