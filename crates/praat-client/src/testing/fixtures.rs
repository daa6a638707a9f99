//! Test fixtures for common inputs and replies.

use crate::types::Timestamp;

/// Sample rate of generated WAV fixtures.
pub const FIXTURE_SAMPLE_RATE: u32 = 16000;

/// A 16-bit mono PCM WAV file of `num_samples` samples of silence.
pub fn wav_bytes(num_samples: usize) -> Vec<u8> {
    wav_from_samples(&vec![0i16; num_samples], FIXTURE_SAMPLE_RATE)
}

/// Encode samples as a 16-bit mono PCM WAV file.
pub fn wav_from_samples(samples: &[i16], sample_rate: u32) -> Vec<u8> {
    let data_size = (samples.len() * 2) as u32;
    let mut bytes = Vec::with_capacity(44 + data_size as usize);

    // RIFF header
    bytes.extend_from_slice(b"RIFF");
    bytes.extend_from_slice(&(36 + data_size).to_le_bytes());
    bytes.extend_from_slice(b"WAVE");

    // fmt chunk
    bytes.extend_from_slice(b"fmt ");
    bytes.extend_from_slice(&16u32.to_le_bytes()); // Chunk size
    bytes.extend_from_slice(&1u16.to_le_bytes()); // PCM
    bytes.extend_from_slice(&1u16.to_le_bytes()); // Mono
    bytes.extend_from_slice(&sample_rate.to_le_bytes());
    bytes.extend_from_slice(&(sample_rate * 2).to_le_bytes()); // Byte rate
    bytes.extend_from_slice(&2u16.to_le_bytes()); // Block align
    bytes.extend_from_slice(&16u16.to_le_bytes()); // Bits per sample

    // data chunk
    bytes.extend_from_slice(b"data");
    bytes.extend_from_slice(&data_size.to_le_bytes());
    for sample in samples {
        bytes.extend_from_slice(&sample.to_le_bytes());
    }

    bytes
}

/// Timestamps for the transcript "cat sat".
pub fn cat_sat_timestamps() -> Vec<Timestamp> {
    vec![
        Timestamp::new("cat", 0.0, 0.5),
        Timestamp::new("sat", 0.5, 1.1),
    ]
}

/// Render timestamps the way the aligner prints them: `word begin end `
/// for each word.
pub fn alignment_reply(timestamps: &[Timestamp]) -> String {
    timestamps
        .iter()
        .map(|ts| format!("{} {} {} ", ts.word, ts.begin, ts.end))
        .collect()
}
