//! Recording file format
//!
//! Each record is 10 bytes: `[u16_le counter][u64_le frame_index]`, with no
//! header, footer, or checksum. Files are named `<prefix>_YYYYMMDD_HHMMSS.bin`
//! by the recorder, which rotates them every 10 minutes.
//!
//! - Streaming decoder ([`reader`])
//! - Buffered encoder ([`writer`])

pub mod reader;
pub mod writer;

use crate::RECORD_SIZE;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Timestamp layout embedded in recording file names
pub const FILE_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// One counter sample captured by an audio callback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Record {
    /// 16-bit frame counter carried on the counter channel (wraps at 65536)
    pub counter: u16,
    /// Monotonic frame index, used only to label gaps
    pub frame_index: u64,
}

impl Record {
    pub fn new(counter: u16, frame_index: u64) -> Self {
        Self {
            counter,
            frame_index,
        }
    }

    /// Decode a record from its on-disk bytes
    pub fn from_bytes(bytes: &[u8; RECORD_SIZE]) -> Self {
        let [c0, c1, frame @ ..] = *bytes;
        Self {
            counter: u16::from_le_bytes([c0, c1]),
            frame_index: u64::from_le_bytes(frame),
        }
    }

    /// Encode the record into its on-disk bytes
    pub fn to_bytes(&self) -> [u8; RECORD_SIZE] {
        let mut bytes = [0u8; RECORD_SIZE];
        bytes[..2].copy_from_slice(&self.counter.to_le_bytes());
        bytes[2..].copy_from_slice(&self.frame_index.to_le_bytes());
        bytes
    }
}

/// Build a recorder-style file name, e.g. `sent_20260101_120000.bin`
pub fn recording_file_name(prefix: &str, extension: &str, timestamp: NaiveDateTime) -> String {
    format!(
        "{}_{}.{}",
        prefix,
        timestamp.format(FILE_TIMESTAMP_FORMAT),
        extension
    )
}

/// Extract the capture timestamp from a recorder-style file name
///
/// Returns `None` when the name does not follow `<prefix>_YYYYMMDD_HHMMSS.<ext>`.
pub fn parse_file_timestamp(file_name: &str, prefix: &str) -> Option<NaiveDateTime> {
    let rest = file_name.strip_prefix(prefix)?.strip_prefix('_')?;
    let stem = rest.rsplit_once('.').map(|(stem, _)| stem).unwrap_or(rest);
    NaiveDateTime::parse_from_str(stem, FILE_TIMESTAMP_FORMAT).ok()
}
