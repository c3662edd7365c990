//! Audiotester Verify Core - independent verification of sample loss
//!
//! The audiotester recorder writes every counter value seen by the output
//! callback (`sent_*.bin`) and the input callback (`recv_*.bin`) to disk.
//! This library replays those recordings without touching the live
//! `detect_frame_loss()` path, finds gaps in the 16-bit counter sequence of
//! each direction, and classifies the result into a [`Verdict`].

pub mod analysis;
pub mod config;
pub mod error;
pub mod record;
pub mod report;

pub use analysis::direction::{
    verify_directory, Direction, DirectionAnalyzer, DirectionReport, FileReport,
    VerificationSummary,
};
pub use analysis::gaps::{find_gaps, Gap, GapAnalyzer};
pub use analysis::verdict::{classify, Verdict};
pub use config::VerifyConfig;
pub use error::{Result, VerifyError};
pub use record::{reader::RecordReader, writer::RecordWriter, Record};

/// Application version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date stamped by build.rs (YYYY-MM-DD, UTC)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Size of the counter's modular space (16-bit counter)
pub const COUNTER_MODULUS: u32 = 1 << u16::BITS;

/// Half of the counter space. Forward distances below this are gaps,
/// anything at or above it is a backward jump or wrap artifact.
pub const HALF_RANGE: u16 = (COUNTER_MODULUS / 2) as u16;

/// Bytes per record: `[u16_le counter][u64_le frame_index]`
pub const RECORD_SIZE: usize = 10;

/// Default number of example gaps printed per file
pub const DEFAULT_MAX_EXAMPLES: usize = 10;
