//! Audiotester Verify - independent sample-loss verification
//!
//! This library re-exports the record decoding, gap analysis, and verdict
//! functionality from `audiotester-verify-core`. The `verify-loss` binary
//! drives it from the command line.

pub use audiotester_verify_core::analysis;
pub use audiotester_verify_core::config;
pub use audiotester_verify_core::record;
pub use audiotester_verify_core::report;

pub use audiotester_verify_core::{
    classify, find_gaps, verify_directory, Direction, DirectionReport, FileReport, Gap,
    GapAnalyzer, Record, RecordReader, RecordWriter, Verdict, VerificationSummary, VerifyConfig,
    VerifyError,
};
pub use audiotester_verify_core::{BUILD_DATE, HALF_RANGE, RECORD_SIZE, VERSION};
