//! Loss analysis over decoded recordings
//!
//! - Forward-gap detection in the wrapping counter ([`gaps`])
//! - Per-direction aggregation across rotated files ([`direction`])
//! - Final sent/received classification ([`verdict`])

pub mod direction;
pub mod gaps;
pub mod verdict;
