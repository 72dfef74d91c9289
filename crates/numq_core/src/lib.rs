//! Shared number-queue domain primitives.
//!
//! This crate owns deterministic behavior: the message contract, the
//! producer counter, the retry policy, and loop cancellation. It
//! intentionally excludes AWS SDK and async runtime concerns.

pub mod contract;
pub mod counter;
pub mod retry;
pub mod shutdown;
