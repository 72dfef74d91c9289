//! AWS-oriented adapters and loop handlers for the number-queue pair.
//!
//! This crate owns runtime integration details (the queue capability trait,
//! file sink, loop pacing, and the producer/consumer loops) and ships the
//! two process binaries. Deterministic primitives live in `numq_core`.

pub mod adapters;
pub mod handlers;
