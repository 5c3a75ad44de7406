//! quizkit-store — Durable per-question performance ledger.
//!
//! This crate holds the best-effort attempt history a quiz page keeps for its
//! visitor: how often each question was answered, how often correctly, and
//! the current run of consecutive results. It has no knowledge of the quiz
//! engine; the engine consumes it to compute weak-question hints and
//! "previously incorrect" review sets.

pub mod backend;
pub mod entry;
pub mod store;

pub use backend::{FileStore, KeyValueStore, MemoryStore, StoreError};
pub use entry::{LastResult, Ledger, PerformanceEntry};
pub use store::{PerformanceStore, STORAGE_KEY};
