//! # Parley Harness
//!
//! Resumable batch evaluation harness: drives a knowledge-editing dataset
//! in fixed-size batches through persuader → listener, scores each item on
//! three axes (direct correctness, paraphrase robustness, unrelated-fact
//! locality), and checkpoints the full result sequence after every batch.
//!
//! ## Key Types
//!
//! - [`Runner`] — the batch state machine
//! - [`CheckpointStore`] — durable, wholesale-rewritten run state
//! - [`RunConfig`] — TOML run configuration resolving model identifiers
//! - [`RunCounters`] — the six running-accuracy counters
//!
//! A run is keyed by its (listener, persuader, strategy) triple; re-running
//! with identical parameters resumes from the last persisted batch instead
//! of duplicating work.

pub mod checkpoint;
pub mod config;
pub mod dataset;
pub mod error;
pub mod report;
pub mod runner;
pub mod score;

pub use checkpoint::{CheckpointStore, RunLock};
pub use config::{ModelSpec, RunConfig};
pub use dataset::load_dataset;
pub use error::HarnessError;
pub use report::{collect_summaries, write_csv, FileSummary};
pub use runner::{Runner, RunSummary};
pub use score::{contains_target, RunCounters};
