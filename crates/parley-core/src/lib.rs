//! # Parley Core
//!
//! Core types for the parley evaluation harness:
//! - [`KnowledgeItem`] — one knowledge-editing probe from the dataset
//! - [`EvaluationResult`] — one scored record in a run's checkpoint

pub mod knowledge;
pub mod result;

pub use knowledge::KnowledgeItem;
pub use result::EvaluationResult;
