//! # Parley Agents
//!
//! Persuader/Listener agent pairing for persuasion-susceptibility
//! evaluation.
//!
//! The persuader generates "evidence" text arguing that a false fact is
//! true, conditioned on a rhetorical strategy from the catalog; the
//! listener answers probe questions with that evidence in front of it.
//!
//! ## Key Types
//!
//! - [`Persuader`] — generates strategy-conditioned evidence per item
//! - [`Listener`] — extracts a single-entity answer per (question, evidence)
//! - [`strategy_instruction`] — the immutable strategy catalog
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use parley_agents::{Listener, Persuader};
//! use parley_llm::Backend;
//!
//! let persuader = Persuader::new(persuader_backend);
//! let evidence = persuader.produce_evidence(&items, "authority_effect").await?;
//!
//! let listener = Listener::new(listener_backend);
//! let answers = listener.answer(&questions, &evidence).await?;
//! ```

pub mod listener;
pub mod persuader;
pub mod strategy;

pub use listener::Listener;
pub use persuader::Persuader;
pub use strategy::{known_strategies, strategy_instruction};
