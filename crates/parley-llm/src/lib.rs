//! # Parley LLM
//!
//! Model invocation backends for parley agents.
//!
//! ## Supported Backends
//!
//! | Backend | Type | Retry |
//! |---------|------|-------|
//! | Local | HTTP to a local inference server | None (failures abort) |
//! | Remote | OpenAI-compatible chat API | Bounded, fixed backoff |
//! | Mock | Testing | n/a |
//!
//! All backends sit behind the closed [`Backend`] enum and its single
//! `generate` contract: one output per input prompt, order preserved.
//! Adding a backend means adding a variant and an adapter module.
//!
//! ## Quick Start
//!
//! ```rust
//! use parley_llm::{Backend, MockBackend};
//!
//! #[tokio::main]
//! async fn main() {
//!     let backend = Backend::Mock(MockBackend::constant("Zurich"));
//!     let out = backend
//!         .generate(&["Capital of X?".into()], &["Answer briefly.".into()], 8)
//!         .await
//!         .unwrap();
//!     assert_eq!(out, vec!["Zurich".to_string()]);
//! }
//! ```

pub mod backend;
pub mod local;
pub mod mock;
pub mod remote;
pub mod retry;

pub use backend::{Backend, GenError};
pub use local::LocalBackend;
pub use mock::MockBackend;
pub use remote::RemoteBackend;
pub use retry::RetryPolicy;
