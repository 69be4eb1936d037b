//! Driver runtime: error taxonomy, collaborator seams, and the script
//! bridge.
//!
//! This crate owns everything between the pure script text of
//! `cefd-protocol` and the facades in the core crate: the shared [`Error`]
//! taxonomy, the [`ScriptHost`]/[`InputSynthesizer`] traits the embedding
//! host implements, the typed [`ScriptResult`] decoding, and the
//! [`ScriptBridge`] that enforces the one-evaluation-in-flight discipline.

pub mod bridge;
pub mod error;
pub mod result;
pub mod transport;

pub use bridge::ScriptBridge;
pub use error::{Error, Result};
pub use result::ScriptResult;
pub use transport::{InputSynthesizer, ScriptHost};
