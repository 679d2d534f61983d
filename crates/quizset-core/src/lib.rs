//! quizset-core: question selection, score ledger, and session model.
//!
//! This crate defines the value types, the difficulty-budgeted selection
//! algorithm, and the append-only score ledger that the quizset CLI builds on.

pub mod bank;
pub mod config;
pub mod error;
pub mod ledger;
pub mod model;
pub mod parser;
pub mod selection;
pub mod session;
pub mod statistics;
pub mod store;
pub mod traits;

pub use error::QuizError;
