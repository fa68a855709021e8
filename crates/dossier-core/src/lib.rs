//! Core domain types and logic for the dossier document review service.
//!
//! Everything in this crate is pure: no I/O, no HTTP, no persistence. The
//! filter engine, status workflow, and selection tracking operate on plain
//! values and are consumed by the db/services/api crates.

pub mod config;
pub mod constants;
pub mod error;
pub mod filter;
pub mod models;
pub mod selection;
pub mod validation;
pub mod workflow;

pub use config::Config;
pub use error::AppError;
