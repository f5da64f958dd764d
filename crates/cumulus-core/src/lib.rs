//! # cumulus-core
//!
//! Core crate for Cumulus. Contains configuration schemas, shared types,
//! the blob-store trait, and the unified error system.
//!
//! This crate has **no** internal dependencies on other Cumulus crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
