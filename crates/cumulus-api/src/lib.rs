//! # cumulus-api
//!
//! HTTP API layer for Cumulus. Thin glue: handlers translate between JSON
//! and the service layer; every decision about ownership, paths, shares,
//! and auditing is made below this crate.

pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod router;
pub mod state;

pub use error::ApiError;
pub use router::build_router;
pub use state::AppState;
