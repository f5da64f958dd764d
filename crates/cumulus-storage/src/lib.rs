//! # cumulus-storage
//!
//! Blob storage providers for Cumulus. The hierarchy layer addresses blobs
//! only through opaque ids; providers exist for the local filesystem, for
//! process memory (tests), and for S3-compatible object stores behind the
//! `s3` feature.

pub mod gateway;
pub mod providers;

pub use gateway::BlobGateway;
