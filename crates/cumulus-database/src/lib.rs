//! # cumulus-database
//!
//! The collection-store seam of Cumulus: one trait per collection
//! (folders, files, shares, activities) with a PostgreSQL implementation
//! for production and an in-memory implementation for tests and local
//! development, selected at construction time.

pub mod connection;
pub mod memory;
pub mod postgres;
pub mod stores;

pub use connection::DatabasePool;
pub use stores::{ActivityStore, FileStore, FolderStore, ShareStore, Stores};
