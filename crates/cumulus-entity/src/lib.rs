//! # cumulus-entity
//!
//! Domain entity models for Cumulus. Every struct in this crate represents
//! a database collection row or a domain value object. All entities derive
//! `Debug`, `Clone`, `Serialize`, `Deserialize`, and database entities
//! additionally derive `sqlx::FromRow`.

pub mod activity;
pub mod file;
pub mod folder;
pub mod resource;
pub mod share;

pub use resource::{Owned, Resource, ResourceType};
