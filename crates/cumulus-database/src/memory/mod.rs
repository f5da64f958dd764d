//! In-memory store implementations.
//!
//! Rows live in process-local vectors in insertion order; newest-first
//! listings iterate in reverse. Used by the test suite and the
//! `database.provider = "memory"` development mode.

pub mod activity;
pub mod file;
pub mod folder;
pub mod share;

pub use activity::MemoryActivityStore;
pub use file::MemoryFileStore;
pub use folder::MemoryFolderStore;
pub use share::MemoryShareStore;
