//! PostgreSQL store implementations.

pub mod activity;
pub mod file;
pub mod folder;
pub mod share;

pub use activity::PgActivityStore;
pub use file::PgFileStore;
pub use folder::PgFolderStore;
pub use share::PgShareStore;
