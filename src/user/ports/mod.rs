//! Port contracts for the user directory.

pub mod directory;

pub use directory::{UserDirectory, UserDirectoryError, UserDirectoryResult};
