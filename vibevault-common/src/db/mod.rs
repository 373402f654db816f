//! Database initialization for the persistent store

pub mod init;

pub use init::*;
