//! # VibeVault Common Library
//!
//! Shared code for the VibeVault service and its clients:
//! - Media item model and input validation
//! - Library filter engine, vibe tag editor and mood matcher
//! - Media store contract with memory and SQLite backends
//! - Client-side query cache, session capability and navigation shell
//! - Configuration loading

pub mod cache;
pub mod client;
pub mod config;
#[cfg(feature = "sqlx")]
pub mod db;
pub mod error;
pub mod finder;
pub mod library;
pub mod model;
pub mod session;
pub mod shell;
pub mod stats;
pub mod store;
pub mod tags;

pub use error::{Error, Result};
pub use model::{MediaItem, MediaPatch, MediaStatus, MediaType, NewMedia, UserId};
pub use store::MediaStore;
