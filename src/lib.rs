//! Content editing core of the Folio admin console.
//!
//! Page sections store their layout as JSON text in a `content` field. This
//! crate decodes that text into typed editors, validates it, and talks to
//! the blog API to list, save and reorder sections.

pub mod commands;
pub mod config;
pub mod content;
pub mod editors;
mod error;
pub mod logger;
pub mod models;
pub mod ordering;
pub mod repository;

pub use error::{ConsoleError, Result};
