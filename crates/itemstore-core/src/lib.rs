//! # Itemstore Core Library
//!
//! Domain entities and data-access traits for Itemstore.
//!
//! ## Modules
//!
//! - `domain` - Core entities (Item)
//! - `repository` - Data access traits

pub mod domain;
pub mod repository;

// Re-export commonly used types
pub use domain::*;
pub use repository::*;
