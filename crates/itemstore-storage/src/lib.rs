//! Itemstore Storage Layer
//!
//! SQLite persistence for the item resource.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │               Application                │
//! ├──────────────────────────────────────────┤
//! │            Repository Traits             │
//! │             (ItemRepository)             │
//! ├──────────────────────────────────────────┤
//! │         SQLite Implementations           │
//! │          (SqliteItemRepository)          │
//! ├──────────────────────────────────────────┤
//! │                Database                  │
//! │                (SQLite)                  │
//! └──────────────────────────────────────────┘
//! ```

mod database;
mod repositories;

pub use database::Database;
pub use repositories::*;

/// Default database file name.
pub const DATABASE_FILE: &str = "itemstore.db";
