//! Repository implementations using SQLite.

mod item_repository;

pub use item_repository::SqliteItemRepository;
