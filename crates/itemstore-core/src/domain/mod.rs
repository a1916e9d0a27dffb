//! Domain entities
//!
//! All domain-level types for Itemstore. The demo keeps a single
//! aggregate: the `Item` resource served by the CRUD API.

mod item;

pub use item::*;
