//! # Itemstore Server
//!
//! Demo HTTP application scaffold built on axum.
//!
//! ## Modules
//!
//! - `settings` - Application settings from environment / `.env` files
//! - `logging` - Structured logging pipeline with request correlation and
//!   rotating file sinks
//! - `server` - HTTP server, middleware, and item CRUD handlers

pub mod logging;
pub mod server;
pub mod settings;
