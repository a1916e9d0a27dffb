//! Item API integration tests
//!
//! Full CRUD lifecycle against a running server.

mod crud;
