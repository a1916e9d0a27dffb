//! HTTP middleware integration tests
//!
//! Tests for request correlation and request logging over a real socket.

mod correlation;
