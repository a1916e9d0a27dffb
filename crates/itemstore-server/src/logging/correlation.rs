//! Request correlation identifiers.
//!
//! Each in-flight request carries a `RequestId` in tokio task-local
//! storage, so any code running within that request's task can read it
//! without parameter threading. Task-locals are scoped per logical
//! request: concurrent requests never observe each other's id, and the
//! binding is released when the scoped future completes or is dropped
//! (including cancellation).
//!
//! Task-local variables are not inherited by `tokio::spawn`ed tasks; use
//! [`RequestId::scope`] explicitly when handing work to a new task.

use std::fmt;
use std::future::Future;

use uuid::Uuid;

tokio::task_local! {
    static REQUEST_ID: RequestId;
}

/// Per-request correlation identifier.
///
/// Opaque string, unique per inbound request, immutable once assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(String);

impl RequestId {
    /// Adopt a non-empty provided id, or generate a fresh one.
    ///
    /// Generated ids are UUID v4 rendered as 32 lowercase hex characters.
    pub fn establish(provided: Option<&str>) -> Self {
        match provided {
            Some(id) if !id.is_empty() => Self(id.to_string()),
            _ => Self(Uuid::new_v4().simple().to_string()),
        }
    }

    /// The id bound to the current task scope, if any.
    ///
    /// Returns `None` outside any request scope (e.g. background tasks).
    pub fn current() -> Option<Self> {
        REQUEST_ID.try_with(|id| id.clone()).ok()
    }

    /// Execute the provided future with `request_id` bound to its scope.
    pub async fn scope<Fut>(request_id: RequestId, fut: Fut) -> Fut::Output
    where
        Fut: Future,
    {
        REQUEST_ID.scope(request_id, fut).await
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
