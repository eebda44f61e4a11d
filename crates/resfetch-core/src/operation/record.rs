//! Terminal record of a finished operation.

use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use super::descriptor::OperationDescriptor;

/// Process-unique operation identifier. Allocation order matches open order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct OperationId(u64);

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

impl OperationId {
    pub(crate) fn next() -> Self {
        OperationId(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for OperationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Everything known about an operation once its scope has closed.
#[derive(Debug, Clone)]
pub struct OperationRecord {
    pub id: OperationId,
    /// Operation that was open on the same thread when this one started.
    pub parent_id: Option<OperationId>,
    pub descriptor: OperationDescriptor,
    pub started_at: SystemTime,
    pub duration: Duration,
    pub status: Option<String>,
    /// Structured result set by the body, if any.
    pub result: Option<Value>,
    /// Display text of the failure, if the body failed or panicked.
    pub failure: Option<String>,
}

impl OperationRecord {
    pub fn succeeded(&self) -> bool {
        self.failure.is_none()
    }

    /// Integer field of the structured result (e.g. `bytesRead`).
    pub fn result_u64(&self, field: &str) -> Option<u64> {
        self.result.as_ref()?.get(field)?.as_u64()
    }

    /// String field of the structured details (e.g. `location`).
    pub fn detail_str(&self, field: &str) -> Option<&str> {
        self.descriptor.details.get(field)?.as_str()
    }

    pub(crate) fn started_at_ms(&self) -> u64 {
        self.started_at
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }
}
