//! Consumers of operation start/finish notifications.

use std::sync::{Mutex, PoisonError};

use super::descriptor::OperationDescriptor;
use super::record::{OperationId, OperationRecord};

/// Receives operation notifications. Called synchronously on the thread
/// running the operation, so implementations must be cheap and thread-safe.
pub trait OperationListener: Send + Sync {
    fn started(
        &self,
        _id: OperationId,
        _parent_id: Option<OperationId>,
        _descriptor: &OperationDescriptor,
    ) {
    }

    fn finished(&self, record: &OperationRecord);
}

/// Keeps every notification in memory. Used by tests and for end-of-run summaries.
#[derive(Debug, Default)]
pub struct RecordingListener {
    started: Mutex<Vec<OperationId>>,
    finished: Mutex<Vec<OperationRecord>>,
}

impl RecordingListener {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ids of operations that have started, in start order.
    pub fn started(&self) -> Vec<OperationId> {
        self.started
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Finished records, in finish order.
    pub fn records(&self) -> Vec<OperationRecord> {
        self.finished
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Ids that started but never finished.
    pub fn open(&self) -> Vec<OperationId> {
        let finished = self.records();
        self.started()
            .into_iter()
            .filter(|id| !finished.iter().any(|r| r.id == *id))
            .collect()
    }

    pub fn clear(&self) {
        self.started
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
        self.finished
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl OperationListener for RecordingListener {
    fn started(
        &self,
        id: OperationId,
        _parent_id: Option<OperationId>,
        _descriptor: &OperationDescriptor,
    ) {
        self.started
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(id);
    }

    fn finished(&self, record: &OperationRecord) {
        self.finished
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(record.clone());
    }
}

/// Logs operations through `tracing` (debug on start, info/warn on finish).
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingListener;

impl OperationListener for TracingListener {
    fn started(
        &self,
        id: OperationId,
        parent_id: Option<OperationId>,
        descriptor: &OperationDescriptor,
    ) {
        tracing::debug!(
            id = id.get(),
            parent = parent_id.map(OperationId::get),
            details = %descriptor.details,
            "started {}",
            descriptor.display_name
        );
    }

    fn finished(&self, record: &OperationRecord) {
        let elapsed_ms = record.duration.as_millis() as u64;
        match &record.failure {
            None => tracing::info!(
                id = record.id.get(),
                elapsed_ms,
                result = record.result.as_ref().map(tracing::field::display),
                "finished {}",
                record.descriptor.display_name
            ),
            Some(failure) => tracing::warn!(
                id = record.id.get(),
                elapsed_ms,
                "failed {}: {}",
                record.descriptor.display_name,
                failure
            ),
        }
    }
}
