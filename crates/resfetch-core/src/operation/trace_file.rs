//! JSON-lines operation trace written to a file.
//!
//! One object per finished operation, in finish order:
//! `{"id":3,"parentId":null,"displayName":"Download ...","details":{...},"result":{...}}`.

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use super::listener::OperationListener;
use super::record::{OperationId, OperationRecord};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TraceEntry<'a> {
    id: OperationId,
    parent_id: Option<OperationId>,
    display_name: &'a str,
    progress_display_name: Option<&'a str>,
    details: &'a Value,
    started_at_ms: u64,
    duration_ms: u64,
    status: Option<&'a str>,
    result: Option<&'a Value>,
    failure: Option<&'a str>,
}

impl<'a> From<&'a OperationRecord> for TraceEntry<'a> {
    fn from(r: &'a OperationRecord) -> Self {
        TraceEntry {
            id: r.id,
            parent_id: r.parent_id,
            display_name: &r.descriptor.display_name,
            progress_display_name: r.descriptor.progress_display_name.as_deref(),
            details: &r.descriptor.details,
            started_at_ms: r.started_at_ms(),
            duration_ms: r.duration.as_millis() as u64,
            status: r.status.as_deref(),
            result: r.result.as_ref(),
            failure: r.failure.as_deref(),
        }
    }
}

/// Appends finished operations to a trace file. Write failures are logged
/// and otherwise ignored so tracing never fails a transfer.
pub struct TraceFileListener {
    path: PathBuf,
    out: Mutex<BufWriter<File>>,
}

impl TraceFileListener {
    /// Open the trace file for appending, creating it and its parent directories.
    pub fn create(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("create trace dir {}", parent.display()))?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("open trace file {}", path.display()))?;
        Ok(Self {
            path: path.to_path_buf(),
            out: Mutex::new(BufWriter::new(file)),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl OperationListener for TraceFileListener {
    fn finished(&self, record: &OperationRecord) {
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        let written = serde_json::to_writer(&mut *out, &TraceEntry::from(record))
            .map_err(std::io::Error::from)
            .and_then(|()| out.write_all(b"\n"))
            .and_then(|()| out.flush());
        if let Err(e) = written {
            tracing::warn!("could not write trace {}: {}", self.path.display(), e);
        }
    }
}
