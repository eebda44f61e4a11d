//! Shared state for one CLI invocation: transports plus the operation runner.

use anyhow::{anyhow, Context, Result};
use resfetch_core::config::ResfetchConfig;
use resfetch_core::operation::{
    DefaultOperationRunner, OperationListener, OperationRecord, TraceFileListener,
    TracingListener,
};
use resfetch_core::resource::{
    AnyResource, ExternalResourceName, InstrumentedResource, ResourceConnector,
};
use std::path::Path;
use std::sync::Arc;
use url::Url;

/// Prints `Download <short name>: <n> bytes` on stderr as each read finishes.
pub struct ConsoleProgress;

impl ConsoleProgress {
    pub fn line(record: &OperationRecord) -> String {
        let name = record
            .descriptor
            .progress_display_name
            .as_deref()
            .unwrap_or(&record.descriptor.display_name);
        match &record.failure {
            Some(failure) => format!("Download {name}: failed ({failure})"),
            None => format!(
                "Download {name}: {} bytes",
                record.result_u64("bytesRead").unwrap_or(0)
            ),
        }
    }
}

impl OperationListener for ConsoleProgress {
    fn finished(&self, record: &OperationRecord) {
        eprintln!("{}", Self::line(record));
    }
}

pub struct Session {
    connector: ResourceConnector,
    runner: DefaultOperationRunner,
}

impl Session {
    /// `trace_file` takes precedence over the one in `cfg`.
    pub fn new(cfg: &ResfetchConfig, trace_file: Option<&Path>, quiet: bool) -> Result<Self> {
        let mut runner = DefaultOperationRunner::new().with_listener(Arc::new(TracingListener));
        if !quiet {
            runner = runner.with_listener(Arc::new(ConsoleProgress));
        }
        if let Some(path) = trace_file.or(cfg.trace_file.as_deref()) {
            runner = runner.with_listener(Arc::new(TraceFileListener::create(path)?));
            tracing::debug!(path = %path.display(), "writing operation trace");
        }
        Ok(Self {
            connector: ResourceConnector::new(cfg.http_options()),
            runner,
        })
    }

    pub fn open(
        &self,
        arg: &str,
    ) -> Result<InstrumentedResource<AnyResource, &DefaultOperationRunner>> {
        let name = resource_name(arg)?;
        Ok(self.connector.open_instrumented(&name, &self.runner)?)
    }
}

/// Parses `arg` as a URI, or as a local path when it has no usable scheme.
pub fn resource_name(arg: &str) -> Result<ExternalResourceName> {
    match Url::parse(arg) {
        // Single-letter schemes are Windows drive letters, not URIs.
        Ok(url) if url.scheme().len() > 1 => Ok(ExternalResourceName::new(url)),
        _ => {
            let path = Path::new(arg);
            let absolute = if path.is_absolute() {
                path.to_path_buf()
            } else {
                std::env::current_dir()
                    .context("resolve current directory")?
                    .join(path)
            };
            let url = Url::from_file_path(&absolute)
                .map_err(|()| anyhow!("not a URI or local path: {arg}"))?;
            Ok(ExternalResourceName::new(url))
        }
    }
}
