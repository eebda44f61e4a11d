//! Runs bodies inside operation scopes and notifies listeners.

use std::cell::Cell;
use std::fmt;
use std::sync::Arc;
use std::time::{Instant, SystemTime};

use super::context::OperationContext;
use super::descriptor::OperationDescriptor;
use super::listener::OperationListener;
use super::record::{OperationId, OperationRecord};

/// Runs a unit of work inside an operation scope.
///
/// Implementations open the scope before calling `body`, let the body attach
/// a result through the [`OperationContext`], and close the scope exactly once
/// whether the body returns `Ok`, returns `Err` or unwinds. The body's return
/// value, including any error, is handed back unchanged.
pub trait OperationRunner: Send + Sync {
    fn call<T, E, F>(&self, descriptor: OperationDescriptor, body: F) -> Result<T, E>
    where
        F: FnOnce(&mut OperationContext) -> Result<T, E>,
        E: fmt::Display;
}

impl<X: OperationRunner> OperationRunner for Arc<X> {
    fn call<T, E, F>(&self, descriptor: OperationDescriptor, body: F) -> Result<T, E>
    where
        F: FnOnce(&mut OperationContext) -> Result<T, E>,
        E: fmt::Display,
    {
        (**self).call(descriptor, body)
    }
}

impl<X: OperationRunner> OperationRunner for &X {
    fn call<T, E, F>(&self, descriptor: OperationDescriptor, body: F) -> Result<T, E>
    where
        F: FnOnce(&mut OperationContext) -> Result<T, E>,
        E: fmt::Display,
    {
        (**self).call(descriptor, body)
    }
}

thread_local! {
    static CURRENT: Cell<Option<OperationId>> = const { Cell::new(None) };
}

/// Operation open on the calling thread, if any.
pub fn current_operation() -> Option<OperationId> {
    CURRENT.with(Cell::get)
}

/// Runner that broadcasts every scope to a fixed list of listeners.
#[derive(Default, Clone)]
pub struct DefaultOperationRunner {
    listeners: Vec<Arc<dyn OperationListener>>,
}

impl DefaultOperationRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_listener(mut self, listener: Arc<dyn OperationListener>) -> Self {
        self.listeners.push(listener);
        self
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl fmt::Debug for DefaultOperationRunner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DefaultOperationRunner")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl OperationRunner for DefaultOperationRunner {
    fn call<T, E, F>(&self, descriptor: OperationDescriptor, body: F) -> Result<T, E>
    where
        F: FnOnce(&mut OperationContext) -> Result<T, E>,
        E: fmt::Display,
    {
        let id = OperationId::next();
        let span = tracing::debug_span!(
            "operation",
            id = id.get(),
            name = %descriptor.display_name
        );
        let _entered = span.enter();

        // Drop restores CURRENT, even if a listener panics below.
        let mut scope = Scope {
            listeners: &self.listeners,
            id,
            parent_id: CURRENT.with(|current| current.replace(Some(id))),
            descriptor: Some(descriptor),
            started_at: SystemTime::now(),
            started: Instant::now(),
            context: OperationContext::default(),
        };
        if let Some(descriptor) = &scope.descriptor {
            for listener in scope.listeners {
                listener.started(id, scope.parent_id, descriptor);
            }
        }

        let outcome = body(&mut scope.context);
        if let Err(e) = &outcome {
            scope.context.failed(e.to_string());
        }
        drop(scope);
        outcome
    }
}

/// Closes the scope on drop, so unwinding bodies are still recorded.
struct Scope<'a> {
    listeners: &'a [Arc<dyn OperationListener>],
    id: OperationId,
    parent_id: Option<OperationId>,
    descriptor: Option<OperationDescriptor>,
    started_at: SystemTime,
    started: Instant,
    context: OperationContext,
}

impl Drop for Scope<'_> {
    fn drop(&mut self) {
        CURRENT.with(|current| current.set(self.parent_id));

        let Some(descriptor) = self.descriptor.take() else {
            return;
        };
        let mut failure = self.context.failure.take();
        if failure.is_none() && std::thread::panicking() {
            failure = Some("operation panicked".to_string());
        }
        let record = OperationRecord {
            id: self.id,
            parent_id: self.parent_id,
            descriptor,
            started_at: self.started_at,
            duration: self.started.elapsed(),
            status: self.context.status.take(),
            result: self.context.result.take(),
            failure,
        };
        for listener in self.listeners {
            listener.finished(&record);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operation::RecordingListener;
    use serde_json::json;

    fn recording_runner() -> (DefaultOperationRunner, Arc<RecordingListener>) {
        let listener = Arc::new(RecordingListener::new());
        let runner = DefaultOperationRunner::new().with_listener(listener.clone());
        (runner, listener)
    }

    #[test]
    fn success_records_result_once() {
        let (runner, listener) = recording_runner();
        let value: Result<u32, String> = runner.call(
            OperationDescriptor::display_name("Download a").progress_display_name("a"),
            |ctx| {
                ctx.set_result(json!({ "bytesRead": 7 }));
                Ok(42)
            },
        );
        assert_eq!(value.unwrap(), 42);

        let records = listener.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].result_u64("bytesRead"), Some(7));
        assert!(records[0].succeeded());
        assert!(listener.open().is_empty());
    }

    #[test]
    fn error_is_returned_unchanged_and_recorded() {
        let (runner, listener) = recording_runner();
        let value: Result<(), std::io::Error> =
            runner.call(OperationDescriptor::display_name("Download b"), |_| {
                Err(std::io::Error::new(std::io::ErrorKind::TimedOut, "slow"))
            });
        let err = value.unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::TimedOut);

        let records = listener.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].failure.as_deref(), Some("slow"));
        assert!(records[0].result.is_none());
    }

    #[test]
    fn panic_still_closes_scope() {
        let (runner, listener) = recording_runner();
        let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _: Result<(), String> =
                runner.call(OperationDescriptor::display_name("Download c"), |_| {
                    panic!("transport exploded")
                });
        }));
        assert!(outcome.is_err());

        let records = listener.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].failure.as_deref(), Some("operation panicked"));
        assert!(listener.open().is_empty());
        assert_eq!(current_operation(), None);
    }

    #[test]
    fn nested_operations_link_to_parent() {
        let (runner, listener) = recording_runner();
        let _: Result<(), String> = runner.call(OperationDescriptor::display_name("outer"), |_| {
            let outer = current_operation();
            let _: Result<(), String> =
                runner.call(OperationDescriptor::display_name("inner"), |_| {
                    assert_ne!(current_operation(), outer);
                    Ok(())
                });
            assert_eq!(current_operation(), outer);
            Ok(())
        });
        assert_eq!(current_operation(), None);

        let records = listener.records();
        assert_eq!(records.len(), 2);
        let inner = &records[0];
        let outer = &records[1];
        assert_eq!(inner.descriptor.display_name, "inner");
        assert_eq!(inner.parent_id, Some(outer.id));
        assert_eq!(outer.parent_id, None);
    }

    #[test]
    fn status_and_explicit_failure() {
        let (runner, listener) = recording_runner();
        let _: Result<(), String> = runner.call(OperationDescriptor::display_name("x"), |ctx| {
            ctx.set_status("NOT FOUND");
            ctx.failed("soft failure");
            Ok(())
        });
        let r = &listener.records()[0];
        assert_eq!(r.status.as_deref(), Some("NOT FOUND"));
        assert_eq!(r.failure.as_deref(), Some("soft failure"));
    }

    #[test]
    fn shared_runner_through_arc() {
        let (runner, listener) = recording_runner();
        let shared = Arc::new(runner);
        let _: Result<(), String> = shared.call(OperationDescriptor::display_name("x"), |_| Ok(()));
        assert_eq!(listener.records().len(), 1);
    }

    struct PanicsOnStart;

    impl OperationListener for PanicsOnStart {
        fn started(&self, _: OperationId, _: Option<OperationId>, _: &OperationDescriptor) {
            panic!("listener failed");
        }

        fn finished(&self, _: &OperationRecord) {}
    }

    #[test]
    fn panicking_listener_does_not_leak_current_operation() {
        let (runner, listener) = recording_runner();
        let failing = runner.clone().with_listener(Arc::new(PanicsOnStart));
        let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _: Result<(), String> =
                failing.call(OperationDescriptor::display_name("Download d"), |_| Ok(()));
        }));
        assert!(outcome.is_err());
        assert_eq!(current_operation(), None);

        listener.clear();
        let _: Result<(), String> =
            runner.call(OperationDescriptor::display_name("next"), |_| Ok(()));
        assert_eq!(listener.records()[0].parent_id, None);
    }
}
