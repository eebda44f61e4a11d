//! Operation scopes: bounded, described units of work with a terminal record.
//!
//! A [`OperationRunner`] opens a scope from an [`OperationDescriptor`], runs a
//! body that may attach a structured result, and delivers exactly one
//! [`OperationRecord`] per scope to its [`OperationListener`]s.

mod context;
mod descriptor;
mod listener;
mod record;
mod runner;
mod trace_file;

pub use context::OperationContext;
pub use descriptor::OperationDescriptor;
pub use listener::{OperationListener, RecordingListener, TracingListener};
pub use record::{OperationId, OperationRecord};
pub use runner::{current_operation, DefaultOperationRunner, OperationRunner};
pub use trace_file::TraceFileListener;
