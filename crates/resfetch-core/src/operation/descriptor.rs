//! Describes an operation before it runs.

use serde::Serialize;
use serde_json::Value;

/// Static description of one operation: what to show and what to record.
///
/// Built fluently:
///
/// ```
/// use resfetch_core::operation::OperationDescriptor;
///
/// let d = OperationDescriptor::display_name("Download https://repo/a.jar")
///     .progress_display_name("a.jar");
/// assert_eq!(d.progress_display_name.as_deref(), Some("a.jar"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct OperationDescriptor {
    pub display_name: String,
    pub progress_display_name: Option<String>,
    /// Structured input details. `Value::Null` when none were given.
    pub details: Value,
}

impl OperationDescriptor {
    pub fn display_name(name: impl Into<String>) -> Self {
        Self {
            display_name: name.into(),
            progress_display_name: None,
            details: Value::Null,
        }
    }

    pub fn progress_display_name(mut self, name: impl Into<String>) -> Self {
        self.progress_display_name = Some(name.into());
        self
    }

    /// Attach structured details. Values that fail to serialize are recorded
    /// as `null` and logged; telemetry never fails the operation.
    pub fn details<D: Serialize>(mut self, details: D) -> Self {
        self.details = to_value_or_null(&details, "details");
        self
    }
}

pub(crate) fn to_value_or_null<D: Serialize>(value: &D, what: &str) -> Value {
    serde_json::to_value(value).unwrap_or_else(|e| {
        tracing::warn!("could not serialize operation {}: {}", what, e);
        Value::Null
    })
}
