//! Handle given to an operation body while it runs.

use serde::Serialize;
use serde_json::Value;

use super::descriptor::to_value_or_null;

/// Lets a running body attach its outcome to the enclosing scope.
#[derive(Debug, Default)]
pub struct OperationContext {
    pub(crate) result: Option<Value>,
    pub(crate) status: Option<String>,
    pub(crate) failure: Option<String>,
}

impl OperationContext {
    /// Structured result recorded when the scope closes. Last call wins.
    pub fn set_result<R: Serialize>(&mut self, result: R) {
        self.result = Some(to_value_or_null(&result, "result"));
    }

    /// Short outcome label (e.g. `UP-TO-DATE`, `NOT FOUND`).
    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = Some(status.into());
    }

    /// Mark the operation failed without returning an error from the body.
    pub fn failed(&mut self, failure: impl Into<String>) {
        self.failure = Some(failure.into());
    }
}
