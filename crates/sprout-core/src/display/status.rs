//! Status and confirmation message types for operation feedback.

use std::fmt;

use crate::engine::MutationResult;

/// Wrapper type for displaying operation confirmation messages.
pub struct OperationStatus {
    pub message: String,
    pub success: bool,
}

impl OperationStatus {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            success: true,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            success: false,
        }
    }
}

impl From<&MutationResult> for OperationStatus {
    fn from(result: &MutationResult) -> Self {
        Self::success(result.message.clone())
    }
}

impl fmt::Display for OperationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {}", if self.success { "✓" } else { "✗" }, self.message)
    }
}
