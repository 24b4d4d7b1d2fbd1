//! Status and confirmation message types for operation feedback.

use std::fmt;

use crate::display::Violations;

/// Wrapper type for displaying operation confirmation messages.
///
/// This provides consistent formatting for operations that finish with a
/// verdict rather than a document, such as auditing a saved plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationStatus {
    pub message: String,
    pub success: bool,
}

impl OperationStatus {
    /// Create a new success status.
    pub fn success(message: String) -> Self {
        Self {
            message,
            success: true,
        }
    }

    /// Create a new failure status.
    pub fn failure(message: String) -> Self {
        Self {
            message,
            success: false,
        }
    }

    /// Summarizes an audit: success when nothing was found.
    pub fn from_audit(violations: &Violations) -> Self {
        if violations.is_empty() {
            Self::success("Plan complies with all HOS regulations".to_string())
        } else {
            Self::failure(format!(
                "Plan has {} HOS violation(s)",
                violations.len()
            ))
        }
    }
}

impl fmt::Display for OperationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {}", if self.success { "Success:" } else { "Error:" }, self.message)
    }
}
