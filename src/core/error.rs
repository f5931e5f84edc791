//=========================================================================
// PAL Errors
//=========================================================================
//
// Error taxonomy shared by every component and backend.
//
//   InvalidHandle        → wrong owner, destroyed window, removed monitor
//   Unsupported*         → no native equivalent (check capabilities first)
//   Backend              → unrecoverable native failure, component unusable
//   InvalidOperation     → callback raced with its own removal
//   InvalidArgument      → malformed caller input
//
//=========================================================================

//=== External Dependencies ===============================================

use thiserror::Error;

//=== PalError ============================================================

/// Errors returned by PAL operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PalError {
    /// Handle resolved against the wrong component, or naming a
    /// destroyed/removed native object.
    #[error("invalid handle: {0}")]
    InvalidHandle(String),

    /// The backend has no native equivalent for the operation.
    #[error("operation not supported by this backend: {0}")]
    UnsupportedOperation(&'static str),

    /// Creation hints the backend cannot honour.
    #[error("unsupported configuration: {0}")]
    UnsupportedConfiguration(String),

    /// A user callback returned a value the backend cannot express.
    #[error("unsupported result: {0}")]
    UnsupportedResult(String),

    /// Unrecoverable native failure. The owning component should be
    /// treated as unusable.
    #[error("{component}: {message}")]
    Backend {
        component: &'static str,
        message: String,
    },

    /// A callback-shaped race, e.g. a hit-test arriving after removal.
    #[error("invalid operation: {0}")]
    InvalidOperation(String),

    /// Malformed input supplied by the caller.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl PalError {
    /// Wraps a native failure reported by `component`.
    pub fn backend(component: &'static str, message: impl Into<String>) -> Self {
        Self::Backend {
            component,
            message: message.into(),
        }
    }

    /// True for errors that leave the component unusable.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Backend { .. })
    }
}

/// Result type for PAL operations.
pub type PalResult<T> = Result<T, PalError>;

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_error_names_component() {
        let err = PalError::backend("SdlWindowComponent", "SDL_Init failed");
        assert_eq!(err.to_string(), "SdlWindowComponent: SDL_Init failed");
        assert!(err.is_fatal());
    }

    #[test]
    fn non_backend_errors_are_recoverable() {
        assert!(!PalError::InvalidHandle("window 3".into()).is_fatal());
        assert!(!PalError::UnsupportedOperation("SetCursor").is_fatal());
    }
}
