//! Common error infrastructure for creature-core.
//!
//! The decision engine itself never fails: blocked paths, out-of-range
//! abilities and boxed-in creatures are ordinary outcomes reported through
//! results and events. Errors exist only at the edges where callers hand the
//! engine bad references (unknown archetype, spawn tile outside the grid).
//!
//! Every error enum derives `thiserror::Error` and implements [`GameError`]
//! so callers can classify failures without matching on concrete variants.

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Retry with different input may succeed (e.g. another spawn tile).
    Recoverable,

    /// Invalid input, should not retry without changes.
    ///
    /// Examples: unknown archetype, position outside the grid
    Validation,

    /// Unexpected state inconsistency. Indicates a bug.
    Internal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal)
    }
}

/// Common trait for all errors surfaced by the engine and its collaborators.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
/// - Keep `error_code` stable; it is used in logs and tests
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
