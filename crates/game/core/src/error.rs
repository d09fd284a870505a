//! Common error infrastructure for combat-core.
//!
//! Domain errors (e.g. [`crate::session::RoundError`]) live next to the code
//! that raises them and implement [`CombatRuleError`] so callers can decide
//! whether a failure is the player's fault or the server's.

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Validation**: a precondition failed; nothing changed and the caller may
///   retry with a different command.
/// - **Internal**: something outside the rules broke (store, channel, data).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Invalid request; report synchronously, change nothing.
    ///
    /// Examples: not in combat, unknown skill, insufficient resource
    Validation,

    /// Unexpected failure; surfaced as a generic internal error.
    ///
    /// Examples: repository unavailable, worker channel closed
    Internal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Internal => "internal",
        }
    }

    /// Returns true if this error indicates a fault outside the caller's control.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal)
    }
}

/// Common trait for errors raised by the combat rules.
pub trait CombatRuleError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Useful for metrics and assertions in tests.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_labels() {
        assert_eq!(ErrorSeverity::Validation.as_str(), "validation");
        assert!(ErrorSeverity::Internal.is_internal());
        assert!(!ErrorSeverity::Validation.is_internal());
    }
}
