//! Error classification shared by every combat error type.
//!
//! Concrete errors live next to the code that raises them
//! ([`ActionError`](crate::action::ActionError) for the action pipeline,
//! `RuntimeError` in the runtime crate). None of them is fatal to the host:
//! the combat manager turns every rejection into an empty result and a log
//! line carrying [`GameError::error_code`].

/// How a caller should treat a rejected request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// The same request may succeed on a later turn (cooldown, SP, seal).
    Recoverable,
    /// The request itself is wrong: unknown actor, dead or out-of-reach target.
    Validation,
    /// Registry or encounter bookkeeping disagrees with itself.
    Internal,
    /// State can no longer be trusted.
    Fatal,
}

impl ErrorSeverity {
    /// Lower-case label used as a structured log field.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// True when retrying the same request later can succeed.
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }
}

impl core::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Implemented by every error enum in the combat crates.
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Stable upper-case identifier, e.g. `ACTION_INSUFFICIENT_SP`.
    fn error_code(&self) -> &'static str;
}
