use thiserror::Error;

use crate::runner::ds::value::Value;

/// Every failure the runtime layer can report to generated code.
///
/// Errors are raised at the point of detection and never defaulted or
/// retried; the generated code decides what to do with them.
#[derive(Debug, Clone, Error)]
pub enum RuntimeError {
    /// A non-numeric value reached a place that needs a number, or a value of
    /// the wrong type was indexed, called or used as a key.
    #[error("type mismatch: {0}")]
    TypeMismatch(String),

    /// A required argument was `nil`.
    #[error("undefined argument: {0}")]
    UndefinedArgument(String),

    /// `require` was asked for a name that was never registered.
    #[error("module '{0}' not found")]
    ModuleNotFound(String),

    /// `setmetatable` was given a shape other than `{__index = <table>}`, or
    /// the link would close a cycle.
    #[error("unsupported metatable: {0}")]
    MetatableUnsupported(String),

    /// A method did not resolve anywhere along the fallback chain.
    #[error("lookup failed: {0}")]
    LookupError(String),

    /// Modulo by zero while division trapping is enabled.
    #[error("attempt to perform 'n%0'")]
    DivisionError,

    /// A value thrown by the script itself through `error(...)`.
    #[error("{0}")]
    Raised(Value),

    /// The module registry was written outside of its seeding or binding phase.
    #[error("module registry is locked: {0}")]
    RegistryLocked(String),
}

impl RuntimeError {
    pub fn type_mismatch(message: impl Into<String>) -> Self {
        RuntimeError::TypeMismatch(message.into())
    }

    pub fn lookup(message: impl Into<String>) -> Self {
        RuntimeError::LookupError(message.into())
    }

    pub fn unsupported_metatable(message: impl Into<String>) -> Self {
        RuntimeError::MetatableUnsupported(message.into())
    }
}
