//! Error types for input injection.
//!
//! Every failure is reported synchronously by the call that violated its
//! contract. Nothing in this crate retries.

use std::fmt;

/// Failure reported by an [`EventSink`](crate::EventSink) while delivering an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinkError {
    message: String,
}

impl SinkError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for SinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "event sink failed: {}", self.message)
    }
}

impl std::error::Error for SinkError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InjectionError {
    /// A value violated a precondition that does not depend on dispatcher state.
    IllegalArgument(String),
    /// The operation is inconsistent with the current gesture session.
    IllegalState(String),
    /// The event sink rejected an event during a flush.
    Delivery(SinkError),
}

impl InjectionError {
    pub fn is_illegal_argument(&self) -> bool {
        matches!(self, InjectionError::IllegalArgument(_))
    }

    pub fn is_illegal_state(&self) -> bool {
        matches!(self, InjectionError::IllegalState(_))
    }

    pub fn message(&self) -> &str {
        match self {
            InjectionError::IllegalArgument(message) | InjectionError::IllegalState(message) => {
                message
            }
            InjectionError::Delivery(error) => error.message(),
        }
    }
}

impl fmt::Display for InjectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InjectionError::IllegalArgument(message) => write!(f, "illegal argument: {message}"),
            InjectionError::IllegalState(message) => write!(f, "illegal state: {message}"),
            InjectionError::Delivery(error) => write!(f, "{error}"),
        }
    }
}

impl std::error::Error for InjectionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InjectionError::Delivery(error) => Some(error),
            _ => None,
        }
    }
}

impl From<SinkError> for InjectionError {
    fn from(error: SinkError) -> Self {
        InjectionError::Delivery(error)
    }
}

pub type Result<T> = std::result::Result<T, InjectionError>;

/// Fails with [`InjectionError::IllegalArgument`] unless `condition` holds.
pub(crate) fn require(condition: bool, message: impl FnOnce() -> String) -> Result<()> {
    if condition {
        Ok(())
    } else {
        Err(InjectionError::IllegalArgument(message()))
    }
}

/// Fails with [`InjectionError::IllegalState`] unless `condition` holds.
pub(crate) fn check(condition: bool, message: impl FnOnce() -> String) -> Result<()> {
    if condition {
        Ok(())
    } else {
        Err(InjectionError::IllegalState(message()))
    }
}
