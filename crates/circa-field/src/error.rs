//! Error types for the circle field.

use std::fmt;

/// Errors that can occur when creating a circle field.
#[derive(Debug)]
pub enum FieldError {
    /// The surface does not provide a 2D drawing context. Fatal to
    /// `create`; the instance never starts.
    ContextUnavailable,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldError::ContextUnavailable => {
                write!(f, "no 2D drawing context available on the surface")
            }
        }
    }
}

impl std::error::Error for FieldError {}

/// A failure raised by a cleanup handler during field teardown.
///
/// Disposal errors are logged and swallowed so teardown of the rest of
/// the page is never blocked.
#[derive(Debug)]
pub struct DisposalError {
    message: String,
}

impl DisposalError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for DisposalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cleanup failed: {}", self.message)
    }
}

impl std::error::Error for DisposalError {}
