//! Error types for double dispatch and inspection.

/// Errors raised by doubles, controllers, and spies.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Raised when dispatch finds no allowed method or no eligible rule.
    ///
    /// This is the only error a test is expected to assert on directly:
    /// calling an unconfigured method always raises it rather than returning
    /// a default value.
    #[error("method \"{0}\" is not stubbed")]
    NotStubbed(String),

    /// Raised by `instance(n)` when fewer than `n + 1` instances exist.
    #[error("instance {index} does not exist (instances created: {count})")]
    InstanceOutOfRange { index: usize, count: usize },
}

impl Error {
    /// The method name carried by a `NotStubbed` error, if any.
    pub fn method(&self) -> Option<&str> {
        match self {
            Error::NotStubbed(name) => Some(name),
            _ => None,
        }
    }
}
