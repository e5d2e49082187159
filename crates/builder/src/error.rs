use std::fmt;

/// Failures raised by session operations. All are synchronous and
/// propagate to the immediate caller; nothing is retried or suppressed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BuilderError {
    /// `start` was called while a session was already open.
    AlreadyActive,
    /// An active-only operation was called outside a session.
    NotActive,
    /// `end` found frames beyond the base frame still open.
    UnbalancedSession { leftover: usize },
    /// The document produced no node for the requested tag.
    ElementCreationFailed { tag: String },
    /// A batch setter or widget operation received a malformed argument.
    InvalidInput { expected: &'static str },
}

pub type BuilderResult<T> = Result<T, BuilderError>;

impl fmt::Display for BuilderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuilderError::AlreadyActive => {
                write!(f, "attempted to start a session that is already active")
            }
            BuilderError::NotActive => {
                write!(f, "attempted to use the builder outside an active session")
            }
            BuilderError::UnbalancedSession { leftover } => write!(
                f,
                "session ended with {leftover} frame{} left on the stack",
                if *leftover == 1 { "" } else { "s" }
            ),
            BuilderError::ElementCreationFailed { tag } => {
                write!(f, "failed to create an element of type {tag}")
            }
            BuilderError::InvalidInput { expected } => {
                write!(f, "invalid input: expected {expected}")
            }
        }
    }
}

impl std::error::Error for BuilderError {}
