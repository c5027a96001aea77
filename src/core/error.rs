//! Typed errors raised by the analytics engine

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// The caller passed a name or token the engine does not understand.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

pub type EngineResult<T> = std::result::Result<T, EngineError>;
