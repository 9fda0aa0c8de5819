//! Error types for the Address actor.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum AddressError {
    #[error("Address not found: {0}")]
    NotFound(String),

    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for AddressError {
    fn from(msg: String) -> Self {
        AddressError::ActorCommunicationError(msg)
    }
}
