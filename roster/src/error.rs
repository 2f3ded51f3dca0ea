use camara_types::VoterId;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RosterError {
    #[error("voter {0} is not on the roster")]
    UnknownVoter(VoterId),

    #[error("voter {0} is not in office")]
    Inactive(VoterId),

    #[error("board seat weight must be 0 or 1, got {0}")]
    InvalidSeatWeight(u8),
}
