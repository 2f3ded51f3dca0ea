use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("invalid proposal id: {0}")]
    ProposalId(String),

    #[error("unknown role: {0}")]
    Role(String),
}
