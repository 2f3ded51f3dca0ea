use camara_roster::RosterError;
use camara_types::{ProposalId, Role, VoterId};
use thiserror::Error;

/// Every expected way a voting operation can be turned down.
///
/// None of these are fatal; the presentation layer decides what to show.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("action requires the {0} role")]
    Unauthorized(Role),

    #[error("voter {0} is not in office")]
    VoterInactive(VoterId),

    #[error("proposal {0} not found")]
    ProposalNotFound(ProposalId),

    #[error("voter {0} is not on the roster")]
    VoterNotFound(VoterId),

    #[error("voting on proposal {0} is not open")]
    VotingNotOpen(ProposalId),

    #[error("voting window for proposal {0} has expired")]
    WindowExpired(ProposalId),

    #[error("voter {voter} has already voted on proposal {proposal}")]
    DuplicateVote { proposal: ProposalId, voter: VoterId },

    #[error("invalid proposal: {0}")]
    InvalidProposal(String),
}

impl SessionError {
    /// Stable machine-readable name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Unauthorized(_) | Self::VoterInactive(_) => "unauthorized",
            Self::ProposalNotFound(_) | Self::VoterNotFound(_) => "not_found",
            Self::VotingNotOpen(_) => "voting_not_open",
            Self::WindowExpired(_) => "window_expired",
            Self::DuplicateVote { .. } => "duplicate_vote",
            Self::InvalidProposal(_) => "invalid_proposal",
        }
    }
}

impl From<RosterError> for SessionError {
    fn from(e: RosterError) -> Self {
        match e {
            RosterError::UnknownVoter(id) => Self::VoterNotFound(id),
            RosterError::Inactive(id) => Self::VoterInactive(id),
            other => Self::InvalidProposal(other.to_string()),
        }
    }
}
