//! Proposals and their classification.

use crate::error::SessionError;
use camara_types::{ProposalId, Timestamp};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Longest accepted proposal title, in characters.
pub const MAX_TITLE_LEN: usize = 255;

/// Kind of legislative item.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    #[default]
    OrdinaryLaw,
    ComplementaryLaw,
    CharterAmendment,
    Motion,
}

impl Classification {
    pub fn label(&self) -> &'static str {
        match self {
            Self::OrdinaryLaw => "Ordinary bill",
            Self::ComplementaryLaw => "Complementary bill",
            Self::CharterAmendment => "Charter amendment",
            Self::Motion => "Motion",
        }
    }

    /// The majority this kind of item customarily requires.
    pub fn customary_quorum(&self) -> QuorumRequirement {
        match self {
            Self::OrdinaryLaw | Self::Motion => QuorumRequirement::SimpleMajority,
            Self::ComplementaryLaw => QuorumRequirement::AbsoluteMajority,
            Self::CharterAmendment => QuorumRequirement::TwoThirds,
        }
    }
}

/// Majority threshold a proposal nominally needs. Display-only.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuorumRequirement {
    #[default]
    SimpleMajority,
    AbsoluteMajority,
    TwoThirds,
}

impl QuorumRequirement {
    pub fn label(&self) -> &'static str {
        match self {
            Self::SimpleMajority => "Simple majority",
            Self::AbsoluteMajority => "Absolute majority",
            Self::TwoThirds => "Two-thirds of members",
        }
    }
}

/// Lifecycle status of a proposal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProposalStatus {
    /// On the agenda, not yet put to a vote.
    #[default]
    Drafting,
    /// Voting window opened by the manager.
    Open,
    /// Closed by the manager. Can be reopened for a re-vote.
    Closed,
}

impl ProposalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Drafting => "drafting",
            Self::Open => "open",
            Self::Closed => "closed",
        }
    }
}

impl fmt::Display for ProposalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A votable legislative item.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    pub id: ProposalId,
    pub title: String,
    pub classification: Classification,
    pub description: String,
    pub quorum: QuorumRequirement,
    /// Length of the voting window, in seconds. Always positive.
    pub window_secs: u64,
    pub status: ProposalStatus,
    /// Set when the window is opened; `None` exactly while drafting.
    pub window_opened_at: Option<Timestamp>,
}

impl Proposal {
    /// Last instant at which a ballot is still accepted, once opened.
    pub fn deadline(&self) -> Option<Timestamp> {
        self.window_opened_at
            .map(|opened| opened.plus_secs(self.window_secs))
    }

    /// Whether a ballot cast at `now` would be accepted, and if not, why.
    ///
    /// The status must be `open` and `now` must not be past the deadline.
    /// A proposal can still say `open` after its window elapsed, until the
    /// manager closes it; ballots are refused in that state all the same.
    pub fn acceptance(&self, now: Timestamp) -> Result<(), SessionError> {
        if self.status != ProposalStatus::Open {
            return Err(SessionError::VotingNotOpen(self.id));
        }
        match self.deadline() {
            Some(deadline) if now <= deadline => Ok(()),
            _ => Err(SessionError::WindowExpired(self.id)),
        }
    }

    pub fn is_accepting_votes(&self, now: Timestamp) -> bool {
        self.acceptance(now).is_ok()
    }

    /// Countdown shown on the public screen. Zero unless open.
    ///
    /// Reflects the display only; it says nothing about whether the
    /// manager has actually closed the vote.
    pub fn remaining_secs(&self, now: Timestamp) -> u64 {
        if self.status != ProposalStatus::Open {
            return 0;
        }
        self.deadline()
            .map(|deadline| deadline.secs_until(now))
            .unwrap_or(0)
    }
}

/// Proposal metadata as submitted by the secretariat.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct NewProposal {
    pub title: String,
    #[serde(default)]
    pub classification: Classification,
    #[serde(default)]
    pub description: String,
    /// Defaults to the classification's customary quorum.
    #[serde(default)]
    pub quorum: Option<QuorumRequirement>,
    /// Defaults to the chamber's configured window length.
    #[serde(default)]
    pub window_secs: Option<u64>,
}

impl NewProposal {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    /// Validate and turn into a drafting proposal with the given id.
    pub fn into_proposal(
        self,
        id: ProposalId,
        default_window_secs: u64,
    ) -> Result<Proposal, SessionError> {
        let title = self.title.trim().to_string();
        if title.is_empty() {
            return Err(SessionError::InvalidProposal("title is required".into()));
        }
        if title.chars().count() > MAX_TITLE_LEN {
            return Err(SessionError::InvalidProposal(format!(
                "title exceeds {MAX_TITLE_LEN} characters"
            )));
        }
        let window_secs = self.window_secs.unwrap_or(default_window_secs);
        if window_secs == 0 {
            return Err(SessionError::InvalidProposal(
                "voting window must be at least one second".into(),
            ));
        }

        Ok(Proposal {
            id,
            title,
            classification: self.classification,
            description: self.description,
            quorum: self
                .quorum
                .unwrap_or_else(|| self.classification.customary_quorum()),
            window_secs,
            status: ProposalStatus::Drafting,
            window_opened_at: None,
        })
    }
}
