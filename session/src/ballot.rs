//! Ballots and the per-proposal ballot box.

use crate::error::SessionError;
use crate::proposal::Proposal;
use camara_types::{ProposalId, Timestamp, VoterId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A member's choice on a proposal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Choice {
    Yes,
    No,
    Abstain,
}

impl Choice {
    pub const ALL: [Choice; 3] = [Choice::Yes, Choice::No, Choice::Abstain];

    /// Label shown on the public screen.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Yes => "Yes",
            Self::No => "No",
            Self::Abstain => "Abstain",
        }
    }
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One member's recorded choice on one proposal. Immutable once cast.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ballot {
    pub proposal: ProposalId,
    pub voter: VoterId,
    pub choice: Choice,
    pub cast_at: Timestamp,
}

/// The ballots cast on a single proposal, in cast order.
///
/// Holds at most one ballot per voter. Ballots are never edited; the only
/// way to remove them is [`BallotBox::clear`], which reopening a proposal
/// does as part of the same transition.
#[derive(Clone, Debug, Default)]
pub struct BallotBox {
    ballots: Vec<Ballot>,
}

impl BallotBox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a ballot for `voter`.
    ///
    /// Checked in order, first failure wins:
    /// 1. the proposal status is `open`,
    /// 2. `now` is within the voting window,
    /// 3. `voter` has no ballot yet.
    ///
    /// Nothing is recorded on failure.
    pub fn cast(
        &mut self,
        proposal: &Proposal,
        voter: &VoterId,
        choice: Choice,
        now: Timestamp,
    ) -> Result<&Ballot, SessionError> {
        proposal.acceptance(now)?;
        if self.get(voter).is_some() {
            return Err(SessionError::DuplicateVote {
                proposal: proposal.id,
                voter: voter.clone(),
            });
        }

        self.ballots.push(Ballot {
            proposal: proposal.id,
            voter: voter.clone(),
            choice,
            cast_at: now,
        });
        Ok(&self.ballots[self.ballots.len() - 1])
    }

    /// Discard every ballot. Returns how many were dropped.
    pub fn clear(&mut self) -> usize {
        let dropped = self.ballots.len();
        self.ballots.clear();
        dropped
    }

    pub fn get(&self, voter: &VoterId) -> Option<&Ballot> {
        self.ballots.iter().find(|b| &b.voter == voter)
    }

    pub fn count(&self, choice: Choice) -> u32 {
        self.ballots.iter().filter(|b| b.choice == choice).count() as u32
    }

    pub fn len(&self) -> usize {
        self.ballots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ballots.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Ballot> {
        self.ballots.iter()
    }
}
