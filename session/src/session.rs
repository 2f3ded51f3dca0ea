//! The session state machine.
//!
//! A [`Session`] pairs a proposal with its ballot box so that every
//! transition touching both happens under a single `&mut` borrow. The
//! caller is expected to hold one session per proposal behind a lock; a
//! transition either completes or leaves the session untouched.

use crate::ballot::{Ballot, BallotBox, Choice};
use crate::error::SessionError;
use crate::proposal::{Proposal, ProposalStatus};
use crate::tally::{Tally, TallySnapshot};
use camara_types::{Timestamp, VoterId};
use tracing::{debug, info};

#[derive(Clone, Debug)]
pub struct Session {
    proposal: Proposal,
    ballots: BallotBox,
}

impl Session {
    pub fn new(proposal: Proposal) -> Self {
        Self {
            proposal,
            ballots: BallotBox::new(),
        }
    }

    pub fn proposal(&self) -> &Proposal {
        &self.proposal
    }

    pub fn ballots(&self) -> &BallotBox {
        &self.ballots
    }

    /// Open (or reopen) the voting window at `now`.
    ///
    /// Discards every ballot already cast on the proposal. Calling this on an
    /// open proposal restarts the window and throws away the votes in
    /// progress: that is how a manager calls a re-vote.
    ///
    /// Returns the number of ballots discarded.
    pub fn open_voting(&mut self, now: Timestamp) -> usize {
        let discarded = self.ballots.clear();
        self.proposal.status = ProposalStatus::Open;
        self.proposal.window_opened_at = Some(now);
        info!(
            proposal = %self.proposal.id,
            window_secs = self.proposal.window_secs,
            discarded,
            "voting opened"
        );
        discarded
    }

    /// Close the voting window. Closing an already-closed or drafting
    /// proposal is accepted and changes nothing but the status.
    ///
    /// Returns whether the proposal was open before the call.
    pub fn close_voting(&mut self) -> bool {
        let was_open = self.proposal.status == ProposalStatus::Open;
        if self.proposal.status == ProposalStatus::Drafting {
            // A proposal that never opened has no window to close.
            debug!(proposal = %self.proposal.id, "close requested on drafting proposal");
            return false;
        }
        self.proposal.status = ProposalStatus::Closed;
        if was_open {
            info!(
                proposal = %self.proposal.id,
                cast = self.ballots.len(),
                "voting closed"
            );
        }
        was_open
    }

    /// Cast `voter`'s ballot. See [`BallotBox::cast`] for the checks.
    pub fn cast_vote(
        &mut self,
        voter: &VoterId,
        choice: Choice,
        now: Timestamp,
    ) -> Result<&Ballot, SessionError> {
        let ballot = self.ballots.cast(&self.proposal, voter, choice, now)?;
        debug!(proposal = %ballot.proposal, voter = %voter, %choice, "ballot cast");
        Ok(ballot)
    }

    pub fn tally(&self, roster_size: u32, now: Timestamp) -> Tally {
        Tally::compute(&self.proposal, &self.ballots, roster_size, now)
    }

    pub fn snapshot(
        &self,
        roster_size: u32,
        now: Timestamp,
        display_name: impl Fn(&VoterId) -> String,
    ) -> TallySnapshot {
        TallySnapshot::build(&self.proposal, &self.ballots, roster_size, now, display_name)
    }
}
