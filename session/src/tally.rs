//! Tally engine.
//!
//! Pure functions of a proposal, its ballots, the roster size and the
//! current time. Nothing here mutates state; consistency across concurrent
//! writers comes from the caller taking both inputs under the same lock.

use crate::ballot::{BallotBox, Choice};
use crate::proposal::{Proposal, ProposalStatus};
use camara_types::{ProposalId, Timestamp, VoterId};
use serde::{Deserialize, Serialize};

/// Live counts for a proposal.
///
/// Only counts and the quorum label are exposed; whether the proposal
/// passed is left to the chamber.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tally {
    pub yes: u32,
    pub no: u32,
    pub abstain: u32,
    pub cast: u32,
    pub roster_size: u32,
    pub remaining_secs: u64,
}

impl Tally {
    pub fn compute(
        proposal: &Proposal,
        ballots: &BallotBox,
        roster_size: u32,
        now: Timestamp,
    ) -> Self {
        Self {
            yes: ballots.count(Choice::Yes),
            no: ballots.count(Choice::No),
            abstain: ballots.count(Choice::Abstain),
            cast: ballots.len() as u32,
            roster_size,
            remaining_secs: proposal.remaining_secs(now),
        }
    }
}

/// One line of the per-voter listing on the public screen.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BallotEntry {
    pub voter: String,
    pub choice: String,
}

/// The read-only view polled by the public display.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TallySnapshot {
    pub id: ProposalId,
    pub title: String,
    pub status: ProposalStatus,
    pub remaining_seconds: u64,
    pub yes: u32,
    pub no: u32,
    pub abstain: u32,
    pub cast_count: u32,
    pub roster_size: u32,
    pub ballots: Vec<BallotEntry>,
    pub quorum: String,
}

impl TallySnapshot {
    pub fn build(
        proposal: &Proposal,
        ballots: &BallotBox,
        roster_size: u32,
        now: Timestamp,
        display_name: impl Fn(&VoterId) -> String,
    ) -> Self {
        let tally = Tally::compute(proposal, ballots, roster_size, now);
        Self {
            id: proposal.id,
            title: proposal.title.clone(),
            status: proposal.status,
            remaining_seconds: tally.remaining_secs,
            yes: tally.yes,
            no: tally.no,
            abstain: tally.abstain,
            cast_count: tally.cast,
            roster_size: tally.roster_size,
            ballots: ballots
                .iter()
                .map(|b| BallotEntry {
                    voter: display_name(&b.voter),
                    choice: b.choice.label().to_string(),
                })
                .collect(),
            quorum: proposal.quorum.label().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proposal::NewProposal;
    use crate::session::Session;

    fn voting_session() -> Session {
        let mut s = Session::new(
            NewProposal::new("Water tariff")
                .into_proposal(ProposalId::new(4), 60)
                .unwrap(),
        );
        s.open_voting(Timestamp::new(1_000));
        s.cast_vote(&"v1".into(), Choice::Yes, Timestamp::new(1_010))
            .unwrap();
        s.cast_vote(&"v2".into(), Choice::No, Timestamp::new(1_011))
            .unwrap();
        s.cast_vote(&"v3".into(), Choice::Yes, Timestamp::new(1_012))
            .unwrap();
        s
    }

    #[test]
    fn counts_by_choice() {
        let tally = voting_session().tally(9, Timestamp::new(1_020));
        assert_eq!((tally.yes, tally.no, tally.abstain), (2, 1, 0));
        assert_eq!(tally.cast, 3);
        assert_eq!(tally.roster_size, 9);
        assert_eq!(tally.remaining_secs, 40);
    }

    #[test]
    fn countdown_stops_at_zero_while_still_open() {
        let s = voting_session();
        let tally = s.tally(9, Timestamp::new(5_000));
        assert_eq!(s.proposal().status, ProposalStatus::Open);
        assert_eq!(tally.remaining_secs, 0);
    }

    #[test]
    fn snapshot_lists_ballots_in_cast_order() {
        let s = voting_session();
        let snapshot = s.snapshot(9, Timestamp::new(1_020), |id| format!("user-{id}"));
        let names: Vec<_> = snapshot.ballots.iter().map(|e| e.voter.as_str()).collect();
        assert_eq!(names, ["user-v1", "user-v2", "user-v3"]);
        assert_eq!(snapshot.ballots[1].choice, "No");
        assert_eq!(snapshot.quorum, "Simple majority");
    }

    #[test]
    fn snapshot_wire_shape() {
        let snapshot = voting_session().snapshot(9, Timestamp::new(1_020), |id| id.to_string());
        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["id"], 4);
        assert_eq!(json["status"], "open");
        assert_eq!(json["remaining_seconds"], 40);
        assert_eq!(json["cast_count"], 3);
        assert_eq!(json["roster_size"], 9);
        assert_eq!(json["ballots"][0]["voter"], "v1");
        assert_eq!(json["ballots"][0]["choice"], "Yes");
        assert_eq!(json["quorum"], "Simple majority");
    }
}
