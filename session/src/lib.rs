//! Roll-call voting sessions.
//!
//! A [`Proposal`] moves through `drafting -> open -> closed`, and may be
//! reopened for a re-vote. While open, members cast at most one [`Ballot`]
//! each into the proposal's [`BallotBox`]. The [`tally`] module derives
//! live counts and the display countdown without touching any state.
//!
//! Openness is a two-layer gate: the status must be `open` *and* the
//! window must not have elapsed. Both layers live in
//! [`Proposal::acceptance`], which the ballot box and the display share.

pub mod ballot;
pub mod error;
pub mod proposal;
pub mod session;
pub mod tally;

pub use ballot::{Ballot, BallotBox, Choice};
pub use error::SessionError;
pub use proposal::{Classification, NewProposal, Proposal, ProposalStatus, QuorumRequirement};
pub use session::Session;
pub use tally::{BallotEntry, Tally, TallySnapshot};
