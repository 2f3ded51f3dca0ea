//! The roster: every council member eligible to vote.
//!
//! The roster is the single source for the roster size reported in tally
//! snapshots. It is queried live on every snapshot, so members added or
//! deactivated at runtime are reflected immediately. Entries are never
//! removed, which keeps the number of cast ballots bounded by the size.

pub mod error;
pub mod roster;
pub mod voter;

pub use error::RosterError;
pub use roster::Roster;
pub use voter::{BoardSeat, Voter};
