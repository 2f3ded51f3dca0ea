//! Fundamental types for the chamber voting core.
//!
//! This crate defines the types shared across every other crate in the workspace:
//! identifiers, timestamps, the clock abstraction, and the actor/role model
//! resolved by the surrounding application shell.

pub mod clock;
pub mod error;
pub mod ids;
pub mod role;
pub mod time;

pub use clock::{Clock, SystemClock};
pub use error::ParseError;
pub use ids::{ProposalId, VoterId};
pub use role::{Actor, Role};
pub use time::Timestamp;
