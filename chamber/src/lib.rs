//! The chamber: every operation the application shell can invoke.
//!
//! Identity and role come in already resolved as an [`Actor`]; time comes
//! from the injected [`Clock`]. Each proposal's session sits behind its own
//! mutex, so mutations of one proposal are serialized while different
//! proposals never contend. Snapshots are taken under the same mutex and
//! therefore never mix ballots from before and after a reopening.
//!
//! [`Actor`]: camara_types::Actor
//! [`Clock`]: camara_types::Clock

pub mod chamber;
pub mod panel;
pub mod params;

pub use chamber::Chamber;
pub use panel::MemberPanel;
pub use params::ChamberParams;
