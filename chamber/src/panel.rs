use camara_session::{Ballot, Proposal};
use serde::Serialize;

/// What a plain member sees on their panel.
#[derive(Clone, Debug, Serialize)]
pub struct MemberPanel {
    /// The proposal currently open for voting, if any.
    pub open: Option<Proposal>,
    /// Whether a ballot cast now would be accepted. An open proposal past
    /// its deadline still shows here, with this set to false.
    pub accepting_votes: bool,
    /// The member's own ballot on it, once cast.
    pub own_ballot: Option<Ballot>,
    /// Proposals waiting on the agenda.
    pub agenda: Vec<Proposal>,
}
