//! The roster collection.

use crate::{RosterError, Voter};
use camara_types::VoterId;
use std::collections::BTreeMap;
use tracing::info;

/// All council members known to the chamber, keyed by identity.
#[derive(Clone, Debug, Default)]
pub struct Roster {
    voters: BTreeMap<VoterId, Voter>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_voters(voters: impl IntoIterator<Item = Voter>) -> Self {
        let mut roster = Self::new();
        for voter in voters {
            roster.upsert(voter);
        }
        roster
    }

    /// Add a member, or replace the record of an existing one.
    pub fn upsert(&mut self, voter: Voter) {
        if self.voters.contains_key(&voter.id) {
            info!(voter = %voter.id, "roster entry updated");
        }
        self.voters.insert(voter.id.clone(), voter);
    }

    /// Mark a member as in or out of office.
    pub fn set_active(&mut self, id: &VoterId, active: bool) -> Result<(), RosterError> {
        let voter = self
            .voters
            .get_mut(id)
            .ok_or_else(|| RosterError::UnknownVoter(id.clone()))?;
        voter.active = active;
        info!(voter = %id, active, "roster membership changed");
        Ok(())
    }

    /// Look up a member who may cast a ballot right now.
    pub fn eligible(&self, id: &VoterId) -> Result<&Voter, RosterError> {
        let voter = self
            .voters
            .get(id)
            .ok_or_else(|| RosterError::UnknownVoter(id.clone()))?;
        if !voter.active {
            return Err(RosterError::Inactive(id.clone()));
        }
        Ok(voter)
    }

    /// Number of roster entries, in office or not.
    pub fn size(&self) -> u32 {
        self.voters.len() as u32
    }

    pub fn active_count(&self) -> u32 {
        self.voters.values().filter(|v| v.active).count() as u32
    }

    /// The member in office whose board seat carries the casting vote, if any.
    pub fn casting_vote_holder(&self) -> Option<&Voter> {
        self.voters
            .values()
            .find(|v| v.active && v.holds_casting_vote())
    }

    /// Display name used in tally snapshots; falls back to the raw id for
    /// identities that are no longer on the roster.
    pub fn display_name(&self, id: &VoterId) -> String {
        self.voters
            .get(id)
            .map(|v| v.username.clone())
            .unwrap_or_else(|| id.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BoardSeat;

    fn roster() -> Roster {
        Roster::from_voters([
            Voter::new("v1", "asilva", "Ana Silva")
                .with_seat(BoardSeat::new("President", 0).unwrap()),
            Voter::new("v2", "bsouza", "Bruno Souza"),
            Voter::new("v3", "clima", "Carla Lima"),
        ])
    }

    #[test]
    fn eligibility_distinguishes_unknown_and_inactive() {
        let mut roster = roster();
        roster.set_active(&"v2".into(), false).unwrap();

        assert!(roster.eligible(&"v1".into()).is_ok());
        assert_eq!(
            roster.eligible(&"v2".into()),
            Err(RosterError::Inactive("v2".into()))
        );
        assert_eq!(
            roster.eligible(&"v9".into()),
            Err(RosterError::UnknownVoter("v9".into()))
        );
    }

    #[test]
    fn size_counts_inactive_members() {
        let mut roster = roster();
        roster.set_active(&"v3".into(), false).unwrap();
        assert_eq!(roster.size(), 3);
        assert_eq!(roster.active_count(), 2);
    }

    #[test]
    fn upsert_replaces_existing_entry() {
        let mut roster = roster();
        roster.upsert(Voter::new("v2", "bsouza2", "Bruno Souza"));
        assert_eq!(roster.size(), 3);
        assert_eq!(roster.display_name(&"v2".into()), "bsouza2");
    }

    #[test]
    fn casting_vote_holder_must_be_in_office() {
        let mut roster = roster();
        assert_eq!(
            roster.casting_vote_holder().map(|v| v.username.as_str()),
            Some("asilva")
        );
        roster.set_active(&"v1".into(), false).unwrap();
        assert!(roster.casting_vote_holder().is_none());
    }

    #[test]
    fn display_name_falls_back_to_id() {
        assert_eq!(roster().display_name(&"ghost".into()), "ghost");
    }
}
