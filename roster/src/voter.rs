//! Council members and board seats.

use crate::RosterError;
use camara_types::VoterId;
use serde::{Deserialize, Serialize};

/// A seat on the board (president, vice-president, secretary...).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSeat {
    pub name: String,
    /// 1 for an ordinary vote, 0 for the casting-vote holder.
    #[serde(default = "default_weight")]
    pub weight: u8,
}

fn default_weight() -> u8 {
    1
}

impl BoardSeat {
    pub fn new(name: impl Into<String>, weight: u8) -> Result<Self, RosterError> {
        if weight > 1 {
            return Err(RosterError::InvalidSeatWeight(weight));
        }
        Ok(Self {
            name: name.into(),
            weight,
        })
    }

    /// Whether this seat holds the tie-breaking vote.
    pub fn is_casting_vote(&self) -> bool {
        self.weight == 0
    }
}

/// A council member.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voter {
    pub id: VoterId,
    /// Login name; this is what tally snapshots display.
    pub username: String,
    pub full_name: String,
    #[serde(default)]
    pub parliamentary_name: Option<String>,
    #[serde(default)]
    pub seat: Option<BoardSeat>,
    /// Whether the member is currently in office.
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl Voter {
    pub fn new(
        id: impl Into<VoterId>,
        username: impl Into<String>,
        full_name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
            full_name: full_name.into(),
            parliamentary_name: None,
            seat: None,
            active: true,
        }
    }

    pub fn with_seat(mut self, seat: BoardSeat) -> Self {
        self.seat = Some(seat);
        self
    }

    /// Name used on the floor: the parliamentary name when set, the full name otherwise.
    pub fn floor_name(&self) -> &str {
        self.parliamentary_name
            .as_deref()
            .unwrap_or(&self.full_name)
    }

    pub fn holds_casting_vote(&self) -> bool {
        self.seat.as_ref().is_some_and(BoardSeat::is_casting_vote)
    }
}
