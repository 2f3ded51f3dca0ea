//! Roles and the acting identity behind a request.
//!
//! Group membership is resolved once per request by the identity provider
//! of the application shell; the core only ever sees the resulting [`Actor`].

use crate::error::ParseError;
use crate::VoterId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Capability held by the acting identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Schedules proposals.
    Secretariat,
    /// Opens and closes voting windows.
    Manager,
    /// Plain council member.
    Member,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Secretariat => "secretariat",
            Self::Manager => "manager",
            Self::Member => "member",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "secretariat" => Ok(Self::Secretariat),
            "manager" => Ok(Self::Manager),
            "member" => Ok(Self::Member),
            _ => Err(ParseError::Role(s.to_string())),
        }
    }
}

/// An authenticated identity together with its resolved role.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Actor {
    pub id: VoterId,
    pub role: Role,
}

impl Actor {
    pub fn new(id: impl Into<VoterId>, role: Role) -> Self {
        Self {
            id: id.into(),
            role,
        }
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.role == role
    }
}
