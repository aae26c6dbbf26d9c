use serde::{Deserialize, Serialize};

use crate::models::Role;

/// Number of heroes on each team
pub const TEAM_SIZE: usize = 5;

/// Raw `{hero, role}` entry as submitted by the page
///
/// Fields stay optional strings so the gateway can report exactly which
/// value was missing or wrong instead of failing JSON extraction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SlotInput {
    #[serde(default)]
    pub hero: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

impl SlotInput {
    pub fn new(hero: &str, role: &str) -> Self {
        Self {
            hero: Some(hero.to_string()),
            role: Some(role.to_string()),
        }
    }
}

/// Body of `POST /api/get-tips`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TipsRequest {
    #[serde(default)]
    pub my_team: Option<Vec<SlotInput>>,
    #[serde(default)]
    pub opponent_team: Option<Vec<SlotInput>>,
}

/// A validated hero/role pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamSlot {
    pub hero: String,
    pub role: Role,
}

/// A validated lineup: ten distinct heroes, every role once per team
///
/// The first slot of `my_team` is the player asking for advice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lineup {
    pub my_team: [TeamSlot; TEAM_SIZE],
    pub opponent_team: [TeamSlot; TEAM_SIZE],
}

impl Lineup {
    /// The player's own slot
    pub fn you(&self) -> &TeamSlot {
        &self.my_team[0]
    }

    /// Hero the opponent plays in the given role
    pub fn opponent_in(&self, role: Role) -> Option<&str> {
        self.opponent_team
            .iter()
            .find(|slot| slot.role == role)
            .map(|slot| slot.hero.as_str())
    }
}
