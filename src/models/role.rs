use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Lane position a hero plays in a lineup
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Role {
    #[serde(rename = "Safe Lane")]
    SafeLane,
    #[serde(rename = "Midlane")]
    Midlane,
    #[serde(rename = "Offlane")]
    Offlane,
    #[serde(rename = "Support")]
    Support,
    #[serde(rename = "Hard Support")]
    HardSupport,
}

impl Role {
    /// Every role, in the order a team is listed
    pub const ALL: [Role; 5] = [
        Role::SafeLane,
        Role::Midlane,
        Role::Offlane,
        Role::Support,
        Role::HardSupport,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::SafeLane => "Safe Lane",
            Role::Midlane => "Midlane",
            Role::Offlane => "Offlane",
            Role::Support => "Support",
            Role::HardSupport => "Hard Support",
        }
    }

    /// Enemy roles this role lanes against in the early game
    pub fn lane_opponents(&self) -> &'static [Role] {
        match self {
            Role::SafeLane | Role::HardSupport => &[Role::Offlane, Role::Support],
            Role::Midlane => &[Role::Midlane],
            Role::Offlane | Role::Support => &[Role::SafeLane, Role::HardSupport],
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for a role string outside the five known positions
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| UnknownRole(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_exact_names() {
        for role in Role::ALL {
            assert_eq!(role.as_str().parse::<Role>(), Ok(role));
        }
        assert!("safe lane".parse::<Role>().is_err());
        assert!("Carry".parse::<Role>().is_err());
    }

    #[test]
    fn test_lane_opponents() {
        assert_eq!(
            Role::HardSupport.lane_opponents(),
            &[Role::Offlane, Role::Support]
        );
        assert_eq!(Role::Midlane.lane_opponents(), &[Role::Midlane]);
        assert_eq!(
            Role::Support.lane_opponents(),
            &[Role::SafeLane, Role::HardSupport]
        );
    }

    #[test]
    fn test_serde_uses_display_names() {
        let json = serde_json::to_string(&Role::SafeLane).unwrap();
        assert_eq!(json, "\"Safe Lane\"");
        let role: Role = serde_json::from_str("\"Hard Support\"").unwrap();
        assert_eq!(role, Role::HardSupport);
    }
}
