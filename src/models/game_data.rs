use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::Hero;

/// OpenDota skill bracket (the `N_pick` / `N_win` index in hero stats)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RankBracket {
    Herald,
    Guardian,
    Crusader,
    Archon,
    Legend,
    Ancient,
    Divine,
    Immortal,
}

impl RankBracket {
    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            1 => Some(RankBracket::Herald),
            2 => Some(RankBracket::Guardian),
            3 => Some(RankBracket::Crusader),
            4 => Some(RankBracket::Archon),
            5 => Some(RankBracket::Legend),
            6 => Some(RankBracket::Ancient),
            7 => Some(RankBracket::Divine),
            8 => Some(RankBracket::Immortal),
            _ => None,
        }
    }

    pub fn index(&self) -> u8 {
        match self {
            RankBracket::Herald => 1,
            RankBracket::Guardian => 2,
            RankBracket::Crusader => 3,
            RankBracket::Archon => 4,
            RankBracket::Legend => 5,
            RankBracket::Ancient => 6,
            RankBracket::Divine => 7,
            RankBracket::Immortal => 8,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RankBracket::Herald => "Herald",
            RankBracket::Guardian => "Guardian",
            RankBracket::Crusader => "Crusader",
            RankBracket::Archon => "Archon",
            RankBracket::Legend => "Legend",
            RankBracket::Ancient => "Ancient",
            RankBracket::Divine => "Divine",
            RankBracket::Immortal => "Immortal",
        }
    }
}

impl fmt::Display for RankBracket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A hero ability with a few headline numbers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ability {
    pub name: String,
    pub description: Option<String>,
    pub stats: Vec<AbilityStat>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbilityStat {
    /// Label without the trailing colon (e.g., "DAMAGE")
    pub label: String,
    /// Per-level values joined with " / "
    pub value: String,
}

/// A purchasable item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Provider key (e.g., "black_king_bar")
    pub key: String,
    pub name: String,
    pub cost: Option<u32>,
    /// Human-readable bonuses (e.g., "+10 Strength")
    pub attributes: Vec<String>,
}

/// Pick/win totals for one hero in one bracket
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetaStats {
    pub bracket: RankBracket,
    pub picks: u64,
    pub wins: u64,
}

impl MetaStats {
    /// Win rate in the range 0.0 - 1.0, None when nobody picked the hero
    pub fn win_rate(&self) -> Option<f64> {
        if self.picks == 0 {
            None
        } else {
            Some(self.wins as f64 / self.picks as f64)
        }
    }
}

/// Everything the coach knows about the current game, as of one fetch
///
/// Only built through [`GameData::new`], which keeps the hero list sorted for lookups.
#[derive(Debug, Clone, Serialize)]
pub struct GameData {
    /// Heroes sorted by name
    heroes: Vec<Hero>,

    /// Current patch label (e.g., "7.37")
    pub patch: Option<String>,

    /// Abilities keyed by hero name, in slot order
    pub abilities: HashMap<String, Vec<Ability>>,

    /// Items keyed by provider key
    pub items: HashMap<String, Item>,

    /// Meta statistics keyed by hero name
    pub meta: HashMap<String, MetaStats>,

    /// When the source produced this data
    pub fetched_at: DateTime<Utc>,
}

impl GameData {
    /// Create data holding only a hero list
    pub fn new(mut heroes: Vec<Hero>) -> Self {
        heroes.sort_by(|a, b| a.localized_name.cmp(&b.localized_name));
        heroes.dedup_by(|a, b| a.localized_name == b.localized_name);

        Self {
            heroes,
            patch: None,
            abilities: HashMap::new(),
            items: HashMap::new(),
            meta: HashMap::new(),
            fetched_at: Utc::now(),
        }
    }

    pub fn heroes(&self) -> &[Hero] {
        &self.heroes
    }

    pub fn hero_names(&self) -> impl Iterator<Item = &str> {
        self.heroes.iter().map(|h| h.localized_name.as_str())
    }

    /// Exact, case-sensitive membership in the canonical hero set
    pub fn contains_hero(&self, name: &str) -> bool {
        self.heroes
            .binary_search_by(|h| h.localized_name.as_str().cmp(name))
            .is_ok()
    }

    pub fn abilities_of(&self, hero: &str) -> &[Ability] {
        self.abilities.get(hero).map(Vec::as_slice).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_hero_is_exact() {
        let data = GameData::new(vec![
            Hero::named("Zeus"),
            Hero::named("Anti-Mage"),
            Hero::named("Io"),
        ]);

        assert!(data.contains_hero("Anti-Mage"));
        assert!(data.contains_hero("Zeus"));
        assert!(!data.contains_hero("anti-mage"));
        assert!(!data.contains_hero("Anti-Mage "));
        assert_eq!(
            data.hero_names().collect::<Vec<_>>(),
            vec!["Anti-Mage", "Io", "Zeus"]
        );
    }

    #[test]
    fn test_every_hero_found_from_unsorted_input() {
        let mut names = crate::data::DOTA_HERO_NAMES.to_vec();
        names.reverse();
        names.push("Axe");

        let data = GameData::new(names.iter().map(|name| Hero::named(name)).collect());

        assert_eq!(data.heroes().len(), crate::data::DOTA_HERO_NAMES.len());
        for name in crate::data::DOTA_HERO_NAMES {
            assert!(data.contains_hero(name), "{} not found", name);
        }
    }

    #[test]
    fn test_win_rate() {
        let stats = MetaStats {
            bracket: RankBracket::Legend,
            picks: 200,
            wins: 104,
        };
        assert_eq!(stats.win_rate(), Some(0.52));

        let unpicked = MetaStats {
            picks: 0,
            wins: 0,
            ..stats
        };
        assert_eq!(unpicked.win_rate(), None);
    }

    #[test]
    fn test_bracket_index_round_trip() {
        for index in 1..=8 {
            let bracket = RankBracket::from_index(index).unwrap();
            assert_eq!(bracket.index(), index);
        }
        assert_eq!(RankBracket::from_index(0), None);
        assert_eq!(RankBracket::from_index(9), None);
    }
}
