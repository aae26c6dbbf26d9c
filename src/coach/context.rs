use crate::data::role_item_keys;
use crate::models::{Ability, GameData, Item, MetaStats, Role};

/// How many abilities the prompt describes
pub const MAX_ABILITIES: usize = 4;

/// How many numbers are quoted per ability
pub const MAX_ABILITY_STATS: usize = 3;

/// Game data relevant to one player's hero and role
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PromptContext {
    pub patch: Option<String>,
    pub abilities: Vec<Ability>,
    pub items: Vec<Item>,
    pub meta: Option<MetaStats>,
}

impl PromptContext {
    pub fn from_game_data(data: &GameData, hero: &str, role: Role) -> Self {
        let abilities = data
            .abilities_of(hero)
            .iter()
            .take(MAX_ABILITIES)
            .map(|ability| Ability {
                stats: ability
                    .stats
                    .iter()
                    .take(MAX_ABILITY_STATS)
                    .cloned()
                    .collect(),
                ..ability.clone()
            })
            .collect();

        let items = role_item_keys(role)
            .iter()
            .filter_map(|key| data.items.get(*key))
            .cloned()
            .collect();

        let meta = data
            .meta
            .get(hero)
            .copied()
            .filter(|stats| stats.picks > 0);

        Self {
            patch: data.patch.clone(),
            abilities,
            items,
            meta,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.patch.is_none() && self.abilities.is_empty() && self.items.is_empty() && self.meta.is_none()
    }
}
