use std::collections::HashMap;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::cache::GameDataSource;
use crate::models::{Ability, AbilityStat, GameData, Hero, Item, MetaStats, RankBracket};

/// Hero icons in hero stats are paths on Valve's CDN
const STEAM_CDN_URL: &str = "https://cdn.cloudflare.steamstatic.com";

/// Client for OpenDota REST API (hero stats and game constants)
pub struct OpenDotaClient {
    client: Client,
    base_url: String,
    meta_bracket: RankBracket,
}

/// Hero entry from `/heroStats`
#[derive(Debug, Clone, Deserialize)]
pub struct HeroStats {
    pub id: i64,
    /// Internal name (e.g., "npc_dota_hero_antimage")
    pub name: String,
    pub localized_name: String,
    pub icon: Option<String>,
    /// Per-bracket counters such as `5_pick` and `5_win`
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

impl HeroStats {
    /// (picks, wins) in a bracket, zero when the provider omits them
    pub fn bracket_counts(&self, bracket: RankBracket) -> (u64, u64) {
        let count = |suffix: &str| {
            self.extra
                .get(&format!("{}_{}", bracket.index(), suffix))
                .and_then(Value::as_u64)
                .unwrap_or(0)
        };
        (count("pick"), count("win"))
    }
}

/// Entry from `/constants/hero_abilities`
#[derive(Debug, Clone, Deserialize)]
pub struct HeroAbilityList {
    #[serde(default)]
    pub abilities: Vec<String>,
}

/// Entry from `/constants/abilities`
#[derive(Debug, Clone, Deserialize)]
pub struct AbilityConstant {
    pub dname: Option<String>,
    pub desc: Option<String>,
    #[serde(default)]
    pub attrib: Vec<AbilityAttrib>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AbilityAttrib {
    pub header: Option<String>,
    pub value: Option<Value>,
}

/// Entry from `/constants/items`
#[derive(Debug, Clone, Deserialize)]
pub struct ItemConstant {
    pub dname: Option<String>,
    pub cost: Option<u32>,
    #[serde(default)]
    pub attrib: Vec<ItemAttrib>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ItemAttrib {
    pub display: Option<String>,
    pub value: Option<Value>,
}

/// Entry from `/constants/patch`
#[derive(Debug, Clone, Deserialize)]
pub struct PatchInfo {
    pub name: String,
}

/// Raw OpenDota responses needed to build a [`GameData`]
#[derive(Debug, Default)]
pub struct OpenDotaSnapshot {
    pub hero_stats: Vec<HeroStats>,
    pub hero_abilities: HashMap<String, HeroAbilityList>,
    pub abilities: HashMap<String, AbilityConstant>,
    pub items: HashMap<String, ItemConstant>,
    pub patches: Vec<PatchInfo>,
}

impl OpenDotaClient {
    /// Create a new OpenDota client
    pub fn new(base_url: &str, meta_bracket: RankBracket, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build OpenDota HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            meta_bracket,
        })
    }

    /// Get hero list with icons and per-bracket pick/win counts
    pub async fn get_hero_stats(&self) -> Result<Vec<HeroStats>> {
        self.get_json("/heroStats").await
    }

    /// Get ability names per hero, keyed by internal hero name
    pub async fn get_hero_abilities(&self) -> Result<HashMap<String, HeroAbilityList>> {
        self.get_json("/constants/hero_abilities").await
    }

    /// Get ability constants keyed by ability name
    pub async fn get_abilities(&self) -> Result<HashMap<String, AbilityConstant>> {
        self.get_json("/constants/abilities").await
    }

    /// Get item constants keyed by item name
    pub async fn get_items(&self) -> Result<HashMap<String, ItemConstant>> {
        self.get_json("/constants/items").await
    }

    /// Get every patch, oldest first
    pub async fn get_patches(&self) -> Result<Vec<PatchInfo>> {
        self.get_json("/constants/patch").await
    }

    /// Fetch everything the coach uses in one go
    pub async fn fetch_game_data(&self) -> Result<GameData> {
        let (hero_stats, hero_abilities, abilities, items, patches) = tokio::try_join!(
            self.get_hero_stats(),
            self.get_hero_abilities(),
            self.get_abilities(),
            self.get_items(),
            self.get_patches(),
        )?;

        let snapshot = OpenDotaSnapshot {
            hero_stats,
            hero_abilities,
            abilities,
            items,
            patches,
        };

        let data = snapshot.into_game_data(self.meta_bracket);

        info!(
            "OpenDota returned {} heroes, {} items, patch {}",
            data.heroes().len(),
            data.items.len(),
            data.patch.as_deref().unwrap_or("unknown")
        );

        Ok(data)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);

        debug!("Fetching OpenDota {}", url);

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await
            .with_context(|| format!("Failed to fetch OpenDota {}", path))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            anyhow::bail!("OpenDota API error: {} - {}", status, text);
        }

        response
            .json()
            .await
            .with_context(|| format!("Failed to parse OpenDota {} response", path))
    }
}

#[async_trait]
impl GameDataSource for OpenDotaClient {
    fn name(&self) -> &'static str {
        "opendota"
    }

    async fn fetch(&self) -> Result<GameData> {
        self.fetch_game_data().await
    }
}

impl OpenDotaSnapshot {
    /// Convert raw provider data to our model
    pub fn into_game_data(self, bracket: RankBracket) -> GameData {
        let heroes = self
            .hero_stats
            .iter()
            .map(|h| Hero {
                localized_name: h.localized_name.clone(),
                icon: h
                    .icon
                    .as_ref()
                    .map(|path| format!("{}{}", STEAM_CDN_URL, path)),
            })
            .collect();

        let mut data = GameData::new(heroes);

        data.patch = self.patches.last().map(|p| p.name.clone());

        for hero in &self.hero_stats {
            let (picks, wins) = hero.bracket_counts(bracket);
            data.meta.insert(
                hero.localized_name.clone(),
                MetaStats {
                    bracket,
                    picks,
                    wins,
                },
            );

            let Some(list) = self.hero_abilities.get(&hero.name) else {
                continue;
            };

            let abilities: Vec<Ability> = list
                .abilities
                .iter()
                .filter_map(|key| self.abilities.get(key))
                .filter_map(convert_ability)
                .collect();

            if !abilities.is_empty() {
                data.abilities.insert(hero.localized_name.clone(), abilities);
            }
        }

        for (key, item) in self.items {
            if let Some(item) = convert_item(&key, item) {
                data.items.insert(key, item);
            }
        }

        data
    }
}

/// Hidden and placeholder abilities have no display name
fn convert_ability(ability: &AbilityConstant) -> Option<Ability> {
    let name = ability.dname.as_deref()?.trim();
    if name.is_empty() {
        return None;
    }

    let stats = ability
        .attrib
        .iter()
        .filter_map(|attrib| {
            let label = attrib.header.as_deref()?.trim().trim_end_matches(':').trim();
            let value = value_text(attrib.value.as_ref()?)?;
            if label.is_empty() {
                return None;
            }
            Some(AbilityStat {
                label: label.to_string(),
                value,
            })
        })
        .collect();

    Some(Ability {
        name: name.to_string(),
        description: ability
            .desc
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(str::to_string),
        stats,
    })
}

fn convert_item(key: &str, item: ItemConstant) -> Option<Item> {
    let name = item.dname?;

    let attributes = item
        .attrib
        .iter()
        .filter_map(|attrib| {
            let display = attrib.display.as_deref()?.trim();
            let value = attrib.value.as_ref().and_then(value_text);
            let text = match value {
                Some(value) if display.contains("{value}") => display.replace("{value}", &value),
                Some(value) => format!("{} {}", display, value),
                None => display.to_string(),
            };
            let text = text.trim().to_string();
            (!text.is_empty()).then_some(text)
        })
        .collect();

    Some(Item {
        key: key.to_string(),
        name,
        cost: item.cost,
        attributes,
    })
}

/// Render a constants value ("20 30 40", 12, or ["20", "30"]) as "20 / 30 / 40"
fn value_text(value: &Value) -> Option<String> {
    let parts: Vec<String> = match value {
        Value::String(s) => s.split_whitespace().map(str::to_string).collect(),
        Value::Number(n) => vec![n.to_string()],
        Value::Array(values) => values
            .iter()
            .filter_map(|v| match v {
                Value::String(s) => Some(s.trim().to_string()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
            .filter(|s| !s.is_empty())
            .collect(),
        _ => Vec::new(),
    };

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" / "))
    }
}
