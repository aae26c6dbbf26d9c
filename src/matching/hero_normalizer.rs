use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Abbreviation table shipped with the crate
const BUILTIN_ALIASES_JSON: &str = include_str!("../../data/hero_aliases.json");

/// The shipped table, parsed on first use
static BUILTIN_ALIASES: LazyLock<Result<HeroAliases, String>> =
    LazyLock::new(|| serde_json::from_str(BUILTIN_ALIASES_JSON).map_err(|e| e.to_string()));

/// The one hero whose casing title-casing cannot produce
const KEEPER_OF_THE_LIGHT: &str = "Keeper of the Light";

/// Auto-corrects typed hero names towards canonical names
pub struct HeroNormalizer {
    /// Map of exact abbreviation -> canonical name
    abbreviations: HashMap<String, String>,
    /// Canonical hero names
    canonical: HashSet<String>,
}

/// Hero alias configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeroAliases {
    pub heroes: Vec<HeroAliasEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeroAliasEntry {
    /// Canonical hero name
    pub canonical: String,
    /// Accepted shorthands, matched exactly
    pub aliases: Vec<String>,
}

impl HeroNormalizer {
    /// Create a normalizer that knows the given heroes but no abbreviations
    pub fn new<I, S>(heroes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            abbreviations: HashMap::new(),
            canonical: heroes.into_iter().map(Into::into).collect(),
        }
    }

    /// Normalizer for the given heroes with the built-in abbreviation table
    pub fn builtin<I, S>(heroes: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut normalizer = Self::new(heroes);
        normalizer.add_aliases(builtin_aliases()?);
        Ok(normalizer)
    }

    /// Register every alias in a table
    pub fn add_aliases(&mut self, aliases: &HeroAliases) {
        let before = self.abbreviations.len();

        for entry in &aliases.heroes {
            for alias in &entry.aliases {
                self.add_abbreviation(alias, &entry.canonical);
            }
        }

        debug!(
            "Loaded {} hero abbreviations",
            self.abbreviations.len() - before
        );
    }

    /// Add a new abbreviation mapping
    pub fn add_abbreviation(&mut self, alias: &str, canonical: &str) {
        let alias = alias.trim().to_string();
        if let Some(previous) = self.abbreviations.insert(alias.clone(), canonical.to_string()) {
            if previous != canonical {
                warn!(
                    "Abbreviation {:?} remapped from {} to {}",
                    alias, previous, canonical
                );
            }
        }
    }

    /// Whether the name is exactly a canonical hero name
    pub fn is_canonical(&self, name: &str) -> bool {
        self.canonical.contains(name)
    }

    /// Best-effort canonical form of free text
    ///
    /// Registered abbreviations win outright. Otherwise whitespace is
    /// collapsed and one- or two-word input is title-cased; the title-cased
    /// form is used only when it names a known hero. Anything else comes back
    /// unchanged apart from whitespace so the validator can flag it.
    pub fn normalize(&self, input: &str) -> String {
        let trimmed = input.trim();

        if let Some(canonical) = self.abbreviations.get(trimmed) {
            return canonical.clone();
        }

        let collapsed = trimmed.split_whitespace().collect::<Vec<_>>().join(" ");

        if collapsed.eq_ignore_ascii_case(KEEPER_OF_THE_LIGHT) {
            return KEEPER_OF_THE_LIGHT.to_string();
        }

        let separator = if collapsed.contains('-') { '-' } else { ' ' };
        let words: Vec<&str> = collapsed.split(separator).collect();

        if words.len() <= 2 {
            let candidate = words
                .iter()
                .map(|word| title_case(word))
                .collect::<Vec<_>>()
                .join(&separator.to_string());

            if self.canonical.contains(&candidate) {
                return candidate;
            }
        }

        collapsed
    }
}

/// The built-in abbreviation table
pub fn builtin_aliases() -> Result<&'static HeroAliases> {
    BUILTIN_ALIASES
        .as_ref()
        .map_err(|e| anyhow!("Failed to parse hero aliases JSON: {}", e))
}

/// Upper-case the first character and lower-case the rest
fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::DOTA_HERO_NAMES;

    fn normalizer() -> HeroNormalizer {
        HeroNormalizer::builtin(DOTA_HERO_NAMES).unwrap()
    }

    #[test]
    fn test_abbreviations() {
        let normalizer = normalizer();

        assert_eq!(normalizer.normalize("am"), "Anti-Mage");
        assert_eq!(normalizer.normalize("AM"), "Anti-Mage");
        assert_eq!(normalizer.normalize("  cm "), "Crystal Maiden");
        assert_eq!(normalizer.normalize("kotl"), "Keeper of the Light");
        assert_eq!(normalizer.normalize("qop"), "Queen of Pain");
        assert_eq!(normalizer.normalize("wisp"), "Io");
    }

    #[test]
    fn test_every_builtin_alias_maps_to_a_known_hero() {
        let normalizer = normalizer();
        for (alias, canonical) in &normalizer.abbreviations {
            assert!(
                normalizer.is_canonical(canonical),
                "{} -> {} is not a hero",
                alias,
                canonical
            );
            assert_eq!(&normalizer.normalize(alias), canonical);
        }
    }

    #[test]
    fn test_title_casing_two_words() {
        let normalizer = normalizer();

        assert_eq!(normalizer.normalize("crystal maiden"), "Crystal Maiden");
        assert_eq!(normalizer.normalize("CRYSTAL   maiden"), "Crystal Maiden");
        assert_eq!(normalizer.normalize("anti-mage"), "Anti-Mage");
        assert_eq!(normalizer.normalize("ANTI-MAGE"), "Anti-Mage");
        assert_eq!(normalizer.normalize("nature's prophet"), "Nature's Prophet");
        assert_eq!(normalizer.normalize("pudge"), "Pudge");
    }

    #[test]
    fn test_keeper_of_the_light_casing() {
        let normalizer = normalizer();

        assert_eq!(
            normalizer.normalize("KEEPER  of the  light"),
            "Keeper of the Light"
        );
    }

    #[test]
    fn test_three_words_are_left_alone() {
        let normalizer = normalizer();

        assert_eq!(normalizer.normalize("queen of pain"), "queen of pain");
        assert_eq!(normalizer.normalize("Queen Of Pain"), "Queen Of Pain");
        assert_eq!(normalizer.normalize("the crystal maiden"), "the crystal maiden");
    }

    #[test]
    fn test_unknown_input_is_only_collapsed() {
        let normalizer = normalizer();

        assert_eq!(normalizer.normalize("puk"), "puk");
        assert_eq!(normalizer.normalize(" shadow   fiendd "), "shadow fiendd");
        assert_eq!(normalizer.normalize(""), "");
    }

    #[test]
    fn test_exact_match_is_kept() {
        let normalizer = normalizer();

        assert_eq!(normalizer.normalize("Shadow Fiend"), "Shadow Fiend");
        assert!(normalizer.is_canonical("Shadow Fiend"));
        assert!(!normalizer.is_canonical("shadow fiend"));
    }

    #[test]
    fn test_builtin_table_is_parsed_once() {
        let first = builtin_aliases().unwrap();
        let second = builtin_aliases().unwrap();

        assert!(std::ptr::eq(first, second));
        assert!(first.heroes.iter().any(|entry| entry.canonical == "Anti-Mage"));
    }

    #[test]
    fn test_added_abbreviation() {
        let mut normalizer = HeroNormalizer::new(["Tinker"]);
        normalizer.add_abbreviation("boots", "Tinker");

        assert_eq!(normalizer.normalize("boots"), "Tinker");
        assert_eq!(normalizer.normalize("BOOTS"), "BOOTS");
    }
}
