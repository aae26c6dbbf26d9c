use std::collections::HashMap;

use serde::Serialize;

use crate::matching::HeroNormalizer;
use crate::models::lineup::TEAM_SIZE;
use crate::models::{Role, SlotInput, TipsRequest};

/// Your hero, four allies, five opponents
pub const HERO_FIELD_COUNT: usize = TEAM_SIZE * 2;

pub const EMPTY_FIELDS_MESSAGE: &str = "All hero fields must be filled.";

/// Outcome of checking a set of hero fields
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct FieldReport {
    /// One flag per field, true when the field should be decorated as invalid
    pub invalid: Vec<bool>,
    /// First error met while scanning fields in order
    pub first_error: Option<String>,
}

impl FieldReport {
    pub fn is_valid(&self) -> bool {
        !self.invalid.iter().any(|&flag| flag)
    }
}

/// Check hero fields in order, flagging every bad field
///
/// Empty fields are always flagged but only produce a message on the final
/// check. A duplicate flags both the current and the earlier field.
pub fn validate_hero_fields<S: AsRef<str>>(
    values: &[S],
    normalizer: &HeroNormalizer,
    is_final_check: bool,
) -> FieldReport {
    let mut invalid = vec![false; values.len()];
    let mut first_error = None;
    let mut selections: HashMap<&str, usize> = HashMap::new();

    for (index, value) in values.iter().enumerate() {
        let hero = value.as_ref().trim();

        let field_error = if hero.is_empty() {
            invalid[index] = true;
            is_final_check.then(|| EMPTY_FIELDS_MESSAGE.to_string())
        } else if !normalizer.is_canonical(hero) {
            invalid[index] = true;
            Some(format!("\"{}\" is not a valid hero.", hero))
        } else if let Some(&earlier) = selections.get(hero) {
            invalid[index] = true;
            invalid[earlier] = true;
            Some(format!("\"{}\" selected multiple times.", hero))
        } else {
            selections.insert(hero, index);
            None
        };

        if first_error.is_none() {
            first_error = field_error;
        }
    }

    FieldReport {
        invalid,
        first_error,
    }
}

/// State of the lineup form: ten hero fields, their roles, and error display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineupForm {
    heroes: [String; HERO_FIELD_COUNT],
    roles: [Role; HERO_FIELD_COUNT],
    invalid: [bool; HERO_FIELD_COUNT],
    error_message: String,
}

impl LineupForm {
    /// Empty form with both teams in standard role order
    pub fn new() -> Self {
        let mut roles = [Role::SafeLane; HERO_FIELD_COUNT];
        for (index, role) in roles.iter_mut().enumerate() {
            *role = Role::ALL[index % TEAM_SIZE];
        }

        Self {
            heroes: Default::default(),
            roles,
            invalid: [false; HERO_FIELD_COUNT],
            error_message: String::new(),
        }
    }

    pub fn hero(&self, index: usize) -> &str {
        &self.heroes[index]
    }

    pub fn role(&self, index: usize) -> Role {
        self.roles[index]
    }

    pub fn is_invalid(&self, index: usize) -> bool {
        self.invalid[index]
    }

    /// Page-level error line, if any
    pub fn error_message(&self) -> Option<&str> {
        (!self.error_message.is_empty()).then_some(self.error_message.as_str())
    }

    /// The user typed into a field
    pub fn input(&mut self, index: usize, value: &str) {
        self.heroes[index] = value.to_string();
        self.invalid[index] = false;
        self.error_message.clear();
    }

    /// A field lost focus: auto-correct it, then re-check every field quietly
    pub fn blur(&mut self, index: usize, normalizer: &HeroNormalizer) {
        self.heroes[index] = normalizer.normalize(&self.heroes[index]);
        self.validate(normalizer, false);
    }

    /// Assign a role to a slot; whoever on that team held it takes the old one
    pub fn set_role(&mut self, index: usize, role: Role) {
        let team_start = index - index % TEAM_SIZE;
        let previous = self.roles[index];

        if let Some(holder) =
            (team_start..team_start + TEAM_SIZE).find(|&i| i != index && self.roles[i] == role)
        {
            self.roles[holder] = previous;
        }

        self.roles[index] = role;
    }

    /// The page-level role selector: the user's own position
    pub fn set_your_role(&mut self, role: Role) {
        self.set_role(0, role);
    }

    /// Run validation over all fields; the error line changes only on final checks
    pub fn validate(&mut self, normalizer: &HeroNormalizer, is_final_check: bool) -> bool {
        let report = validate_hero_fields(&self.heroes, normalizer, is_final_check);

        for (flag, invalid) in self.invalid.iter_mut().zip(&report.invalid) {
            *flag = *invalid;
        }

        if is_final_check {
            self.error_message = report.first_error.clone().unwrap_or_default();
        }

        report.is_valid()
    }

    /// Final check; the payload for `/api/get-tips` when everything is valid
    pub fn submit(&mut self, normalizer: &HeroNormalizer) -> Option<TipsRequest> {
        if !self.validate(normalizer, true) {
            return None;
        }

        let slots: Vec<SlotInput> = self
            .heroes
            .iter()
            .zip(&self.roles)
            .map(|(hero, role)| SlotInput::new(hero.trim(), role.as_str()))
            .collect();
        let (mine, theirs) = slots.split_at(TEAM_SIZE);

        Some(TipsRequest {
            my_team: Some(mine.to_vec()),
            opponent_team: Some(theirs.to_vec()),
        })
    }

    /// Reset every field, role and error
    pub fn clear(&mut self) {
        *self = Self::new();
    }
}

impl Default for LineupForm {
    fn default() -> Self {
        Self::new()
    }
}
