use std::collections::HashSet;

use crate::error::{AppError, AppResult};
use crate::models::lineup::TEAM_SIZE;
use crate::models::{GameData, Lineup, Role, SlotInput, TeamSlot, TipsRequest};

pub const STRUCTURE_ERROR: &str =
    "Invalid input structure. Requires myTeam and opponentTeam arrays of size 5.";

/// Re-validate a submitted lineup against the canonical hero set
///
/// Shape checks run first, then hero names, and the first failure is returned.
pub fn validate_lineup(request: &TipsRequest, data: &GameData) -> AppResult<Lineup> {
    let lineup = check_structure(request)?;
    check_heroes(&lineup, data)?;
    Ok(lineup)
}

/// Every check that needs no game data
///
/// Team sizes, non-empty values, role names, duplicate heroes, duplicate
/// roles and full role coverage, team by team, slot by slot.
pub fn check_structure(request: &TipsRequest) -> AppResult<Lineup> {
    let (Some(my_team), Some(opponent_team)) = (&request.my_team, &request.opponent_team) else {
        return Err(AppError::BadRequest(STRUCTURE_ERROR.to_string()));
    };

    if my_team.len() != TEAM_SIZE || opponent_team.len() != TEAM_SIZE {
        return Err(AppError::BadRequest(STRUCTURE_ERROR.to_string()));
    }

    let mut seen_heroes = HashSet::new();

    let my_team = check_team(my_team, &mut seen_heroes)?;
    let opponent_team = check_team(opponent_team, &mut seen_heroes)?;

    Ok(Lineup {
        my_team,
        opponent_team,
    })
}

/// Every hero must be in the canonical set, exact and case-sensitive
pub fn check_heroes(lineup: &Lineup, data: &GameData) -> AppResult<()> {
    match lineup
        .my_team
        .iter()
        .chain(&lineup.opponent_team)
        .find(|slot| !data.contains_hero(&slot.hero))
    {
        Some(slot) => Err(bad_request(format!(
            "Invalid hero name received: \"{}\".",
            slot.hero
        ))),
        None => Ok(()),
    }
}

fn check_team(
    team: &[SlotInput],
    seen_heroes: &mut HashSet<String>,
) -> AppResult<[TeamSlot; TEAM_SIZE]> {
    let mut roles = HashSet::new();
    let mut slots = Vec::with_capacity(TEAM_SIZE);

    for slot in team {
        let hero = slot.hero.as_deref().map(str::trim).unwrap_or_default();
        let role = slot.role.as_deref().map(str::trim).unwrap_or_default();

        if hero.is_empty() || role.is_empty() {
            return Err(bad_request(
                "All hero and role selections must be non-empty.".to_string(),
            ));
        }

        let role: Role = role
            .parse()
            .map_err(|_| bad_request(format!("Invalid role received: \"{}\".", role)))?;

        if !seen_heroes.insert(hero.to_string()) {
            return Err(bad_request(format!(
                "Duplicate hero detected: \"{}\".",
                hero
            )));
        }

        if !roles.insert(role) {
            return Err(bad_request(format!(
                "Duplicate role detected on a team: \"{}\".",
                role
            )));
        }

        slots.push(TeamSlot {
            hero: hero.to_string(),
            role,
        });
    }

    if roles.len() != Role::ALL.len() {
        return Err(bad_request(
            "Each team must have one of each role. Missing or duplicate roles found.".to_string(),
        ));
    }

    slots
        .try_into()
        .map_err(|_| bad_request(STRUCTURE_ERROR.to_string()))
}

fn bad_request(message: String) -> AppError {
    AppError::BadRequest(message)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::data::StaticHeroSource;

    pub(crate) fn team(entries: [(&str, &str); 5]) -> Vec<SlotInput> {
        entries
            .iter()
            .map(|(hero, role)| SlotInput::new(hero, role))
            .collect()
    }

    pub(crate) fn valid_request() -> TipsRequest {
        TipsRequest {
            my_team: Some(team([
                ("Anti-Mage", "Safe Lane"),
                ("Puck", "Midlane"),
                ("Mars", "Offlane"),
                ("Hoodwink", "Support"),
                ("Crystal Maiden", "Hard Support"),
            ])),
            opponent_team: Some(team([
                ("Juggernaut", "Safe Lane"),
                ("Invoker", "Midlane"),
                ("Axe", "Offlane"),
                ("Rubick", "Support"),
                ("Lion", "Hard Support"),
            ])),
        }
    }

    fn message(result: AppResult<Lineup>) -> String {
        match result {
            Err(AppError::BadRequest(message)) => message,
            other => panic!("expected a bad request, got {:?}", other),
        }
    }

    #[test]
    fn test_valid_lineup() {
        let data = StaticHeroSource::game_data();
        let lineup = validate_lineup(&valid_request(), &data).unwrap();

        assert_eq!(lineup.you().hero, "Anti-Mage");
        assert_eq!(lineup.you().role, Role::SafeLane);
        assert_eq!(lineup.opponent_in(Role::Offlane), Some("Axe"));
    }

    #[test]
    fn test_values_are_trimmed() {
        let data = StaticHeroSource::game_data();
        let mut request = valid_request();
        request.my_team.as_mut().unwrap()[0] = SlotInput::new("  Anti-Mage ", " Safe Lane");

        let lineup = validate_lineup(&request, &data).unwrap();
        assert_eq!(lineup.you().hero, "Anti-Mage");
    }

    #[test]
    fn test_structure() {
        let data = StaticHeroSource::game_data();

        let missing = TipsRequest {
            my_team: valid_request().my_team,
            opponent_team: None,
        };
        assert_eq!(message(validate_lineup(&missing, &data)), STRUCTURE_ERROR);

        let mut short = valid_request();
        short.opponent_team.as_mut().unwrap().pop();
        assert_eq!(message(validate_lineup(&short, &data)), STRUCTURE_ERROR);
    }

    #[test]
    fn test_empty_selection() {
        let data = StaticHeroSource::game_data();
        let mut request = valid_request();
        request.opponent_team.as_mut().unwrap()[2].role = Some("   ".to_string());

        assert_eq!(
            message(validate_lineup(&request, &data)),
            "All hero and role selections must be non-empty."
        );
    }

    #[test]
    fn test_unknown_hero_is_named() {
        let data = StaticHeroSource::game_data();
        let mut request = valid_request();
        request.my_team.as_mut().unwrap()[1].hero = Some("Pucky".to_string());

        assert_eq!(
            message(validate_lineup(&request, &data)),
            "Invalid hero name received: \"Pucky\"."
        );
    }

    #[test]
    fn test_unknown_role() {
        let data = StaticHeroSource::game_data();
        let mut request = valid_request();
        request.my_team.as_mut().unwrap()[0].role = Some("Carry".to_string());

        assert_eq!(
            message(validate_lineup(&request, &data)),
            "Invalid role received: \"Carry\"."
        );
    }

    #[test]
    fn test_duplicate_hero_across_teams() {
        let data = StaticHeroSource::game_data();
        let mut request = valid_request();
        request.opponent_team.as_mut().unwrap()[4].hero = Some("Crystal Maiden".to_string());

        assert_eq!(
            message(validate_lineup(&request, &data)),
            "Duplicate hero detected: \"Crystal Maiden\"."
        );
    }

    #[test]
    fn test_duplicate_role_within_team() {
        let data = StaticHeroSource::game_data();
        let mut request = valid_request();
        request.my_team.as_mut().unwrap()[4].role = Some("Support".to_string());

        assert_eq!(
            message(validate_lineup(&request, &data)),
            "Duplicate role detected on a team: \"Support\"."
        );
    }

    #[test]
    fn test_structure_needs_no_game_data() {
        let mut request = valid_request();
        request.my_team.as_mut().unwrap()[1].hero = Some("Pucky".to_string());

        let lineup = check_structure(&request).unwrap();
        assert_eq!(lineup.my_team[1].hero, "Pucky");

        let err = check_heroes(&lineup, &StaticHeroSource::game_data()).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(ref m) if m == "Invalid hero name received: \"Pucky\"."));
    }

    #[test]
    fn test_first_unknown_hero_is_reported() {
        let data = StaticHeroSource::game_data();
        let mut request = valid_request();
        request.my_team.as_mut().unwrap()[3].hero = Some("Hoodwinkk".to_string());
        request.opponent_team.as_mut().unwrap()[0].hero = Some("Jugg".to_string());

        assert_eq!(
            message(validate_lineup(&request, &data)),
            "Invalid hero name received: \"Hoodwinkk\"."
        );
    }
}
