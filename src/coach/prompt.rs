use std::fmt::Write;

use crate::coach::PromptContext;
use crate::models::{Lineup, Role, TeamSlot};

/// Markdown headings the page expects in every answer, in order
pub const SECTION_HEADINGS: [&str; 6] = [
    "Overview & Core Strategy",
    "Early Game (Laning Phase)",
    "Mid Game (~10-25 minutes)",
    "Late Game (25+ minutes)",
    "Item Build Suggestions",
    "Key Matchup Considerations",
];

/// Build the coaching prompt for the first player of `my_team`
pub fn build_prompt(lineup: &Lineup, context: &PromptContext) -> String {
    let you = lineup.you();
    let hero = &you.hero;
    let role = you.role;
    let my_team = format_team(&lineup.my_team);
    let opponent_team = format_team(&lineup.opponent_team);
    let lane_matchup = lane_matchup(lineup);
    let context_block = render_context(hero, role, context);

    format!(
        "
You are a Dota 2 expert coach, provide advice for playing {hero} as the {role} in a specific match.
My team composition is: {my_team}.
The opponent team composition is: {opponent_team}.
{context_block}
**Assume the player understands Dota 2 basics but is not an expert (e.g., around Archon/Legend rank or learning the hero). Explain key concepts clearly and prioritize standard item builds and reliable strategies based on the provided roles.**
**IMPORTANT: Only suggest items currently available in the latest Dota 2 patch. Do NOT mention removed items.**

Please structure your advice clearly using the following Markdown headings exactly:

### Overview & Core Strategy
(Brief summary of the overall game plan for {hero} in this matchup, focusing on the most important goals for a less experienced player in the {role} position)

### Early Game (Laning Phase)
(Tips for the first ~10 minutes. {lane_matchup} Focus on standard starting items, basic laning approach against them, simple kill opportunities, and common threats to avoid)

### Mid Game (~10-25 minutes)
(Focus on safe objectives, core item progression, basic positioning in teamfights, and when to join fights vs. farm, all tailored to the {role} role)

### Late Game (25+ minutes)
(Standard late-game item choices, simplified teamfight role, focusing on key objectives like Roshan or defending high ground, and 1-2 critical opponent abilities to be aware of, considering the {role})

### Item Build Suggestions
(Provide a list of standard core items and key situational items *currently in the game*, explaining *why* they are good in this specific role and matchup for this skill level)

### Key Matchup Considerations
(Highlight 1-2 crucial interactions, counters, or synergies most relevant to a beginner/intermediate player in the {role} role against the enemy team composition)

Be specific and actionable, but avoid overly complex or highly advanced tactics. Explain the reasoning simply. Focus on advice relevant to this exact lineup and role configuration. Avoid generic hero descriptions.
"
    )
}

/// "You will be laning against X and Y." for the player's role
pub fn lane_matchup(lineup: &Lineup) -> String {
    let opponents: Vec<&str> = lineup
        .you()
        .role
        .lane_opponents()
        .iter()
        .filter_map(|role| lineup.opponent_in(*role))
        .collect();

    format!("You will be laning against {}.", opponents.join(" and "))
}

/// "Hero (Role), Hero (Role), ..."
pub fn format_team(team: &[TeamSlot]) -> String {
    team.iter()
        .map(|slot| format!("{} ({})", slot.hero, slot.role))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Game data block placed between the compositions and the instructions
///
/// Empty when there is nothing to say, which leaves the template untouched.
fn render_context(hero: &str, role: Role, context: &PromptContext) -> String {
    if context.is_empty() {
        return String::new();
    }

    let mut out = String::from(
        "\n**Game Data Context (from the current patch, prefer it over older knowledge):**\n",
    );

    // Writing to a String cannot fail
    if let Some(patch) = &context.patch {
        let _ = writeln!(out, "- Current patch: {}", patch);
    }

    if let Some(meta) = &context.meta {
        if let Some(rate) = meta.win_rate() {
            let _ = writeln!(
                out,
                "- Meta win rate for {} in {} games: {:.1}% over {} matches",
                hero,
                meta.bracket,
                rate * 100.0,
                meta.picks
            );
        }
    }

    if !context.abilities.is_empty() {
        let _ = writeln!(out, "- {} abilities:", hero);
        for ability in &context.abilities {
            let mut line = format!("  - {}", ability.name);
            if let Some(description) = &ability.description {
                let _ = write!(line, ": {}", single_line(description));
            }
            if !ability.stats.is_empty() {
                let stats: Vec<String> = ability
                    .stats
                    .iter()
                    .map(|s| format!("{}: {}", s.label, s.value))
                    .collect();
                let _ = write!(line, " ({})", stats.join("; "));
            }
            let _ = writeln!(out, "{}", line);
        }
    }

    if !context.items.is_empty() {
        let _ = writeln!(out, "- Items commonly built in the {} role:", role);
        for item in &context.items {
            let mut line = format!("  - {}", item.name);
            if let Some(cost) = item.cost {
                let _ = write!(line, " ({} gold)", cost);
            }
            if !item.attributes.is_empty() {
                let _ = write!(line, ": {}", item.attributes.join(", "));
            }
            let _ = writeln!(out, "{}", line);
        }
    }

    out
}

fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
