use std::env;
use std::fs;

use anyhow::{bail, Context, Result};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dota_coach::coach::{build_prompt, validate_lineup, PromptContext};
use dota_coach::data::StaticHeroSource;
use dota_coach::models::TipsRequest;

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "prompt_preview=info,dota_coach=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args: Vec<String> = env::args().collect();
    let Some(path) = args.get(1) else {
        bail!("Usage: prompt_preview <lineup.json>");
    };

    let content = fs::read_to_string(path).with_context(|| format!("Failed to read {}", path))?;
    let request: TipsRequest =
        serde_json::from_str(&content).context("Failed to parse lineup JSON")?;

    let data = StaticHeroSource::game_data();
    let lineup = validate_lineup(&request, &data)?;
    let you = lineup.you();
    let context = PromptContext::from_game_data(&data, &you.hero, you.role);

    info!("Building prompt for {} ({})", you.hero, you.role);

    println!("{}", build_prompt(&lineup, &context));
    Ok(())
}
