use std::env;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};

use crate::models::RankBracket;

/// Where hero data comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeroDataSource {
    /// OpenDota heroes, abilities, items and meta stats
    OpenDota,
    /// Built-in hero names only, no network
    Static,
}

impl FromStr for HeroDataSource {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "opendota" => Ok(HeroDataSource::OpenDota),
            "static" => Ok(HeroDataSource::Static),
            other => bail!("HERO_DATA_SOURCE must be opendota or static, got {:?}", other),
        }
    }
}

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Port the HTTP server binds on 0.0.0.0
    pub port: u16,

    /// Google AI Studio key for Gemini
    pub google_api_key: String,

    /// Gemini REST base URL
    pub gemini_api_url: String,

    /// Gemini model name
    pub gemini_model: String,

    /// Timeout for a single model call
    pub llm_timeout: Duration,

    pub hero_data_source: HeroDataSource,

    /// OpenDota REST API URL
    pub opendota_api_url: String,

    /// How long fetched game data stays fresh
    pub game_data_ttl: Duration,

    /// Rank bracket used for meta win rates
    pub meta_bracket: RankBracket,

    /// Directory holding the page served at /
    pub static_dir: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let meta_bracket: u8 = env::var("META_BRACKET")
            .unwrap_or_else(|_| "5".to_string())
            .parse()
            .context("META_BRACKET must be a valid number")?;

        Ok(Config {
            port: env::var("PORT")
                .unwrap_or_else(|_| "3002".to_string())
                .parse()
                .context("PORT must be a valid port number")?,

            google_api_key: env::var("GOOGLE_API_KEY")
                .context("GOOGLE_API_KEY must be set")?,

            gemini_api_url: env::var("GEMINI_API_URL").unwrap_or_else(|_| {
                "https://generativelanguage.googleapis.com/v1beta".to_string()
            }),

            gemini_model: env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| "gemini-2.5-flash".to_string()),

            llm_timeout: Duration::from_secs(
                env::var("LLM_TIMEOUT_SECS")
                    .unwrap_or_else(|_| "60".to_string())
                    .parse()
                    .context("LLM_TIMEOUT_SECS must be a valid number")?,
            ),

            hero_data_source: env::var("HERO_DATA_SOURCE")
                .unwrap_or_else(|_| "opendota".to_string())
                .parse()?,

            opendota_api_url: env::var("OPENDOTA_API_URL")
                .unwrap_or_else(|_| "https://api.opendota.com/api".to_string()),

            game_data_ttl: Duration::from_secs(
                env::var("GAME_DATA_TTL_SECS")
                    .unwrap_or_else(|_| "3600".to_string())
                    .parse()
                    .context("GAME_DATA_TTL_SECS must be a valid number")?,
            ),

            meta_bracket: RankBracket::from_index(meta_bracket)
                .ok_or_else(|| anyhow!("META_BRACKET must be between 1 and 8"))?,

            static_dir: env::var("STATIC_DIR").unwrap_or_else(|_| "static".to_string()),
        })
    }
}
