pub mod game_data_cache;

use anyhow::Result;
use async_trait::async_trait;

use crate::models::GameData;

pub use game_data_cache::GameDataCache;

/// Somewhere hero/ability/item/meta data can be fetched from
#[async_trait]
pub trait GameDataSource: Send + Sync {
    /// Short label for logs and health output
    fn name(&self) -> &'static str;

    /// Fetch a complete dataset
    async fn fetch(&self) -> Result<GameData>;
}
