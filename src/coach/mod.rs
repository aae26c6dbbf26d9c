pub mod context;
pub mod prompt;
pub mod validation;

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::cache::GameDataCache;
use crate::error::{AppError, AppResult, ModelError};
use crate::models::TipsRequest;

pub use context::PromptContext;
pub use prompt::build_prompt;
pub use validation::{check_heroes, check_structure, validate_lineup};

/// A language model that turns a prompt into coaching text
#[async_trait]
pub trait TipsModel: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, ModelError>;
}

/// Validates lineups, builds prompts and relays the model's answer
pub struct Coach {
    cache: Arc<GameDataCache>,
    model: Arc<dyn TipsModel>,
}

impl Coach {
    pub fn new(cache: Arc<GameDataCache>, model: Arc<dyn TipsModel>) -> Self {
        Self { cache, model }
    }

    pub fn cache(&self) -> &GameDataCache {
        &self.cache
    }

    /// Produce tips for a submitted lineup
    pub async fn tips(&self, request: &TipsRequest) -> AppResult<String> {
        let lineup = check_structure(request)?;

        let data = self
            .cache
            .get()
            .await
            .map_err(AppError::GameDataUnavailable)?;

        check_heroes(&lineup, &data)?;

        info!(
            "Lineup validated: {} vs {}",
            prompt::format_team(&lineup.my_team),
            prompt::format_team(&lineup.opponent_team)
        );

        let you = lineup.you();
        let context = PromptContext::from_game_data(&data, &you.hero, you.role);
        let prompt = build_prompt(&lineup, &context);

        let tips = self.model.generate(&prompt).await?;

        info!("Model returned {} chars of tips for {}", tips.len(), you.hero);

        Ok(tips)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    use anyhow::Result;

    use super::*;
    use crate::cache::GameDataSource;
    use crate::coach::validation::tests::valid_request;
    use crate::coach::validation::STRUCTURE_ERROR;
    use crate::data::StaticHeroSource;
    use crate::models::GameData;

    /// Model that records prompts and answers with a fixed result
    struct FakeModel {
        answer: Result<String, ModelError>,
        prompts: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl TipsModel for FakeModel {
        async fn generate(&self, prompt: &str) -> Result<String, ModelError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.answer.clone()
        }
    }

    struct DownSource;

    /// Unreachable source that counts fetch attempts
    #[derive(Default)]
    struct CountingDownSource {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl GameDataSource for CountingDownSource {
        fn name(&self) -> &'static str {
            "counting"
        }

        async fn fetch(&self) -> Result<GameData> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            anyhow::bail!("connection refused")
        }
    }

    #[async_trait]
    impl GameDataSource for DownSource {
        fn name(&self) -> &'static str {
            "down"
        }

        async fn fetch(&self) -> Result<GameData> {
            anyhow::bail!("connection refused")
        }
    }

    fn coach(source: Arc<dyn GameDataSource>, answer: Result<String, ModelError>) -> (Coach, Arc<FakeModel>) {
        let model = Arc::new(FakeModel {
            answer,
            prompts: Mutex::new(Vec::new()),
        });
        let cache = Arc::new(GameDataCache::new(source, Duration::from_secs(3600)));
        (Coach::new(cache, model.clone()), model)
    }

    #[tokio::test]
    async fn test_relays_tips_verbatim() {
        let (coach, model) = coach(Arc::new(StaticHeroSource), Ok("### Overview\n*farm*".into()));

        let tips = coach.tips(&valid_request()).await.unwrap();

        assert_eq!(tips, "### Overview\n*farm*");
        let prompts = model.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("playing Anti-Mage as the Safe Lane"));
    }

    #[tokio::test]
    async fn test_invalid_lineup_never_reaches_model() {
        let (coach, model) = coach(Arc::new(StaticHeroSource), Ok(String::new()));
        let mut request = valid_request();
        request.my_team.as_mut().unwrap()[3].hero = Some("Hoodwinkk".into());

        let err = coach.tips(&request).await.unwrap_err();

        assert!(matches!(err, AppError::BadRequest(ref m) if m.contains("Hoodwinkk")));
        assert!(model.prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_game_data() {
        let (coach, _) = coach(Arc::new(DownSource), Ok(String::new()));

        let err = coach.tips(&valid_request()).await.unwrap_err();

        assert!(matches!(err, AppError::GameDataUnavailable(_)));
    }

    #[tokio::test]
    async fn test_malformed_lineup_rejected_without_game_data() {
        let source = Arc::new(CountingDownSource::default());
        let (coach, model) = coach(source.clone(), Ok(String::new()));
        let mut request = valid_request();
        request.my_team.as_mut().unwrap().pop();

        let err = coach.tips(&request).await.unwrap_err();

        assert!(matches!(err, AppError::BadRequest(ref m) if m == STRUCTURE_ERROR));
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
        assert!(model.prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_empty_selection_rejected_without_game_data() {
        let (coach, _) = coach(Arc::new(DownSource), Ok(String::new()));
        let mut request = valid_request();
        request.opponent_team.as_mut().unwrap()[0].hero = Some(" ".into());

        let err = coach.tips(&request).await.unwrap_err();

        assert!(matches!(
            err,
            AppError::BadRequest(ref m) if m == "All hero and role selections must be non-empty."
        ));
    }

    #[tokio::test]
    async fn test_model_error_passes_through() {
        let (coach, _) = coach(Arc::new(StaticHeroSource), Err(ModelError::Malformed));

        let err = coach.tips(&valid_request()).await.unwrap_err();

        assert!(matches!(err, AppError::Model(ModelError::Malformed)));
    }
}
