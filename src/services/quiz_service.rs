use std::sync::Arc;

use crate::{
    errors::{AppError, AppResult},
    models::domain::QuizResult,
    repositories::QuizRepository,
    services::{
        article_fetcher::{validate_wikipedia_url, ArticleSource},
        quiz_assembler::QuizAssembler,
    },
};

pub struct QuizService {
    repository: Arc<dyn QuizRepository>,
    fetcher: Arc<dyn ArticleSource>,
    assembler: QuizAssembler,
}

impl QuizService {
    pub fn new(
        repository: Arc<dyn QuizRepository>,
        fetcher: Arc<dyn ArticleSource>,
        assembler: QuizAssembler,
    ) -> Self {
        Self {
            repository,
            fetcher,
            assembler,
        }
    }

    /// URL check, cache lookup, fetch, generate, store.
    pub async fn generate_quiz(&self, url: &str) -> AppResult<QuizResult> {
        let url = validate_wikipedia_url(url)?.to_string();

        if let Some(cached) = self.repository.find_by_url(&url).await? {
            log::info!("Returning stored quiz {} for {}", cached.id, url);
            return Ok(cached);
        }

        let document = self.fetcher.fetch(&url).await?;
        let quiz = self.assembler.generate(&document).await?;

        let saved = self.repository.save(quiz).await?;
        log::info!("Generated quiz {} for '{}'", saved.id, saved.title);

        Ok(saved)
    }

    pub async fn list_quizzes(&self, offset: i64, limit: i64) -> AppResult<Vec<QuizResult>> {
        self.repository.list(offset, limit).await
    }

    pub async fn get_quiz(&self, id: i64) -> AppResult<QuizResult> {
        let quiz = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Quiz with id '{}' not found", id)))?;

        Ok(quiz)
    }
}
