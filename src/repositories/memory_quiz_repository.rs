use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{errors::AppResult, models::domain::QuizResult, repositories::QuizRepository};

/// Keeps nothing. Saving is a no-op, lists are empty and every lookup misses.
#[derive(Debug, Default)]
pub struct DisabledQuizRepository;

#[async_trait]
impl QuizRepository for DisabledQuizRepository {
    async fn save(&self, quiz: QuizResult) -> AppResult<QuizResult> {
        Ok(quiz)
    }

    async fn find_by_id(&self, _id: i64) -> AppResult<Option<QuizResult>> {
        Ok(None)
    }

    async fn find_by_url(&self, _url: &str) -> AppResult<Option<QuizResult>> {
        Ok(None)
    }

    async fn list(&self, _offset: i64, _limit: i64) -> AppResult<Vec<QuizResult>> {
        Ok(Vec::new())
    }
}

/// Process-local store, lost on restart. Ids are creation millis, so a
/// colliding id is bumped to the next free value.
#[derive(Debug, Default)]
pub struct InMemoryQuizRepository {
    quizzes: RwLock<BTreeMap<i64, QuizResult>>,
}

impl InMemoryQuizRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl QuizRepository for InMemoryQuizRepository {
    async fn save(&self, mut quiz: QuizResult) -> AppResult<QuizResult> {
        let mut quizzes = self.quizzes.write().await;
        while quizzes.contains_key(&quiz.id) {
            quiz.id += 1;
        }
        quizzes.insert(quiz.id, quiz.clone());
        Ok(quiz)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<QuizResult>> {
        let quizzes = self.quizzes.read().await;
        Ok(quizzes.get(&id).cloned())
    }

    async fn find_by_url(&self, url: &str) -> AppResult<Option<QuizResult>> {
        let quizzes = self.quizzes.read().await;
        Ok(quizzes.values().rev().find(|q| q.url == url).cloned())
    }

    async fn list(&self, offset: i64, limit: i64) -> AppResult<Vec<QuizResult>> {
        let quizzes = self.quizzes.read().await;
        Ok(quizzes
            .values()
            .rev()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .cloned()
            .collect())
    }
}
