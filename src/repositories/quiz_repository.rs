use std::future::Future;

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::doc,
    error::{ErrorKind, WriteFailure},
    options::{FindOneOptions, FindOptions, IndexOptions},
    Collection, IndexModel,
};

use crate::{
    db::Database,
    errors::{AppError, AppResult},
    models::domain::QuizResult,
};

const DUPLICATE_KEY: i32 = 11000;
const MAX_ID_BUMPS: u32 = 16;

/// Result of one insert attempt.
#[derive(Debug, PartialEq, Eq)]
pub enum Inserted {
    Stored,
    IdTaken,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuizRepository: Send + Sync {
    async fn save(&self, quiz: QuizResult) -> AppResult<QuizResult>;
    async fn find_by_id(&self, id: i64) -> AppResult<Option<QuizResult>>;
    /// Most recent quiz generated for `url`, if any.
    async fn find_by_url(&self, url: &str) -> AppResult<Option<QuizResult>>;
    /// Newest first.
    async fn list(&self, offset: i64, limit: i64) -> AppResult<Vec<QuizResult>>;
}

pub struct MongoQuizRepository {
    collection: Collection<QuizResult>,
}

impl MongoQuizRepository {
    pub fn new(db: &Database, collection_name: &str) -> Self {
        let collection = db.get_collection(collection_name);
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for quizzes collection");

        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();

        let url_index = IndexModel::builder()
            .keys(doc! { "url": 1, "id": -1 })
            .options(IndexOptions::builder().name("url_recent".to_string()).build())
            .build();

        self.collection.create_index(id_index).await?;
        self.collection.create_index(url_index).await?;

        log::info!("Successfully created indexes for quizzes collection");
        Ok(())
    }
}

#[async_trait]
impl QuizRepository for MongoQuizRepository {
    async fn save(&self, quiz: QuizResult) -> AppResult<QuizResult> {
        let collection = self.collection.clone();

        save_with_free_id(quiz, move |candidate| {
            let collection = collection.clone();
            async move {
                match collection.insert_one(&candidate).await {
                    Ok(_) => Ok(Inserted::Stored),
                    Err(e) if is_duplicate_key(&e) => Ok(Inserted::IdTaken),
                    Err(e) => Err(e.into()),
                }
            }
        })
        .await
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<QuizResult>> {
        let quiz = self.collection.find_one(doc! { "id": id }).await?;
        Ok(quiz)
    }

    async fn find_by_url(&self, url: &str) -> AppResult<Option<QuizResult>> {
        let options = FindOneOptions::builder().sort(doc! { "id": -1 }).build();

        let quiz = self
            .collection
            .find_one(doc! { "url": url })
            .with_options(options)
            .await?;
        Ok(quiz)
    }

    async fn list(&self, offset: i64, limit: i64) -> AppResult<Vec<QuizResult>> {
        let find_options = FindOptions::builder()
            .sort(doc! { "id": -1 })
            .skip(Some(offset.max(0) as u64))
            .limit(Some(limit))
            .build();

        let cursor = self.collection.find(doc! {}).with_options(find_options).await?;
        let items: Vec<QuizResult> = cursor.try_collect().await?;

        Ok(items)
    }
}

/// Ids are creation millis, so two quizzes saved in the same millisecond
/// collide on the unique index. The later one moves to the next free id.
pub async fn save_with_free_id<F, Fut>(mut quiz: QuizResult, mut insert: F) -> AppResult<QuizResult>
where
    F: FnMut(QuizResult) -> Fut,
    Fut: Future<Output = AppResult<Inserted>>,
{
    for _ in 0..MAX_ID_BUMPS {
        match insert(quiz.clone()).await? {
            Inserted::Stored => return Ok(quiz),
            Inserted::IdTaken => {
                log::debug!("Quiz id {} is taken, trying {}", quiz.id, quiz.id + 1);
                quiz.id += 1;
            }
        }
    }

    Err(AppError::DatabaseError(format!(
        "no free quiz id found after {} attempts, last tried {}",
        MAX_ID_BUMPS, quiz.id
    )))
}

fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    matches!(
        err.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(write_error)) if write_error.code == DUPLICATE_KEY
    )
}
