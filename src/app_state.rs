use std::sync::Arc;

use crate::{
    config::{Config, QuizStore},
    db::Database,
    errors::AppResult,
    repositories::{
        DisabledQuizRepository, InMemoryQuizRepository, MongoQuizRepository, QuizRepository,
    },
    services::{
        article_fetcher::WikipediaFetcher,
        model_service::{OpenAiQuizModel, PlaceholderQuizModel, QuizModel},
        quiz_assembler::QuizAssembler,
        quiz_service::QuizService,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub quiz_service: Arc<QuizService>,
    pub db: Option<Database>,
    pub config: Arc<Config>,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        let (repository, db): (Arc<dyn QuizRepository>, Option<Database>) = match config.quiz_store
        {
            QuizStore::Disabled => {
                log::info!("Quiz store disabled, generated quizzes are not kept");
                (Arc::new(DisabledQuizRepository), None)
            }
            QuizStore::Memory => {
                log::info!("Keeping generated quizzes in memory");
                (Arc::new(InMemoryQuizRepository::new()), None)
            }
            QuizStore::Mongo => {
                let db = Database::connect(&config).await?;
                let repository = MongoQuizRepository::new(&db, &config.quizzes_collection);
                repository.ensure_indexes().await?;
                (Arc::new(repository), Some(db))
            }
        };

        let model: Arc<dyn QuizModel> = match &config.llm_api_key {
            Some(api_key) => {
                let model = OpenAiQuizModel::new(api_key, &config.llm_api_base, &config.llm_model);
                log::info!("Using model {} at {}", model.model(), config.llm_api_base);
                Arc::new(model)
            }
            None => Arc::new(PlaceholderQuizModel),
        };

        let fetcher = Arc::new(WikipediaFetcher::new(&config.scraper_user_agent)?);
        let assembler = QuizAssembler::from_config(model, &config);
        let quiz_service = QuizService::new(repository, fetcher, assembler);

        Ok(Self::from_parts(config, quiz_service, db))
    }

    pub fn from_parts(config: Config, quiz_service: QuizService, db: Option<Database>) -> Self {
        Self {
            quiz_service: Arc::new(quiz_service),
            db,
            config: Arc::new(config),
        }
    }
}
