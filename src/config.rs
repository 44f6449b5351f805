use std::{env, str::FromStr};

use secrecy::SecretString;

use crate::errors::{AppError, AppResult};

pub const DEFAULT_LLM_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/openai";
pub const DEFAULT_LLM_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_USER_AGENT: &str =
    concat!("wiki-quiz-server/", env!("CARGO_PKG_VERSION"), " (quiz generator)");

/// Which backend keeps generated quizzes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuizStore {
    /// Nothing is kept: lists are empty and lookups are not found.
    Disabled,
    Memory,
    Mongo,
}

impl QuizStore {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuizStore::Disabled => "disabled",
            QuizStore::Memory => "memory",
            QuizStore::Mongo => "mongo",
        }
    }
}

impl FromStr for QuizStore {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "" | "disabled" | "none" => Ok(QuizStore::Disabled),
            "memory" => Ok(QuizStore::Memory),
            "mongo" | "mongodb" => Ok(QuizStore::Mongo),
            other => Err(AppError::ValidationError(format!(
                "unknown QUIZ_STORE '{}', expected disabled, memory or mongo",
                other
            ))),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub web_server_host: String,
    pub web_server_port: u16,
    pub cors_allowed_origin: Option<String>,
    pub llm_api_key: Option<SecretString>,
    pub llm_api_base: String,
    pub llm_model: String,
    pub llm_temperature: f32,
    pub generation_max_attempts: u32,
    pub max_prompt_chars: usize,
    pub scraper_user_agent: String,
    pub quiz_store: QuizStore,
    pub mongo_conn_string: String,
    pub mongo_db_name: String,
    pub quizzes_collection: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            web_server_host: "0.0.0.0".to_string(),
            web_server_port: 8000,
            cors_allowed_origin: None,
            llm_api_key: None,
            llm_api_base: DEFAULT_LLM_API_BASE.to_string(),
            llm_model: DEFAULT_LLM_MODEL.to_string(),
            llm_temperature: 0.3,
            generation_max_attempts: 2,
            max_prompt_chars: 12_000,
            scraper_user_agent: DEFAULT_USER_AGENT.to_string(),
            quiz_store: QuizStore::Disabled,
            mongo_conn_string: "mongodb://localhost:27017".to_string(),
            mongo_db_name: "wiki-quiz".to_string(),
            quizzes_collection: "quizzes".to_string(),
        }
    }
}

impl Config {
    /// Environment values over the defaults. A `.env` file is loaded by `main`.
    pub fn from_env() -> AppResult<Self> {
        let defaults = Self::default();

        Ok(Self {
            web_server_host: env::var("WEB_SERVER_HOST").unwrap_or(defaults.web_server_host),
            web_server_port: parsed_var("WEB_SERVER_PORT").unwrap_or(defaults.web_server_port),
            cors_allowed_origin: env::var("CORS_ALLOWED_ORIGIN")
                .ok()
                .filter(|origin| !origin.trim().is_empty()),
            llm_api_key: env::var("LLM_API_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty())
                .map(SecretString::from),
            llm_api_base: env::var("LLM_API_BASE").unwrap_or(defaults.llm_api_base),
            llm_model: env::var("LLM_MODEL").unwrap_or(defaults.llm_model),
            llm_temperature: parsed_var("LLM_TEMPERATURE").unwrap_or(defaults.llm_temperature),
            generation_max_attempts: parsed_var("GENERATION_MAX_ATTEMPTS")
                .unwrap_or(defaults.generation_max_attempts),
            max_prompt_chars: parsed_var("MAX_PROMPT_CHARS").unwrap_or(defaults.max_prompt_chars),
            scraper_user_agent: env::var("SCRAPER_USER_AGENT")
                .unwrap_or(defaults.scraper_user_agent),
            quiz_store: match env::var("QUIZ_STORE") {
                Ok(value) => value.parse()?,
                Err(_) => defaults.quiz_store,
            },
            mongo_conn_string: env::var("MONGO_CONN_STRING").unwrap_or(defaults.mongo_conn_string),
            mongo_db_name: env::var("MONGO_DB_NAME").unwrap_or(defaults.mongo_db_name),
            quizzes_collection: env::var("QUIZZES_COLLECTION")
                .unwrap_or(defaults.quizzes_collection),
        })
    }

    /// Rejects values that would only fail later, mid-request.
    pub fn validate(&self) -> AppResult<()> {
        if !(0.0..=2.0).contains(&self.llm_temperature) {
            return Err(AppError::ValidationError(format!(
                "LLM_TEMPERATURE must be between 0 and 2, got {}",
                self.llm_temperature
            )));
        }

        if self.generation_max_attempts == 0 {
            return Err(AppError::ValidationError(
                "GENERATION_MAX_ATTEMPTS must be at least 1".to_string(),
            ));
        }

        if self.max_prompt_chars < 500 {
            return Err(AppError::ValidationError(format!(
                "MAX_PROMPT_CHARS is too small ({}), use at least 500",
                self.max_prompt_chars
            )));
        }

        if self.quiz_store == QuizStore::Mongo && self.mongo_conn_string.trim().is_empty() {
            return Err(AppError::ValidationError(
                "MONGO_CONN_STRING is required when QUIZ_STORE=mongo".to_string(),
            ));
        }

        if self.llm_api_key.is_none() {
            log::warn!("LLM_API_KEY is not set, quizzes will be generated by the placeholder model");
        }

        Ok(())
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            web_server_host: "127.0.0.1".to_string(),
            mongo_db_name: "wiki-quiz-test".to_string(),
            ..Self::default()
        }
    }
}

fn parsed_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|value| value.trim().parse().ok())
}
