use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::services::article_fetcher::is_wikipedia_article_url;

pub const DEFAULT_PAGE_SIZE: i64 = 50;
pub const MAX_PAGE_SIZE: i64 = 100;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct GenerateQuizRequest {
    #[validate(
        length(max = 2048),
        url(message = "Invalid URL"),
        custom(function = "validate_wikipedia_article")
    )]
    pub url: String,
}

fn validate_wikipedia_article(url: &str) -> Result<(), ValidationError> {
    if is_wikipedia_article_url(url) {
        Ok(())
    } else {
        let mut err = ValidationError::new("wikipedia_article");
        err.message = Some("Invalid Wikipedia URL".into());
        Err(err)
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PaginationParams {
    #[validate(range(min = 0))]
    pub offset: Option<i64>,

    #[validate(range(min = 1, max = 100))]
    pub limit: Option<i64>,
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            offset: Some(0),
            limit: Some(DEFAULT_PAGE_SIZE),
        }
    }
}

impl PaginationParams {
    pub fn offset(&self) -> i64 {
        self.offset.unwrap_or(0).max(0)
    }

    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE)
    }
}
