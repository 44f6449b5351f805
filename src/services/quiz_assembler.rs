use std::sync::Arc;

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;

use crate::{
    config::Config,
    constants::prompts::{PromptTemplate, SYSTEM_PROMPT},
    errors::{AppError, AppResult},
    models::{
        domain::{ArticleDocument, QuizResult},
        dto::quiz_dto::GeneratedQuizDto,
    },
    services::{
        model_service::{ModelRequest, QuizModel},
        quiz_validation::{validate_response, QuizIssues, ValidatedQuiz},
    },
};

pub const SUMMARY_FALLBACK_CHARS: usize = 200;

static QUIZ_SCHEMA: Lazy<String> = Lazy::new(|| {
    serde_json::to_string_pretty(&schemars::schema_for!(GeneratedQuizDto))
        .unwrap_or_else(|_| "{}".to_string())
});

/// Turns an article into a quiz: prompt, one model round trip, validation,
/// and a corrective follow-up while attempts remain.
pub struct QuizAssembler {
    model: Arc<dyn QuizModel>,
    temperature: f32,
    max_attempts: u32,
    max_prompt_chars: usize,
}

impl QuizAssembler {
    pub fn new(
        model: Arc<dyn QuizModel>,
        temperature: f32,
        max_attempts: u32,
        max_prompt_chars: usize,
    ) -> Self {
        Self {
            model,
            temperature,
            max_attempts: max_attempts.max(1),
            max_prompt_chars,
        }
    }

    pub fn from_config(model: Arc<dyn QuizModel>, config: &Config) -> Self {
        Self::new(
            model,
            config.llm_temperature,
            config.generation_max_attempts,
            config.max_prompt_chars,
        )
    }

    pub async fn generate(&self, document: &ArticleDocument) -> AppResult<QuizResult> {
        let mut prompt = self.generation_prompt(document)?;
        let mut last_issues = QuizIssues::default();

        for attempt in 1..=self.max_attempts {
            let request = ModelRequest {
                system: SYSTEM_PROMPT.to_string(),
                prompt,
                temperature: self.temperature,
            };

            let raw = self.model.complete(&request).await?;

            match validate_response(&raw) {
                Ok(validated) => {
                    log::info!(
                        "Generated {} questions for '{}' on attempt {}",
                        validated.quiz.len(),
                        document.title,
                        attempt
                    );
                    return Ok(assemble(document, validated, Utc::now()));
                }
                Err(issues) => {
                    log::warn!(
                        "Attempt {}/{} for '{}' rejected: {}",
                        attempt,
                        self.max_attempts,
                        document.title,
                        issues
                    );
                    prompt = self.correction_prompt(document, &raw, &issues)?;
                    last_issues = issues;
                }
            }
        }

        Err(AppError::GenerationError(format!(
            "model answer rejected after {} attempt(s): {}",
            self.max_attempts, last_issues
        )))
    }

    pub fn generation_prompt(&self, document: &ArticleDocument) -> AppResult<String> {
        let sections = format_sections(&document.sections);
        let content = truncate_chars(&document.full_text, self.max_prompt_chars);

        PromptTemplate::Comprehensive.render(&[
            ("title", document.title.as_str()),
            ("summary", document.lead_text.as_str()),
            ("sections", sections.as_str()),
            ("content", content),
            ("schema", QUIZ_SCHEMA.as_str()),
        ])
    }

    pub fn correction_prompt(
        &self,
        document: &ArticleDocument,
        previous_answer: &str,
        issues: &QuizIssues,
    ) -> AppResult<String> {
        let bullets = issues.as_bullets();

        PromptTemplate::Validation.render(&[
            ("title", document.title.as_str()),
            ("content", truncate_chars(&document.full_text, self.max_prompt_chars)),
            ("quiz_questions", truncate_chars(previous_answer, self.max_prompt_chars)),
            ("issues", bullets.as_str()),
        ])
    }
}

/// Combines the article with a validated model answer. Title and sections
/// always come from the article.
pub fn assemble(document: &ArticleDocument, quiz: ValidatedQuiz, now: DateTime<Utc>) -> QuizResult {
    let summary = if quiz.summary.is_empty() {
        fallback_summary(&document.lead_text)
    } else {
        quiz.summary
    };

    QuizResult {
        id: now.timestamp_millis(),
        url: document.url.clone(),
        title: document.title.clone(),
        summary,
        key_entities: quiz.key_entities,
        sections: document.sections.clone(),
        quiz: quiz.quiz,
        related_topics: quiz.related_topics,
        created_at: Some(now),
    }
}

fn fallback_summary(lead_text: &str) -> String {
    if lead_text.chars().count() > SUMMARY_FALLBACK_CHARS {
        format!("{}...", truncate_chars(lead_text, SUMMARY_FALLBACK_CHARS))
    } else {
        lead_text.to_string()
    }
}

fn format_sections(sections: &[String]) -> String {
    if sections.is_empty() {
        return "(none)".to_string();
    }
    sections
        .iter()
        .map(|s| format!("- {}", s))
        .collect::<Vec<_>>()
        .join("\n")
}

fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}
