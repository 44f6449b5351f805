use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::models::domain::KeyEntities;

/// Quiz as returned by the model, before any structural check.
///
/// Every field is optional so a partial answer still deserializes and the
/// validator can report exactly what is missing instead of a serde error.
#[derive(Debug, Clone, Default, Deserialize, Serialize, JsonSchema)]
pub struct GeneratedQuizDto {
    /// 2-3 sentence overview of the article.
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub key_entities: Option<GeneratedEntitiesDto>,
    /// Between 5 and 10 questions.
    #[serde(default)]
    pub quiz: Option<Vec<GeneratedQuestionDto>>,
    /// Real Wikipedia article titles for further reading.
    #[serde(default)]
    pub related_topics: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, JsonSchema)]
pub struct GeneratedEntitiesDto {
    #[serde(default)]
    pub people: Vec<String>,
    #[serde(default)]
    pub organizations: Vec<String>,
    #[serde(default)]
    pub locations: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, JsonSchema)]
pub struct GeneratedQuestionDto {
    #[serde(default)]
    pub question: Option<String>,
    /// Exactly four distinct options.
    #[serde(default)]
    pub options: Option<Vec<String>>,
    /// The correct option, copied verbatim.
    #[serde(default)]
    pub answer: Option<String>,
    /// One of: easy, medium, hard.
    #[serde(default)]
    pub difficulty: Option<String>,
    /// Cites the article section where the answer is found.
    #[serde(default)]
    pub explanation: Option<String>,
}

impl From<GeneratedEntitiesDto> for KeyEntities {
    fn from(dto: GeneratedEntitiesDto) -> Self {
        KeyEntities::new(dto.people, dto.organizations, dto.locations)
    }
}
