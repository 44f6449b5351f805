use std::collections::HashSet;

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::models::domain::quiz_question::QuizQuestion;

pub const MAX_ENTITIES_PER_KIND: usize = 10;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuizResult {
    pub id: i64, // creation time in epoch millis
    pub url: String,
    pub title: String, // taken from the article, never from the model
    pub summary: String,
    pub key_entities: KeyEntities,
    pub sections: Vec<String>, // taken from the article, never from the model
    pub quiz: Vec<QuizQuestion>,
    pub related_topics: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
pub struct KeyEntities {
    pub people: Vec<String>,
    pub organizations: Vec<String>,
    pub locations: Vec<String>,
}

impl KeyEntities {
    pub fn new(people: Vec<String>, organizations: Vec<String>, locations: Vec<String>) -> Self {
        KeyEntities {
            people: normalize_names(people),
            organizations: normalize_names(organizations),
            locations: normalize_names(locations),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.people.is_empty() && self.organizations.is_empty() && self.locations.is_empty()
    }
}

/// Trims, drops blanks, removes case-insensitive duplicates (first spelling wins)
/// and caps the list.
pub fn normalize_names(names: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();

    names
        .into_iter()
        .map(|name| name.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|name| !name.is_empty())
        .filter(|name| seen.insert(name.to_lowercase()))
        .take(MAX_ENTITIES_PER_KIND)
        .collect()
}
