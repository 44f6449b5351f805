use std::{collections::HashSet, fmt, str::FromStr};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const OPTIONS_PER_QUESTION: usize = 4;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>, // exactly four, distinct
    pub answer: String,       // one of `options`
    pub difficulty: Difficulty,
    pub explanation: String, // cites the article section the answer comes from
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize, Serialize, Copy, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!(
                "difficulty '{}' is not one of easy, medium, hard",
                other
            )),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Medium => write!(f, "medium"),
            Difficulty::Hard => write!(f, "hard"),
        }
    }
}

impl QuizQuestion {
    /// True when the options are four distinct strings and the answer is one of them.
    pub fn is_well_formed(&self) -> bool {
        let distinct: HashSet<&str> = self.options.iter().map(String::as_str).collect();

        self.options.len() == OPTIONS_PER_QUESTION
            && distinct.len() == OPTIONS_PER_QUESTION
            && self.options.contains(&self.answer)
    }
}
