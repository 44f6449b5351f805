//! Structural checks on model output.
//!
//! The model's answer is an untrusted string. It only becomes a quiz once
//! [`validate_response`] accepts it; otherwise the caller gets the list of
//! problems, worded so they can be sent back to the model.

use std::{collections::HashSet, fmt};

use crate::models::{
    domain::{
        quiz::normalize_names,
        quiz_question::OPTIONS_PER_QUESTION,
        Difficulty, KeyEntities, QuizQuestion,
    },
    dto::quiz_dto::{GeneratedQuestionDto, GeneratedQuizDto},
};

pub const MAX_QUESTIONS: usize = 10;

const OPTION_LETTERS: [char; OPTIONS_PER_QUESTION] = ['A', 'B', 'C', 'D'];

/// A candidate that passed every check. `summary` may still be empty.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedQuiz {
    pub summary: String,
    pub key_entities: KeyEntities,
    pub quiz: Vec<QuizQuestion>,
    pub related_topics: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QuizIssues(pub Vec<String>);

impl QuizIssues {
    fn single(issue: impl Into<String>) -> Self {
        QuizIssues(vec![issue.into()])
    }

    /// One issue per line, for the corrective prompt.
    pub fn as_bullets(&self) -> String {
        self.0
            .iter()
            .map(|issue| format!("- {}", issue))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl fmt::Display for QuizIssues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("; "))
    }
}

pub fn validate_response(raw: &str) -> Result<ValidatedQuiz, QuizIssues> {
    let candidate = parse_candidate(raw)?;
    validate_candidate(candidate)
}

/// Slice from the first `{` to the last `}`. Tolerates code fences and
/// prose around the object.
pub fn extract_json_object(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    (end > start).then(|| &raw[start..=end])
}

pub fn parse_candidate(raw: &str) -> Result<GeneratedQuizDto, QuizIssues> {
    let json = extract_json_object(raw)
        .ok_or_else(|| QuizIssues::single("the answer does not contain a JSON object"))?;

    serde_json::from_str(json)
        .map_err(|e| QuizIssues::single(format!("the answer is not valid quiz JSON: {}", e)))
}

pub fn validate_candidate(candidate: GeneratedQuizDto) -> Result<ValidatedQuiz, QuizIssues> {
    let mut issues = Vec::new();

    let mut questions = candidate.quiz.unwrap_or_default();
    if questions.is_empty() {
        issues.push("quiz: no questions were returned".to_string());
    }
    if questions.len() > MAX_QUESTIONS {
        log::debug!(
            "Dropping {} questions beyond the first {}",
            questions.len() - MAX_QUESTIONS,
            MAX_QUESTIONS
        );
        questions.truncate(MAX_QUESTIONS);
    }

    let mut quiz = Vec::with_capacity(questions.len());
    for (index, question) in questions.into_iter().enumerate() {
        match validate_question(index + 1, question) {
            Ok(valid) => quiz.push(valid),
            Err(mut problems) => issues.append(&mut problems),
        }
    }

    if !issues.is_empty() {
        return Err(QuizIssues(issues));
    }

    Ok(ValidatedQuiz {
        summary: candidate
            .summary
            .map(|s| s.trim().to_string())
            .unwrap_or_default(),
        key_entities: candidate.key_entities.map(KeyEntities::from).unwrap_or_default(),
        quiz,
        related_topics: normalize_names(candidate.related_topics.unwrap_or_default()),
    })
}

fn validate_question(number: usize, dto: GeneratedQuestionDto) -> Result<QuizQuestion, Vec<String>> {
    let mut issues = Vec::new();

    let question = required_text(dto.question);
    if question.is_none() {
        issues.push(format!("question {}: the question text is missing", number));
    }

    let explanation = required_text(dto.explanation);
    if explanation.is_none() {
        issues.push(format!("question {}: the explanation is missing", number));
    }

    let difficulty = match dto.difficulty {
        Some(value) => match value.parse::<Difficulty>() {
            Ok(difficulty) => Some(difficulty),
            Err(e) => {
                issues.push(format!("question {}: {}", number, e));
                None
            }
        },
        None => {
            issues.push(format!("question {}: the difficulty is missing", number));
            None
        }
    };

    let options: Vec<String> = dto
        .options
        .unwrap_or_default()
        .into_iter()
        .map(|o| o.trim().to_string())
        .collect();

    let options_ok = check_options(number, &options, &mut issues);

    let answer = match required_text(dto.answer) {
        Some(answer) if options_ok => {
            let resolved = resolve_answer(&answer, &options);
            if resolved.is_none() {
                issues.push(format!(
                    "question {}: the answer '{}' is not one of the options",
                    number, answer
                ));
            }
            resolved
        }
        Some(_) => None,
        None => {
            issues.push(format!("question {}: the answer is missing", number));
            None
        }
    };

    match (question, options_ok, answer, difficulty, explanation) {
        (Some(question), true, Some(answer), Some(difficulty), Some(explanation))
            if issues.is_empty() =>
        {
            Ok(QuizQuestion {
                question,
                options,
                answer,
                difficulty,
                explanation,
            })
        }
        _ => Err(issues),
    }
}

fn check_options(number: usize, options: &[String], issues: &mut Vec<String>) -> bool {
    if options.len() != OPTIONS_PER_QUESTION {
        issues.push(format!(
            "question {}: expected {} options, got {}",
            number,
            OPTIONS_PER_QUESTION,
            options.len()
        ));
        return false;
    }

    if options.iter().any(String::is_empty) {
        issues.push(format!("question {}: an option is empty", number));
        return false;
    }

    let distinct: HashSet<String> = options.iter().map(|o| o.to_lowercase()).collect();
    if distinct.len() != OPTIONS_PER_QUESTION {
        issues.push(format!("question {}: the options are not distinct", number));
        return false;
    }

    true
}

/// Maps the model's answer onto the exact option text. Accepts a verbatim
/// copy, a copy differing only in case, or an option letter such as `B` or `b)`.
fn resolve_answer(answer: &str, options: &[String]) -> Option<String> {
    if let Some(exact) = options.iter().find(|o| o.as_str() == answer) {
        return Some(exact.clone());
    }

    if let Some(folded) = options.iter().find(|o| o.to_lowercase() == answer.to_lowercase()) {
        return Some(folded.clone());
    }

    let letter = answer.trim_end_matches(|c| c == ')' || c == '.' || c == ':');
    let mut chars = letter.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => OPTION_LETTERS
            .iter()
            .position(|l| *l == c.to_ascii_uppercase())
            .map(|index| options[index].clone()),
        _ => None,
    }
}

fn required_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
