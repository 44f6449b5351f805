use crate::errors::{AppError, AppResult};

pub const SYSTEM_PROMPT: &str = "You write multiple-choice quizzes about Wikipedia articles for students. \
You only use facts stated in the article text you are given, you never invent facts, \
and you always answer with a single JSON object and nothing else.";

pub const COMPREHENSIVE_QUIZ_PROMPT: &str = "Build a quiz from the Wikipedia article below.

ARTICLE TITLE: {title}

OPENING PARAGRAPHS:
{summary}

SECTIONS:
{sections}

ARTICLE TEXT:
{content}

RULES:
1. Every question must be answerable from the article text above.
2. Use no information that is absent from the article.
3. Give exactly four distinct options per question; exactly one is correct.
4. Copy the correct option verbatim into \"answer\".
5. Aim for roughly 40% easy, 40% medium and 20% hard questions.
6. Each explanation names the section the answer comes from.
7. No yes/no questions. Spread the questions over different sections.
8. Related topics must be titles of existing Wikipedia articles, not this one.
9. List at most 10 people, 10 organizations and 10 locations.

DIFFICULTY:
- easy: dates, names and facts from the opening paragraphs
- medium: facts that require reading a specific section
- hard: details mentioned once, or links between several facts

Write a 2-3 sentence summary and 5 to 10 questions.

Answer with one JSON object matching this JSON schema:
{schema}

Example of the expected shape:
{\"summary\": \"...\", \"key_entities\": {\"people\": [\"...\"], \"organizations\": [\"...\"], \"locations\": [\"...\"]}, \
\"quiz\": [{\"question\": \"...?\", \"options\": [\"A\", \"B\", \"C\", \"D\"], \"answer\": \"B\", \"difficulty\": \"easy\", \
\"explanation\": \"The 'Early life' section states ...\"}], \"related_topics\": [\"...\"]}";

pub const SECTION_FOCUSED_PROMPT: &str = "Write two quiz questions about one section of a Wikipedia article.

ARTICLE: {title}
SECTION: {section_name}
SECTION TEXT:
{section_content}

- Use only the section text.
- One question is easy or medium, the other medium or hard.
- Four distinct options each, the answer copied verbatim from the options.
- The explanation quotes or paraphrases the sentence that holds the answer.

Answer with JSON: {\"questions\": [{\"question\": \"...\", \"options\": [\"A\", \"B\", \"C\", \"D\"], \
\"answer\": \"B\", \"difficulty\": \"medium\", \"explanation\": \"In {section_name} ...\"}]}";

pub const ENTITY_EXTRACTION_PROMPT: &str = "List the key named entities of this Wikipedia article.

ARTICLE: {title}
TEXT: {content}

- people: individuals named in the text (at most 10, most relevant first)
- organizations: companies, institutions and groups (at most 10)
- locations: cities, countries and places (at most 10)

Only include entities spelled as they appear in the text and relevant to the topic.

Answer with JSON: {\"people\": [], \"organizations\": [], \"locations\": []}";

pub const RELATED_TOPICS_PROMPT: &str = "Suggest 5 to 10 Wikipedia articles to read after the article about {title}.

SUMMARY: {summary}
SECTIONS: {sections}

- Use exact titles of existing Wikipedia articles.
- Mix broader subjects, people, events and technologies mentioned in the article.
- Do not suggest {title} itself.

Answer with JSON: {\"related_topics\": [\"...\"]}";

pub const FEW_SHOT_QUIZ_PROMPT: &str = "Here are three questions of the quality expected.

Easy (article: Alan Turing)
Q: In which year was Alan Turing born?
Options: 1910 | 1912 | 1914 | 1916
Answer: 1912
Explanation: 'Early life and education' gives his birth date as 23 June 1912.

Medium (article: Alan Turing)
Q: Which device did Turing design to find Enigma settings?
Options: Colossus | Bombe | ENIAC | Mark I
Answer: Bombe
Explanation: 'Cryptanalysis' describes the bombe, an electromechanical machine for Enigma settings.

Hard (article: Alan Turing)
Q: Which decision problem did Turing's 1936 paper answer?
Options: Entscheidungsproblem | Fermat's Last Theorem | Riemann hypothesis | P versus NP
Answer: Entscheidungsproblem
Explanation: 'Career and research' explains how Turing machines settled the Entscheidungsproblem.

Write 5 to 10 questions of the same quality for this article.

ARTICLE: {title}
SECTIONS: {sections}
TEXT: {content}";

pub const CHAIN_OF_THOUGHT_PROMPT: &str = "Build a quiz step by step.

ARTICLE: {title}
TEXT: {content}

1. Name the 3 to 5 main topics of the article.
2. For each topic pick one fact that makes a good question.
3. Turn each fact into a question with four distinct, plausible options.
4. Rate it easy (opening paragraphs or repeated), medium (one section) or hard (mentioned once or combining facts).
5. Write an explanation naming the section.

Finish with the quiz as a JSON object.";

pub const VALIDATION_PROMPT: &str = "Your previous answer for the Wikipedia article \"{title}\" could not be accepted.

PROBLEMS FOUND:
{issues}

PREVIOUS ANSWER:
{quiz_questions}

ARTICLE TEXT:
{content}

Check every question again:
1. It can be answered from the article text.
2. It has exactly four distinct options.
3. The answer is copied verbatim from the options.
4. The difficulty is easy, medium or hard.
5. The explanation names the section of the article.

Fix every problem listed above and answer again with the complete corrected quiz as one JSON object \
with the keys summary, key_entities, quiz and related_topics. No other text.";

/// The prompt library. Each template declares the variables it needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptTemplate {
    Comprehensive,
    SectionFocused,
    EntityExtraction,
    RelatedTopics,
    FewShot,
    ChainOfThought,
    Validation,
}

impl PromptTemplate {
    pub const ALL: [PromptTemplate; 7] = [
        PromptTemplate::Comprehensive,
        PromptTemplate::SectionFocused,
        PromptTemplate::EntityExtraction,
        PromptTemplate::RelatedTopics,
        PromptTemplate::FewShot,
        PromptTemplate::ChainOfThought,
        PromptTemplate::Validation,
    ];

    pub fn text(&self) -> &'static str {
        match self {
            PromptTemplate::Comprehensive => COMPREHENSIVE_QUIZ_PROMPT,
            PromptTemplate::SectionFocused => SECTION_FOCUSED_PROMPT,
            PromptTemplate::EntityExtraction => ENTITY_EXTRACTION_PROMPT,
            PromptTemplate::RelatedTopics => RELATED_TOPICS_PROMPT,
            PromptTemplate::FewShot => FEW_SHOT_QUIZ_PROMPT,
            PromptTemplate::ChainOfThought => CHAIN_OF_THOUGHT_PROMPT,
            PromptTemplate::Validation => VALIDATION_PROMPT,
        }
    }

    pub fn variables(&self) -> &'static [&'static str] {
        match self {
            PromptTemplate::Comprehensive => &["title", "summary", "sections", "content", "schema"],
            PromptTemplate::SectionFocused => &["title", "section_name", "section_content"],
            PromptTemplate::EntityExtraction => &["title", "content"],
            PromptTemplate::RelatedTopics => &["title", "summary", "sections"],
            PromptTemplate::FewShot => &["title", "content", "sections"],
            PromptTemplate::ChainOfThought => &["title", "content"],
            PromptTemplate::Validation => &["title", "content", "quiz_questions", "issues"],
        }
    }

    /// Substitutes every `{variable}` placeholder in one left-to-right pass, so
    /// braces inside substituted values are copied through untouched. Fails
    /// when a declared variable has no value; extra values are ignored.
    pub fn render(&self, values: &[(&str, &str)]) -> AppResult<String> {
        let value_of = |variable: &str| {
            values
                .iter()
                .find(|(name, _)| *name == variable)
                .map(|(_, value)| *value)
        };

        if let Some(missing) = self.variables().iter().copied().find(|v| value_of(*v).is_none()) {
            return Err(AppError::InternalError(format!(
                "prompt {:?} is missing variable '{}'",
                self, missing
            )));
        }

        let template = self.text();
        let mut rendered = String::with_capacity(template.len());
        let mut rest = template;

        while let Some(open) = rest.find('{') {
            rendered.push_str(&rest[..open]);
            let after = &rest[open + 1..];

            let placeholder = after
                .find('}')
                .map(|close| &after[..close])
                .filter(|name| self.variables().contains(name))
                .and_then(|name| value_of(name).map(|value| (name, value)));

            match placeholder {
                Some((name, value)) => {
                    rendered.push_str(value);
                    rest = &after[name.len() + 1..];
                }
                // JSON examples in the templates keep their braces.
                None => {
                    rendered.push('{');
                    rest = after;
                }
            }
        }
        rendered.push_str(rest);

        Ok(rendered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_declared_variable_appears_in_its_template() {
        for template in PromptTemplate::ALL {
            for variable in template.variables() {
                assert!(
                    template.text().contains(&format!("{{{}}}", variable)),
                    "{:?} does not use {{{}}}",
                    template,
                    variable
                );
            }
        }
    }

    #[test]
    fn render_substitutes_all_occurrences() {
        let rendered = PromptTemplate::RelatedTopics
            .render(&[
                ("title", "Alan Turing"),
                ("summary", "A mathematician."),
                ("sections", "Early life, Legacy"),
            ])
            .expect("all variables given");

        assert!(!rendered.contains("{title}"));
        assert_eq!(rendered.matches("Alan Turing").count(), 2);
        assert!(rendered.contains("Early life, Legacy"));
    }

    #[test]
    fn render_fails_on_missing_variable() {
        let err = PromptTemplate::EntityExtraction
            .render(&[("title", "Alan Turing")])
            .expect_err("content is missing");
        assert!(err.to_string().contains("content"));
    }

    #[test]
    fn render_keeps_json_braces() {
        let rendered = PromptTemplate::EntityExtraction
            .render(&[("title", "T"), ("content", "C")])
            .expect("all variables given");
        assert!(rendered.contains("{\"people\": []"));
    }

    #[test]
    fn render_does_not_expand_placeholders_inside_values() {
        let rendered = PromptTemplate::Validation
            .render(&[
                ("title", "Format strings"),
                ("content", "f-strings look like f\"{issues}\"."),
                ("quiz_questions", "{\"quiz\": []}"),
                ("issues", "- ISSUE-MARKER"),
            ])
            .expect("all variables given");

        assert!(rendered.contains("f-strings look like f\"{issues}\"."));
        assert_eq!(rendered.matches("ISSUE-MARKER").count(), 1);
        assert!(rendered.contains("{\"quiz\": []}"));
    }
}
