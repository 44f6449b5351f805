use serde::{Deserialize, Serialize};

pub const MAX_SECTIONS: usize = 15;
pub const LEAD_PARAGRAPHS: usize = 10;

/// Normalized content of one scraped Wikipedia page. Built once per request.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct ArticleDocument {
    pub url: String,
    pub title: String,
    pub lead_text: String,
    pub full_text: String,
    pub sections: Vec<String>,
}

impl ArticleDocument {
    /// Builds a document from already-cleaned paragraph texts and heading names.
    /// Empty paragraphs are skipped and the caps on lead paragraphs and sections apply.
    pub fn from_parts(
        url: &str,
        title: &str,
        paragraphs: Vec<String>,
        mut sections: Vec<String>,
    ) -> Self {
        let paragraphs: Vec<String> = paragraphs
            .into_iter()
            .filter(|p| !p.trim().is_empty())
            .collect();

        let lead_text = paragraphs
            .iter()
            .take(LEAD_PARAGRAPHS)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" ");
        let full_text = paragraphs.join(" ");

        sections.retain(|s| !s.trim().is_empty());
        sections.truncate(MAX_SECTIONS);

        ArticleDocument {
            url: url.to_string(),
            title: title.trim().to_string(),
            lead_text,
            full_text,
            sections,
        }
    }
}
