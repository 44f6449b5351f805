#[cfg(test)]
pub mod fixtures {
    use crate::models::domain::{ArticleDocument, Difficulty, KeyEntities, QuizQuestion, QuizResult};

    pub const TURING_URL: &str = "https://en.wikipedia.org/wiki/Alan_Turing";

    /// A trimmed-down Wikipedia page using the older headline-span markup
    pub fn sample_article_html() -> String {
        r#"<!DOCTYPE html>
<html>
<head><title>Alan Turing - Wikipedia</title></head>
<body>
  <h1 id="firstHeading" class="firstHeading mw-first-heading"><span class="mw-page-title-main">Alan Turing</span></h1>
  <div id="mw-content-text" class="mw-body-content">
    <div class="mw-parser-output">
      <p class="mw-empty-elt"></p>
      <p>Alan Mathison Turing was an English mathematician, computer scientist and cryptanalyst.<sup>[1]</sup></p>
      <p>He was highly influential in the development of theoretical computer science.[citation needed]</p>
      <div id="toc" class="toc"><h2 id="mw-toc-heading">Contents</h2></div>
      <h2><span class="mw-headline" id="Early_life">Early life</span><span class="mw-editsection">[edit]</span></h2>
      <p>Turing was born in Maida Vale, London, on 23 June 1912.</p>
      <h2><span class="mw-headline" id="Cryptanalysis">Cryptanalysis</span><span class="mw-editsection">[edit]</span></h2>
      <p>During the Second World War, Turing worked at Bletchley Park.</p>
      <h3><span class="mw-headline" id="Bombe">Bombe</span></h3>
      <p>Turing specified the design of the bombe, an electromechanical machine.[a]</p>
    </div>
  </div>
</body>
</html>"#
            .to_string()
    }

    /// An article with `sections` headings and `paragraphs` paragraphs
    pub fn long_article_html(sections: usize, paragraphs: usize) -> String {
        let mut body = String::new();
        for i in 1..=paragraphs {
            body.push_str(&format!("<p>Paragraph {}.</p>\n", i));
        }
        for i in 1..=sections {
            body.push_str(&format!(
                "<h2><span class=\"mw-headline\">Section {}</span></h2>\n",
                i
            ));
        }

        format!(
            "<html><body><h1 id=\"firstHeading\">Long article</h1>\
             <div id=\"mw-content-text\"><div class=\"mw-parser-output\">{}</div></div>\
             </body></html>",
            body
        )
    }

    pub fn sample_document() -> ArticleDocument {
        ArticleDocument::from_parts(
            TURING_URL,
            "Alan Turing",
            vec![
                "Alan Mathison Turing was an English mathematician.".to_string(),
                "Turing was born in Maida Vale, London.".to_string(),
                "During the Second World War, Turing worked at Bletchley Park.".to_string(),
            ],
            vec![
                "Early life".to_string(),
                "Cryptanalysis".to_string(),
                "Legacy".to_string(),
            ],
        )
    }

    /// A model answer that passes every structural check
    pub fn well_formed_model_response() -> String {
        serde_json::json!({
            "summary": "Alan Turing was an English mathematician and a founder of computer science.",
            "key_entities": {
                "people": ["Alan Turing", "Alonzo Church"],
                "organizations": ["Bletchley Park", "University of Manchester"],
                "locations": ["London", "Maida Vale"]
            },
            "quiz": [
                {
                    "question": "Where did Turing work during the Second World War?",
                    "options": ["Bletchley Park", "Los Alamos", "MIT", "CERN"],
                    "answer": "Bletchley Park",
                    "difficulty": "easy",
                    "explanation": "The 'Cryptanalysis' section places him at Bletchley Park."
                },
                {
                    "question": "In which part of London was Turing born?",
                    "options": ["Soho", "Maida Vale", "Camden", "Hackney"],
                    "answer": "Maida Vale",
                    "difficulty": "medium",
                    "explanation": "The 'Early life' section names Maida Vale."
                }
            ],
            "related_topics": ["Enigma machine", "Turing machine", "Bletchley Park"]
        })
        .to_string()
    }

    pub fn sample_question() -> QuizQuestion {
        QuizQuestion {
            question: "Where did Turing work during the Second World War?".to_string(),
            options: vec![
                "Bletchley Park".to_string(),
                "Los Alamos".to_string(),
                "MIT".to_string(),
                "CERN".to_string(),
            ],
            answer: "Bletchley Park".to_string(),
            difficulty: Difficulty::Easy,
            explanation: "The 'Cryptanalysis' section places him at Bletchley Park.".to_string(),
        }
    }

    pub fn sample_quiz_result(id: i64, url: &str) -> QuizResult {
        QuizResult {
            id,
            url: url.to_string(),
            title: "Alan Turing".to_string(),
            summary: "Alan Turing was an English mathematician.".to_string(),
            key_entities: KeyEntities::new(
                vec!["Alan Turing".to_string()],
                vec!["Bletchley Park".to_string()],
                vec!["London".to_string()],
            ),
            sections: vec!["Early life".to_string(), "Cryptanalysis".to_string()],
            quiz: vec![sample_question()],
            related_topics: vec!["Enigma machine".to_string()],
            created_at: None,
        }
    }
}

#[cfg(test)]
pub mod test_helpers {
    use actix_web::http::StatusCode;

    /// Asserts that a status code represents an error (4xx or 5xx)
    pub fn assert_error_status(status: StatusCode) {
        assert!(
            status.is_client_error() || status.is_server_error(),
            "Expected error status, got: {}",
            status
        );
    }

    /// Asserts that a status code represents success (2xx)
    pub fn assert_success_status(status: StatusCode) {
        assert!(
            status.is_success(),
            "Expected success status, got: {}",
            status
        );
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;

    #[test]
    fn test_fixture_document_shape() {
        let doc = sample_document();
        assert_eq!(doc.title, "Alan Turing");
        assert_eq!(doc.sections.len(), 3);
        assert!(doc.lead_text.contains("Bletchley Park"));
    }

    #[test]
    fn test_fixture_result_questions_are_well_formed() {
        let result = sample_quiz_result(7, TURING_URL);
        assert_eq!(result.id, 7);
        assert!(result.quiz.iter().all(|q| q.is_well_formed()));
    }

    #[test]
    fn test_fixture_model_response_is_json() {
        let value: serde_json::Value =
            serde_json::from_str(&well_formed_model_response()).expect("fixture is valid JSON");
        assert_eq!(value["quiz"].as_array().map(Vec::len), Some(2));
    }
}
