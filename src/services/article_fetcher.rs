use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Url;
use scraper::{ElementRef, Html, Selector};

use crate::{
    errors::{AppError, AppResult},
    models::domain::ArticleDocument,
};

static TITLE_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("h1#firstHeading, h1.firstHeading").expect("TITLE_SELECTOR is a valid selector")
});
static CONTENT_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("#mw-content-text div.mw-parser-output")
        .expect("CONTENT_SELECTOR is a valid selector")
});
static ANY_CONTENT_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("div.mw-parser-output").expect("ANY_CONTENT_SELECTOR is a valid selector")
});
static PARAGRAPH_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("p").expect("PARAGRAPH_SELECTOR is a valid selector"));
static HEADING_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("h2, h3").expect("HEADING_SELECTOR is a valid selector"));
static HEADLINE_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("span.mw-headline").expect("HEADLINE_SELECTOR is a valid selector")
});

// Footnote and maintenance markers: [1], [a], [note 3], [citation needed], [edit]
static REFERENCE_MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\[\s*(?:\d+|[a-z]|note\s+\d+|citation needed|edit)\s*\]")
        .expect("REFERENCE_MARKER is a valid regex pattern")
});

/// Headings that belong to page chrome rather than to the article body.
const IGNORED_HEADINGS: &[&str] = &["Contents"];

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ArticleSource: Send + Sync {
    async fn fetch(&self, url: &str) -> AppResult<ArticleDocument>;
}

/// Fetches pages over HTTP, one GET per call. No retries, no caching.
pub struct WikipediaFetcher {
    client: reqwest::Client,
}

impl WikipediaFetcher {
    pub fn new(user_agent: &str) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .build()
            .map_err(|e| AppError::InternalError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl ArticleSource for WikipediaFetcher {
    async fn fetch(&self, url: &str) -> AppResult<ArticleDocument> {
        log::info!("Fetching article {}", url);

        let response = self.client.get(url).send().await.map_err(|e| {
            log::error!("Request to {} failed: {}", url, e);
            AppError::from(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            log::warn!("{} answered with HTTP {}", url, status);
            return Err(AppError::FetchError(format!(
                "{} returned HTTP {}",
                url, status
            )));
        }

        let html = response.text().await?;
        let document = parse_article(url, &html)?;

        log::debug!(
            "Parsed '{}': {} sections, {} chars of text",
            document.title,
            document.sections.len(),
            document.full_text.len()
        );

        Ok(document)
    }
}

/// True for http(s) URLs on a wikipedia.org host whose path names an article.
pub fn is_wikipedia_article_url(url: &str) -> bool {
    validate_wikipedia_url(url).is_ok()
}

pub fn validate_wikipedia_url(url: &str) -> AppResult<Url> {
    let invalid = || AppError::ValidationError(format!("Invalid Wikipedia URL: {}", url));

    let parsed = Url::parse(url.trim()).map_err(|_| invalid())?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(invalid());
    }

    let host = parsed.host_str().ok_or_else(invalid)?.to_ascii_lowercase();
    if host != "wikipedia.org" && !host.ends_with(".wikipedia.org") {
        return Err(invalid());
    }

    match parsed.path().strip_prefix("/wiki/") {
        Some(article) if !article.trim_matches('/').is_empty() => Ok(parsed),
        _ => Err(invalid()),
    }
}

/// Extracts title, paragraphs and section headings from a Wikipedia page.
pub fn parse_article(url: &str, html: &str) -> AppResult<ArticleDocument> {
    let page = Html::parse_document(html);

    let title = page
        .select(&TITLE_SELECTOR)
        .next()
        .map(|el| clean_text(&element_text(el)))
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::FetchError("article title heading not found".to_string()))?;

    let content = page
        .select(&CONTENT_SELECTOR)
        .next()
        .or_else(|| page.select(&ANY_CONTENT_SELECTOR).next())
        .ok_or_else(|| AppError::FetchError("article content container not found".to_string()))?;

    let paragraphs = content
        .select(&PARAGRAPH_SELECTOR)
        .map(|p| clean_text(&element_text(p)))
        .filter(|text| !text.is_empty())
        .collect();

    let sections = content
        .select(&HEADING_SELECTOR)
        .map(heading_name)
        .filter(|name| !name.is_empty() && !IGNORED_HEADINGS.contains(&name.as_str()))
        .collect();

    Ok(ArticleDocument::from_parts(url, &title, paragraphs, sections))
}

fn heading_name(heading: ElementRef<'_>) -> String {
    // Older markup wraps the name in a headline span next to the edit link.
    let raw = match heading.select(&HEADLINE_SELECTOR).next() {
        Some(headline) => element_text(headline),
        None => element_text(heading),
    };
    clean_text(&raw)
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>()
}

fn clean_text(raw: &str) -> String {
    let stripped = REFERENCE_MARKER.replace_all(raw, "");
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}
