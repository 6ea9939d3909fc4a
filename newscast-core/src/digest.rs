use std::fmt;

use serde::Deserialize;

/// Maximum number of articles carried into a digest.
pub const MAX_ARTICLES: usize = 10;

/// Rendered in place of a missing or null title.
pub const UNTITLED: &str = "No Title";

/// A single headline entry from the news API.
///
/// Both fields are optional on the wire; anything else the API sends
/// alongside them is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Article {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl Article {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            description: Some(description.into()),
        }
    }

    /// Title with the `No Title` fallback applied.
    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or(UNTITLED)
    }

    /// Description, empty when absent.
    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or_default()
    }
}

/// Ordered batch of headlines handed to the script composer.
///
/// Order is the API response order and is never re-sorted. An empty
/// digest means "no data available" and short-circuits the pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewsDigest {
    articles: Vec<Article>,
}

impl NewsDigest {
    /// Build a digest from the first [`MAX_ARTICLES`] articles.
    pub fn from_articles(articles: impl IntoIterator<Item = Article>) -> Self {
        Self {
            articles: articles.into_iter().take(MAX_ARTICLES).collect(),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    /// Render as `"{n}. {title}: {description}\n"` lines, 1-indexed.
    ///
    /// An empty digest renders as the empty string.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for NewsDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, article) in self.articles.iter().enumerate() {
            writeln!(
                f,
                "{}. {}: {}",
                i + 1,
                single_line(article.title()),
                single_line(article.description())
            )?;
        }
        Ok(())
    }
}

/// One article is one line, whatever the API put in the text.
fn single_line(text: &str) -> String {
    text.replace(['\r', '\n'], " ")
}
