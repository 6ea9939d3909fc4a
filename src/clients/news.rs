//! HTTP client for the top-headlines endpoint of the news API.

use async_trait::async_trait;
use newscast_core::Article;
use reqwest::Client;
use serde::Deserialize;

use super::{check_status, ClientError, HeadlineSource, USER_AGENT};
use crate::config::NewsApiConfig;

#[derive(Debug, Deserialize)]
struct TopHeadlinesResponse {
    #[serde(default)]
    articles: Vec<Article>,
}

/// News API client bound to one country and category.
#[derive(Debug, Clone)]
pub struct NewsApiClient {
    base_url: String,
    api_key: String,
    country: String,
    category: String,
    client: Client,
}

impl NewsApiClient {
    pub fn new(config: &NewsApiConfig) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self {
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            country: config.country.clone(),
            category: config.category.clone(),
            client,
        })
    }
}

#[async_trait]
impl HeadlineSource for NewsApiClient {
    async fn top_headlines(&self) -> Result<Vec<Article>, ClientError> {
        let url = format!("{}/v2/top-headlines", self.base_url);
        tracing::debug!(country = %self.country, category = %self.category, "Requesting top headlines");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("country", self.country.as_str()),
                ("category", self.category.as_str()),
                ("apiKey", self.api_key.as_str()),
            ])
            .send()
            .await?;
        let body: TopHeadlinesResponse = check_status(response).await?.json().await?;

        tracing::debug!(count = body.articles.len(), "Received headlines");
        Ok(body.articles)
    }
}
