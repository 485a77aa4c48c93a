//! Notion database query client.

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::StatusCode;

use crate::models::QueryResponse;
use crate::{Config, Error, Result};

/// Source of database rows for the handler.
#[async_trait]
pub trait DatabaseQuery: Send + Sync {
    /// Fetch the first page of rows from the configured database.
    async fn query_database(&self) -> Result<QueryResponse>;
}

/// Client for the Notion `databases/{id}/query` endpoint.
pub struct NotionClient {
    http_client: reqwest::Client,
    query_url: String,
    token: String,
    notion_version: String,
}

impl NotionClient {
    /// Create a new Notion client.
    pub fn new(http_client: reqwest::Client, config: &Config) -> Self {
        Self {
            http_client,
            query_url: format!(
                "{}/databases/{}/query",
                config.api_base_url, config.database_id
            ),
            token: config.notion_token.clone(),
            notion_version: config.notion_version.clone(),
        }
    }

    /// Build the query request. The body is empty: no filter, sort or cursor.
    pub fn build_query_request(&self) -> Result<reqwest::Request> {
        Ok(self
            .http_client
            .post(&self.query_url)
            .header(AUTHORIZATION, format!("Bearer {}", self.token))
            .header("Notion-Version", &self.notion_version)
            .header(CONTENT_TYPE, "application/json")
            .build()?)
    }
}

#[async_trait]
impl DatabaseQuery for NotionClient {
    async fn query_database(&self) -> Result<QueryResponse> {
        let request = self.build_query_request()?;
        let response = self.http_client.execute(request).await?;

        let status = response.status();
        let body = response.text().await?;

        decode_query_response(status, &body)
    }
}

/// Map a raw Notion answer to a parsed response or an upstream error.
pub fn decode_query_response(status: StatusCode, body: &str) -> Result<QueryResponse> {
    if !status.is_success() {
        return Err(Error::Upstream {
            status: status.as_u16(),
            body: body.to_string(),
        });
    }

    Ok(serde_json::from_str(body)?)
}
