//! Database Lambda - Reports which days have a checked Notion row.
//!
//! Queries the configured Notion database once per request, keeps rows whose
//! checkbox property is ticked, and answers with one `{date, isChecked}` entry
//! per day. Request method and body are ignored.

use lambda_http::{run, service_fn, Body, Error, Request, Response};
use shared::http::{error_response, json_response};
use shared::{aggregate, Config, DatabaseQuery, NotionClient};
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// Application state shared across requests.
struct AppState<Q> {
    database: Q,
    checkbox_property: String,
}

impl AppState<NotionClient> {
    fn new(config: Config) -> Self {
        Self {
            database: NotionClient::new(reqwest::Client::new(), &config),
            checkbox_property: config.checkbox_property,
        }
    }
}

async fn handler<Q: DatabaseQuery>(state: Arc<AppState<Q>>, _event: Request) -> Result<Response<Body>, Error> {
    let response = match state.database.query_database().await {
        Ok(response) => response,
        Err(e) => {
            error!("Error processing request: {}", e);
            return error_response(e.status_code(), e.to_string());
        }
    };

    if response.has_more {
        warn!(
            next_cursor = ?response.next_cursor,
            "Notion returned more rows than one page; only the first page is used"
        );
    }

    let aggregation = aggregate(&response.results, &state.checkbox_property);

    info!(
        "Processed {} records: {} dates, {} skipped",
        response.results.len(),
        aggregation.entries.len(),
        aggregation.skipped.len()
    );

    json_response(200, &aggregation.entries)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let config = Config::from_env()?;
    info!(
        "Serving database {} with checkbox property {}",
        config.database_id, config.checkbox_property
    );

    let state = Arc::new(AppState::new(config));

    run(service_fn(move |event| {
        let state = Arc::clone(&state);
        async move { handler(state, event).await }
    }))
    .await
}
