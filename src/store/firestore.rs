// src/store/firestore.rs

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::debug;
use url::Url;

use crate::domain::ListingDoc;
use crate::store::firestore_codec::{decode_error, decode_run_query, encode_query};
use crate::store::{ListingQuery, ListingStore, StoreError};

const DEFAULT_BASE_URL: &str = "https://firestore.googleapis.com";

/// Hosted listing store reached through the Firestore REST `runQuery` endpoint.
pub struct FirestoreStore {
    client: Client,
    run_query_url: Url,
}

impl FirestoreStore {
    pub fn new(
        project_id: &str,
        api_key: Option<String>,
        base_url: Option<&str>,
        timeout: Duration,
    ) -> Result<Self, StoreError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| StoreError::Transport(e.to_string()))?;

        let base = base_url.unwrap_or(DEFAULT_BASE_URL).trim_end_matches('/');
        let mut run_query_url = Url::parse(&format!(
            "{base}/v1/projects/{project_id}/databases/(default)/documents:runQuery"
        ))
        .map_err(|e| StoreError::InvalidQuery(format!("bad Firestore URL: {e}")))?;
        if let Some(key) = api_key {
            run_query_url.query_pairs_mut().append_pair("key", &key);
        }

        Ok(Self {
            client,
            run_query_url,
        })
    }
}

#[async_trait]
impl ListingStore for FirestoreStore {
    async fn query(&self, query: &ListingQuery) -> Result<Vec<ListingDoc>, StoreError> {
        query.validate()?;

        let request = self
            .client
            .post(self.run_query_url.clone())
            .json(&encode_query(query));

        debug!(%query, "firestore runQuery");
        let response = request
            .send()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(classify_failure(status, &body));
        }

        decode_run_query(&body)
    }

    fn name(&self) -> &'static str {
        "firestore"
    }
}

/// Map a non-success runQuery response onto the store error taxonomy.
pub(crate) fn classify_failure(status: StatusCode, body: &str) -> StoreError {
    let envelope = decode_error(body);
    let code = envelope.as_ref().map_or("", |e| e.status.as_str());
    let detail = match &envelope {
        Some(e) if !e.status.is_empty() => format!("{}: {}", e.status, e.message),
        Some(e) if !e.message.is_empty() => e.message.clone(),
        _ => format!("HTTP {status}"),
    };

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => StoreError::PermissionDenied(detail),
        // Missing composite index or unsupported filter/order combination.
        StatusCode::BAD_REQUEST if matches!(code, "FAILED_PRECONDITION" | "INVALID_ARGUMENT") => {
            StoreError::Rejected(detail)
        }
        _ => StoreError::Transport(detail),
    }
}
