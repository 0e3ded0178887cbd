//! Grid spreadsheet API client
//!
//! Thin client for the spreadsheet-modeling service: one `query` call
//! applies values to named cells and reads named cells back.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::AppConfig;

const DEFAULT_API_URL: &str = "https://api.grid.is/v1";

/// Errors that can occur when talking to the Grid API
#[derive(Debug, Error)]
pub enum GridError {
    /// HTTP request failures
    #[error("HTTP error (status {status}): {body}")]
    HttpError { status: u16, body: String },

    /// JSON encoding/decoding issues
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<reqwest::Error> for GridError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            GridError::HttpError {
                status: status.as_u16(),
                body: err.to_string(),
            }
        } else {
            GridError::HttpError {
                status: 0,
                body: err.to_string(),
            }
        }
    }
}

/// A value written to a named cell
#[derive(Debug, Clone, Serialize)]
pub struct CellUpdate {
    /// Named cell or reference to write
    pub target: String,
    pub value: serde_json::Value,
}

impl CellUpdate {
    pub fn new(target: impl Into<String>, value: serde_json::Value) -> Self {
        Self {
            target: target.into(),
            value,
        }
    }
}

/// One workbook query: apply writes, then read cells back
#[derive(Debug, Clone, Serialize)]
pub struct QueryRequest {
    /// Cell writes applied before evaluation; omitted when empty
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub apply: Vec<CellUpdate>,
    /// Named cells to read after evaluation
    pub read: Vec<String>,
}

impl QueryRequest {
    /// Build a read-only query
    pub fn read_only(read: Vec<String>) -> Self {
        Self {
            apply: Vec::new(),
            read,
        }
    }

    /// Build a query applying writes before reading
    pub fn new(apply: Vec<CellUpdate>, read: Vec<String>) -> Self {
        Self { apply, read }
    }
}

/// Evaluated cell values returned by a query
#[derive(Debug, Clone, Deserialize)]
pub struct QueryResponse {
    pub read: Vec<CellValue>,
}

/// A single evaluated cell
#[derive(Debug, Clone, Deserialize)]
pub struct CellValue {
    /// The cell reference that was read
    #[serde(rename = "ref")]
    pub reference: String,
    pub value: serde_json::Value,
}

impl QueryResponse {
    /// Look up a read cell by reference
    pub fn value(&self, reference: &str) -> Option<&serde_json::Value> {
        self.read
            .iter()
            .find(|cell| cell.reference == reference)
            .map(|cell| &cell.value)
    }

    /// Collapse the read cells into a `{reference: value}` JSON object
    pub fn into_map(self) -> serde_json::Value {
        let mut map = serde_json::Map::new();
        for cell in self.read {
            map.insert(cell.reference, cell.value);
        }
        serde_json::Value::Object(map)
    }
}

/// Client for the Grid spreadsheet API
pub struct GridClient {
    /// HTTP client for making requests
    http_client: Client,
    /// Bearer API key
    api_key: String,
    /// API base URL (override via `GRID_API_URL`)
    base_url: String,
}

impl GridClient {
    /// Create a new Grid client from the app configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: &AppConfig) -> Result<Self, GridError> {
        let http_client = Client::builder()
            .connect_timeout(std::time::Duration::from_secs(5))
            .build()
            .map_err(|e| GridError::HttpError {
                status: 0,
                body: format!("Failed to create HTTP client: {}", e),
            })?;

        Ok(Self {
            http_client,
            api_key: config.grid_api_key.clone(),
            base_url: config
                .grid_api_url
                .clone()
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
        })
    }

    /// Build the query endpoint URL for a workbook
    fn build_query_url(&self, workbook_id: &str) -> String {
        format!("{}/workbooks/{}/query", self.base_url, workbook_id)
    }

    /// Run one query against a workbook
    pub async fn query(
        &self,
        workbook_id: &str,
        request: &QueryRequest,
    ) -> Result<QueryResponse, GridError> {
        let url = self.build_query_url(workbook_id);
        let response = self
            .http_client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await?;

        // Check status before attempting to parse the body
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|_| String::new());
            return Err(GridError::HttpError {
                status: status.as_u16(),
                body,
            });
        }

        let query_response = response.json::<QueryResponse>().await?;
        Ok(query_response)
    }
}
