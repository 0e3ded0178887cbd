//! Responses API client implementation

use async_trait::async_trait;
use reqwest::Client;

use crate::config::AppConfig;
use crate::llm::core::{
    error::LlmError,
    provider::ResponsesBackend,
    types::{Message, ToolSchema},
};

use super::types::{FunctionTool, ModelResponse, ResponsesRequest};

/// Model used for every chat exchange
pub const DEFAULT_MODEL: &str = "gpt-4o";

const DEFAULT_API_URL: &str = "https://api.openai.com/v1";

/// Client for the LLM responses API
///
/// Holds its credentials explicitly; nothing is read from ambient process
/// state after construction.
pub struct ResponsesClient {
    /// HTTP client for making requests
    http_client: Client,
    /// Bearer API key
    api_key: String,
    /// API base URL
    base_url: String,
    /// Model identifier sent with every request
    model: String,
}

impl ResponsesClient {
    /// Create a new responses client from the app configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: &AppConfig) -> Result<Self, LlmError> {
        let http_client = Client::builder()
            .connect_timeout(std::time::Duration::from_secs(5))
            .build()
            .map_err(|e| LlmError::HttpError {
                status: 0,
                body: format!("Failed to create HTTP client: {}", e),
            })?;

        Ok(Self {
            http_client,
            api_key: config.openai_api_key.clone(),
            base_url: DEFAULT_API_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
        })
    }

    /// Override the API base URL (used against local stand-ins)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Build the endpoint URL for response creation
    fn build_endpoint_url(&self) -> String {
        format!("{}/responses", self.base_url)
    }
}

#[async_trait]
impl ResponsesBackend for ResponsesClient {
    async fn create_model_response(
        &self,
        input: &[Message],
        tools: &[ToolSchema],
    ) -> Result<ModelResponse, LlmError> {
        let request = ResponsesRequest {
            model: &self.model,
            input,
            tools: if tools.is_empty() {
                None
            } else {
                Some(tools.iter().map(FunctionTool::from).collect())
            },
        };

        let url = self.build_endpoint_url();
        let response = self
            .http_client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        // Check status before attempting to parse the body
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|_| String::new());
            return Err(LlmError::HttpError {
                status: status.as_u16(),
                body,
            });
        }

        let model_response = response.json::<ModelResponse>().await?;
        Ok(model_response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> AppConfig {
        AppConfig {
            openai_api_key: "sk-test".to_string(),
            grid_api_key: "grid-test".to_string(),
            grid_api_url: None,
        }
    }

    #[test]
    fn test_endpoint_url_format() {
        let client = ResponsesClient::new(&test_config()).unwrap();
        assert_eq!(
            client.build_endpoint_url(),
            "https://api.openai.com/v1/responses"
        );
    }

    #[test]
    fn test_base_url_override() {
        let client = ResponsesClient::new(&test_config())
            .unwrap()
            .with_base_url("http://localhost:8080/v1");
        assert_eq!(
            client.build_endpoint_url(),
            "http://localhost:8080/v1/responses"
        );
    }
}
