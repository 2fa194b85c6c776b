use std::time::Duration;

use reqwest::StatusCode;
use url::Url;

use crate::{
    constants::DEFAULT_REQUEST_TIMEOUT,
    error::{ClientInitError, ConfigError, QueryError},
    util::http_client,
    QueryResult, SearchRequest,
};

#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Overrides the text search base path. The response format is appended
    /// to it, so it normally ends with a `/`.
    pub base_url: Option<String>,
    pub timeout: Duration,
    pub user_agent: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout: DEFAULT_REQUEST_TIMEOUT,
            user_agent: None,
        }
    }
}

impl ClientConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(base_url) = self.base_url.as_deref().filter(|url| !url.is_empty()) {
            Url::parse(base_url)
                .map_err(|e| ConfigError::InvalidBaseUrl(base_url.to_string(), e))?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug)]
pub struct Client {
    http_client: reqwest::Client,
    config: ClientConfig,
}

/// Decoded result along with the raw body it was decoded from.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchResponse {
    pub body: String,
    pub result: QueryResult,
}

impl Client {
    pub fn new(http_client: reqwest::Client, config: ClientConfig) -> Result<Self, ClientInitError> {
        config.validate()?;
        Ok(Self {
            http_client,
            config,
        })
    }

    /// Build a client with the default HTTP settings for the given config.
    pub fn with_config(config: ClientConfig) -> Result<Self, ClientInitError> {
        config.validate()?;
        let http_client = http_client(config.timeout, config.user_agent.as_deref())?;
        Ok(Self {
            http_client,
            config,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Run a text search and decode the reply into `out`.
    ///
    /// Returns the raw response body. `out` is only replaced once the body
    /// decoded successfully; on a decode failure the body is carried by
    /// [`QueryError::ParseError`] instead.
    pub async fn query(
        &self,
        request: &SearchRequest,
        out: &mut QueryResult,
    ) -> Result<String, QueryError> {
        let url = request.build_url(self.config.base_url.as_deref())?;
        let response = self
            .http_client
            .get(url)
            .timeout(self.config.timeout)
            .send()
            .await?;
        let status = response.status();
        if status != StatusCode::OK {
            tracing::warn!(%status, "text search request failed");
            // Release the connection before bailing out.
            drop(response);
            return Err(QueryError::ResponseError(status));
        }
        let body = response
            .text()
            .await
            .map_err(QueryError::ResponseBodyError)?;
        match QueryResult::decode(&body, request.response_format) {
            Ok(mut decoded) => {
                if let Some(limit) = request.result_limit {
                    decoded.truncate(limit);
                }
                tracing::debug!(
                    status = %decoded.status,
                    results = decoded.results.len(),
                    "decoded text search response"
                );
                *out = decoded;
                Ok(body)
            }
            Err(source) => {
                tracing::debug!(error = %source, "unable to decode text search response");
                Err(QueryError::ParseError { body, source })
            }
        }
    }

    /// Run a text search, returning the decoded result and raw body.
    pub async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, QueryError> {
        let mut result = QueryResult::default();
        let body = self.query(request, &mut result).await?;
        Ok(SearchResponse { body, result })
    }
}
