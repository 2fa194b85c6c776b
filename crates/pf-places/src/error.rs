use thiserror::Error;

#[derive(Debug, Error)]
pub enum QueryError {
    #[error("unable to build the request url: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),
    #[error("the request failed: {0}")]
    RequestError(#[from] reqwest::Error),
    #[error("the request failed with status code: {0}")]
    ResponseError(reqwest::StatusCode),
    #[error("the response body could not be read: {0}")]
    ResponseBodyError(#[source] reqwest::Error),
    #[error("unable to parse the response body: {source}")]
    ParseError {
        body: String,
        #[source]
        source: DecodeError,
    },
}

impl QueryError {
    /// The raw response body, when one was received but could not be decoded.
    pub fn raw_body(&self) -> Option<&str> {
        match self {
            QueryError::ParseError { body, .. } => Some(body),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid xml: {0}")]
    Xml(#[from] quick_xml::DeError),
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unsupported response format: {0}")]
pub struct UnsupportedFormat(pub String);

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid base url `{0}`: {1}")]
    InvalidBaseUrl(String, #[source] url::ParseError),
}

#[derive(Debug, Error)]
pub enum ClientInitError {
    #[error("invalid client configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
    #[error("unable to build the http client: {0}")]
    HttpClientError(#[from] reqwest::Error),
}
