mod api_interfaces;
mod api_key;
pub mod client;
pub mod constants;
pub mod error;
mod format;
pub mod options;
mod request;
pub mod results;
mod util;

pub use api_key::ApiKey;
pub use client::{Client, ClientConfig, SearchResponse};
pub use format::ResponseFormat;
pub use options::SearchOptions;
pub use request::{SearchRequest, SearchRequestBuilder, SearchRequestBuilderError};
pub use results::{PlaceResult, QueryResult};
pub use util::default_http_client;
