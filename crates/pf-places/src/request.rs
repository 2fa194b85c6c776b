use derive_builder::Builder;
use url::Url;

use crate::{
    constants::{API_KEY_PARAM, DEFAULT_TEXT_SEARCH_URL, QUERY_PARAM},
    error::QueryError,
    options::{QueryParam, SearchOptions},
    ApiKey, ResponseFormat,
};

/// Parameters of a single text search.
///
/// `api_key`, `location_name` and `response_format` are required; the builder
/// fails without them.
#[derive(Builder, Clone, Debug, PartialEq)]
#[builder(setter(into))]
pub struct SearchRequest {
    pub api_key: ApiKey,
    /// Primary search term, e.g. "Restaurant Le Food".
    pub location_name: String,
    /// Area used to narrow the results, e.g. a city name.
    #[builder(setter(into, strip_option), default)]
    pub location_area_name: Option<String>,
    pub response_format: ResponseFormat,
    /// Maximum number of results kept after decoding.
    #[builder(setter(strip_option), default)]
    pub result_limit: Option<usize>,
    #[builder(default)]
    pub options: SearchOptions,
}

impl SearchRequestBuilder {
    /// Set a single optional parameter by its wire name.
    pub fn option(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.options
            .get_or_insert_with(SearchOptions::default)
            .insert(key, value);
        self
    }
}

impl SearchRequest {
    pub fn builder() -> SearchRequestBuilder {
        SearchRequestBuilder::default()
    }

    /// The free-text `query` value: the location name, followed by the area
    /// name when one is set.
    pub fn query_text(&self) -> String {
        match self
            .location_area_name
            .as_deref()
            .filter(|area| !area.is_empty())
        {
            Some(area) => format!("{} {}", self.location_name, area),
            None => self.location_name.clone(),
        }
    }

    /// Build the full request URL.
    ///
    /// `base_path` defaults to [`DEFAULT_TEXT_SEARCH_URL`] when missing or
    /// empty. The response format is appended to it verbatim, so it should
    /// normally end with a `/`. Any query string or fragment on the base path
    /// is dropped.
    pub fn build_url(&self, base_path: Option<&str>) -> Result<Url, QueryError> {
        let base_path = base_path
            .filter(|path| !path.is_empty())
            .unwrap_or(DEFAULT_TEXT_SEARCH_URL);
        let mut url = Url::parse(base_path)?;
        let path = format!("{}{}", url.path(), self.response_format.path_suffix());
        url.set_path(&path);
        url.set_query(None);
        url.set_fragment(None);

        {
            let mut query = url.query_pairs_mut();
            query.append_pair(QUERY_PARAM, &self.query_text());
            query.append_pair(API_KEY_PARAM, self.api_key.get());
            for param in self.options.to_query_params() {
                match param {
                    QueryParam::Pair(key, value) => {
                        query.append_pair(&key, &value);
                    }
                    QueryParam::Flag(key) => {
                        query.append_key_only(&key);
                    }
                }
            }
        }

        tracing::debug!(
            host = url.host_str().unwrap_or_default(),
            path = url.path(),
            format = %self.response_format,
            "built text search url"
        );
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const FAKE_API_KEY: &str = "fake-api-key";

    fn request(format: ResponseFormat) -> SearchRequest {
        SearchRequest::builder()
            .api_key(FAKE_API_KEY)
            .location_name("Auberge du dragon rouge")
            .location_area_name("Montreal")
            .response_format(format)
            .build()
            .unwrap()
    }

    fn query_map(url: &Url) -> HashMap<String, String> {
        url.query_pairs().into_owned().collect()
    }

    #[test]
    fn build_url_default_base() {
        // Arrange
        let request = request(ResponseFormat::Json);

        // Act
        let url = request.build_url(None).unwrap();

        // Assert
        assert!(
            url.as_str().starts_with(&format!("{}json?", DEFAULT_TEXT_SEARCH_URL)),
            "unexpected url: {}",
            url
        );
        assert_eq!(
            url.query(),
            Some("query=Auberge+du+dragon+rouge+Montreal&key=fake-api-key")
        );
    }

    #[test]
    fn build_url_empty_base_uses_default() {
        let request = request(ResponseFormat::Xml);

        let url = request.build_url(Some("")).unwrap();

        assert_eq!(url.scheme(), "https");
        assert_eq!(url.host_str(), Some("maps.googleapis.com"));
        assert_eq!(url.path(), "/maps/api/place/textsearch/xml");
    }

    #[test]
    fn build_url_custom_base_appends_format() {
        let request = request(ResponseFormat::Xml);

        let url = request
            .build_url(Some("http://localhost:8080/textsearch/"))
            .unwrap();

        assert_eq!(url.path(), "/textsearch/xml");
        assert!(url.path().ends_with(ResponseFormat::Xml.path_suffix()));
    }

    #[test]
    fn build_url_escapes_once() {
        // Arrange
        let request = SearchRequest::builder()
            .api_key("a/b+c d")
            .location_name("Café & Bar")
            .location_area_name("Québec")
            .response_format(ResponseFormat::Json)
            .build()
            .unwrap();

        // Act
        let url = request.build_url(None).unwrap();

        // Assert
        let params = query_map(&url);
        assert_eq!(params["query"], "Café & Bar Québec");
        assert_eq!(params["key"], "a/b+c d");
        assert!(url.query().unwrap().contains("key=a%2Fb%2Bc+d"));
    }

    #[test]
    fn build_url_without_area_has_no_trailing_space() {
        let request = SearchRequest::builder()
            .api_key(FAKE_API_KEY)
            .location_name("Tim Hortons")
            .response_format(ResponseFormat::Json)
            .build()
            .unwrap();

        let url = request.build_url(None).unwrap();

        assert_eq!(query_map(&url)["query"], "Tim Hortons");
        assert_eq!(request.query_text(), "Tim Hortons");
    }

    #[test]
    fn build_url_merges_options() {
        // Arrange
        let request = SearchRequest::builder()
            .api_key(FAKE_API_KEY)
            .location_name("pizza")
            .response_format(ResponseFormat::Json)
            .option("language", "fr")
            .option("type", "restaurant")
            .option("opennow", "")
            .option("location", "45.5,-73.5")
            .option("radius", "1500")
            .build()
            .unwrap();

        // Act
        let url = request.build_url(None).unwrap();

        // Assert
        let params = query_map(&url);
        assert_eq!(params["language"], "fr");
        assert_eq!(params["type"], "restaurant");
        assert_eq!(params["location"], "45.5,-73.5");
        assert_eq!(params["radius"], "1500");
        assert!(url.query().unwrap().split('&').any(|p| p == "opennow"));
    }

    #[test]
    fn build_url_replaces_base_query() {
        let request = request(ResponseFormat::Json);

        let url = request
            .build_url(Some("http://localhost/search/?stale=1&"))
            .unwrap();

        assert_eq!(url.path(), "/search/json");
        assert!(!query_map(&url).contains_key("stale"));
        assert_eq!(query_map(&url)["key"], FAKE_API_KEY);
    }

    #[test]
    fn build_url_drops_base_fragment() {
        let request = request(ResponseFormat::Xml);

        let url = request
            .build_url(Some("http://localhost/search/#frag"))
            .unwrap();

        assert_eq!(url.path(), "/search/xml");
        assert_eq!(url.fragment(), None);
        assert_eq!(query_map(&url)["query"], "Auberge du dragon rouge Montreal");
    }

    #[test]
    fn build_url_malformed_base() {
        let request = request(ResponseFormat::Json);

        let url = request.build_url(Some("not a url/"));

        assert!(url.is_err());
        assert!(matches!(url.unwrap_err(), QueryError::InvalidBaseUrl(_)));
    }

    #[test]
    fn builder_requires_fields() {
        let missing_format = SearchRequest::builder()
            .api_key(FAKE_API_KEY)
            .location_name("pizza")
            .build();
        let missing_name = SearchRequest::builder()
            .api_key(FAKE_API_KEY)
            .response_format(ResponseFormat::Json)
            .build();

        assert!(missing_format.is_err());
        assert!(missing_name.is_err());
    }
}
