use std::time::Duration;

/// The default base path for the Places text search service.
/// The response format (`json` or `xml`) is appended to it.
pub const DEFAULT_TEXT_SEARCH_URL: &str = "https://maps.googleapis.com/maps/api/place/textsearch/";

/// Query parameter carrying the free-text search term
pub const QUERY_PARAM: &str = "query";
/// Query parameter carrying the API key
pub const API_KEY_PARAM: &str = "key";

/// Timeout applied to a whole request when none is configured
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
