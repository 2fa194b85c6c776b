use std::collections::BTreeMap;

/// Optional text search parameters.
///
/// Recognized keys get typed fields; anything else is kept in `extra` and sent
/// as-is. Values are never range-checked, the service decides what it accepts.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SearchOptions {
    /// Latitude/longitude to bias results around, as `lat,lng`. Sent exactly
    /// as given. The service expects a `radius` alongside it.
    pub location: Option<String>,
    /// Bias distance in meters.
    pub radius: Option<u32>,
    /// Language code for the returned results.
    pub language: Option<String>,
    /// Price levels, 0 (most affordable) to 4 (most expensive).
    pub min_price: Option<u8>,
    pub max_price: Option<u8>,
    /// Only places open at the time of the query.
    pub open_now: bool,
    /// Place types, at least one of which must match.
    pub types: Vec<String>,
    /// Only Zagat selected businesses.
    pub zagat_selected: bool,
    /// Unrecognized parameters, passed through verbatim.
    pub extra: BTreeMap<String, String>,
}

/// Query parameter names understood by the text search service.
pub mod keys {
    pub const LOCATION: &str = "location";
    pub const RADIUS: &str = "radius";
    pub const LANGUAGE: &str = "language";
    pub const MIN_PRICE: &str = "minprice";
    pub const MAX_PRICE: &str = "maxprice";
    pub const OPEN_NOW: &str = "opennow";
    pub const TYPES: &str = "types";
    pub const ZAGAT_SELECTED: &str = "zagatselected";
}

/// One query string entry. Flags are sent as a bare key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QueryParam {
    Pair(String, String),
    Flag(String),
}

impl SearchOptions {
    /// Set a parameter by its wire name. Recognized keys whose value does not
    /// parse into the typed field are kept verbatim in `extra`, and the typed
    /// field is cleared so the last value set for a key is the one sent.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        let typed = match key.as_str() {
            keys::LOCATION => {
                self.location = Some(value.clone());
                true
            }
            keys::RADIUS => {
                self.radius = value.trim().parse::<u32>().ok();
                self.radius.is_some()
            }
            keys::LANGUAGE => {
                self.language = Some(value.clone());
                true
            }
            keys::MIN_PRICE => {
                self.min_price = value.trim().parse::<u8>().ok();
                self.min_price.is_some()
            }
            keys::MAX_PRICE => {
                self.max_price = value.trim().parse::<u8>().ok();
                self.max_price.is_some()
            }
            keys::OPEN_NOW => {
                self.open_now = is_truthy(&value);
                true
            }
            keys::TYPES => {
                self.types = value
                    .split('|')
                    .filter(|t| !t.is_empty())
                    .map(str::to_string)
                    .collect();
                true
            }
            keys::ZAGAT_SELECTED => {
                self.zagat_selected = is_truthy(&value);
                true
            }
            _ => false,
        };
        if typed {
            self.extra.remove(&key);
        } else {
            self.extra.insert(key, value);
        }
    }

    /// Set the bias location from coordinates.
    pub fn set_location(&mut self, lat: f64, lng: f64) {
        self.location = Some(format!("{},{}", lat, lng));
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Query string entries in a stable order: recognized keys first, then
    /// passthrough keys sorted by name.
    pub fn to_query_params(&self) -> Vec<QueryParam> {
        let mut params = Vec::new();
        if let Some(location) = &self.location {
            params.push(pair(keys::LOCATION, location.clone()));
        }
        if let Some(radius) = self.radius {
            params.push(pair(keys::RADIUS, radius.to_string()));
        }
        if let Some(language) = &self.language {
            params.push(pair(keys::LANGUAGE, language.clone()));
        }
        if let Some(min_price) = self.min_price {
            params.push(pair(keys::MIN_PRICE, min_price.to_string()));
        }
        if let Some(max_price) = self.max_price {
            params.push(pair(keys::MAX_PRICE, max_price.to_string()));
        }
        if self.open_now {
            params.push(QueryParam::Flag(keys::OPEN_NOW.to_string()));
        }
        if !self.types.is_empty() {
            params.push(pair(keys::TYPES, self.types.join("|")));
        }
        if self.zagat_selected {
            params.push(QueryParam::Flag(keys::ZAGAT_SELECTED.to_string()));
        }
        params.extend(
            self.extra
                .iter()
                .map(|(key, value)| QueryParam::Pair(key.clone(), value.clone())),
        );
        params
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for SearchOptions {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut options = SearchOptions::default();
        for (key, value) in iter {
            options.insert(key, value);
        }
        options
    }
}

fn pair(key: &str, value: String) -> QueryParam {
    QueryParam::Pair(key.to_string(), value)
}

// A bare key (empty value) counts as set.
fn is_truthy(value: &str) -> bool {
    !matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "false" | "0" | "no"
    )
}
