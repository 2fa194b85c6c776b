use serde::{Deserialize, Deserializer, Serialize};

use crate::{api_interfaces::text_search_xml, error::DecodeError, ResponseFormat};

/// Decoded text search response.
///
/// The same structure is filled from either wire format: JSON uses
/// `html_attributions` and `results`, XML repeats `html_attribution` and
/// `result` elements under the root. Missing and `null` fields decode to
/// their empty value.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename = "PlaceSearchResponse", default)]
pub struct QueryResult {
    #[serde(deserialize_with = "null_as_default")]
    pub html_attributions: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(deserialize_with = "null_as_default")]
    pub results: Vec<PlaceResult>,
}

/// A single place.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaceResult {
    #[serde(deserialize_with = "null_as_default")]
    pub place_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub formatted_address: String,
    #[serde(deserialize_with = "null_as_default")]
    pub icon: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub rating: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub reference: String,
    #[serde(deserialize_with = "null_as_default")]
    pub geometry: Geometry,
    #[serde(deserialize_with = "null_as_default")]
    pub opening_hours: OpeningHours,
    #[serde(deserialize_with = "null_as_default")]
    pub photo: Photo,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Geometry {
    #[serde(deserialize_with = "null_as_default")]
    pub location: LatLng,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LatLng {
    #[serde(deserialize_with = "null_as_default")]
    pub lat: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub lng: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OpeningHours {
    #[serde(deserialize_with = "null_as_default")]
    pub open_now: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Photo {
    #[serde(deserialize_with = "null_as_default")]
    pub height: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub width: u32,
    #[serde(
        rename = "html_attributions",
        alias = "html_attribution",
        deserialize_with = "null_as_default"
    )]
    pub html_attributions: String,
    #[serde(deserialize_with = "null_as_default")]
    pub photo_reference: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl QueryResult {
    /// Decode a response body in the given format.
    ///
    /// XML text content is trimmed, so leading and trailing whitespace in
    /// element values is not preserved. JSON strings are kept as-is.
    pub fn decode(body: &str, format: ResponseFormat) -> Result<Self, DecodeError> {
        let decoded = match format {
            ResponseFormat::Json => serde_json::from_str(body)?,
            ResponseFormat::Xml => {
                quick_xml::de::from_str::<text_search_xml::Response>(body)?.into()
            }
        };
        Ok(decoded)
    }

    /// Keep at most `limit` results, in response order.
    pub fn truncate(&mut self, limit: usize) {
        self.results.truncate(limit);
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}
