use serde::Deserialize;

use crate::results::{Geometry, OpeningHours, Photo, PlaceResult, QueryResult};

/// Raw XML text search response.
///
/// Repeated elements are collected wherever they appear under their parent,
/// which needs quick-xml's `overlapped-lists` feature.
#[derive(Default, Deserialize)]
#[serde(default)]
pub struct Response {
    #[serde(rename = "html_attribution", alias = "html_attributions")]
    pub html_attributions: Vec<String>,
    pub status: String,
    #[serde(rename = "result", alias = "results")]
    pub results: Vec<Place>,
}

/// Raw place from XML. A place may carry several `<photo>` elements.
#[derive(Default, Deserialize)]
#[serde(default)]
pub struct Place {
    pub place_id: String,
    pub formatted_address: String,
    pub icon: String,
    pub name: String,
    pub rating: f64,
    pub reference: String,
    pub geometry: Geometry,
    pub opening_hours: OpeningHours,
    #[serde(rename = "photo")]
    pub photos: Vec<Photo>,
}

impl From<Response> for QueryResult {
    fn from(response: Response) -> Self {
        Self {
            html_attributions: response.html_attributions,
            status: response.status,
            results: response.results.into_iter().map(PlaceResult::from).collect(),
        }
    }
}

impl From<Place> for PlaceResult {
    fn from(place: Place) -> Self {
        Self {
            place_id: place.place_id,
            formatted_address: place.formatted_address,
            icon: place.icon,
            name: place.name,
            rating: place.rating,
            reference: place.reference,
            geometry: place.geometry,
            opening_hours: place.opening_hours,
            // the first photo is the primary one
            photo: place.photos.into_iter().next().unwrap_or_default(),
        }
    }
}
