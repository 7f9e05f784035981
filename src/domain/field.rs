//! Saved fields from the service's field catalogue. A field is a named
//! point with some agronomic metadata.

use serde::Deserialize;

use crate::domain::spi::{lenient_f64, lenient_opt};

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Field {
    #[serde(deserialize_with = "lenient_opt")]
    pub id: Option<String>,
    #[serde(deserialize_with = "lenient_opt")]
    pub name: Option<String>,
    #[serde(rename = "lat", deserialize_with = "lenient_f64")]
    pub latitude: Option<f64>,
    #[serde(rename = "lon", deserialize_with = "lenient_f64")]
    pub longitude: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub area_ha: Option<f64>,
    #[serde(deserialize_with = "lenient_opt")]
    pub has_irrigation: Option<bool>,
    #[serde(deserialize_with = "lenient_opt")]
    pub soil_type: Option<String>,
}

impl Field {
    /// Coordinates of the field centre, when both are known.
    #[must_use]
    pub fn point(&self) -> Option<(f64, f64)> {
        Some((self.latitude?, self.longitude?))
    }
}

/// Field ids travel in the URL path, so only plain id characters are accepted.
#[must_use]
pub fn is_valid_field_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
