use crate::app_config::Reference;
use crate::domain::{GeoLocation, ReferencePoint};
use serde::Deserialize;
use thiserror::Error;
use url::form_urlencoded;

/// The page form, as submitted in the query string. Empty reference fields fall back to the configured defaults.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct RunQuery {
    #[serde(default)]
    pub sheet_url: String,
    pub city: Option<String>,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
}

impl RunQuery {
    pub fn sheet_url(&self) -> Option<&str> {
        Some(self.sheet_url.trim()).filter(|url| !url.is_empty())
    }

    pub fn city<'a>(&'a self, defaults: &'a Reference) -> &'a str {
        non_empty(&self.city).unwrap_or(defaults.city())
    }

    pub fn latitude(&self, defaults: &Reference) -> String {
        non_empty(&self.latitude).map(str::to_string).unwrap_or_else(|| defaults.location().latitude.to_string())
    }

    pub fn longitude(&self, defaults: &Reference) -> String {
        non_empty(&self.longitude).map(str::to_string).unwrap_or_else(|| defaults.location().longitude.to_string())
    }

    pub fn reference_point(&self, defaults: &Reference) -> Result<ReferencePoint, RunQueryError> {
        let latitude = parse_degrees("Reference Latitude", &self.latitude(defaults))?;
        let longitude = parse_degrees("Reference Longitude", &self.longitude(defaults))?;

        Ok(ReferencePoint::new(self.city(defaults), GeoLocation::new(latitude, longitude)))
    }

    /// Encodes the form back into a query string, so a result can be downloaded with the same inputs.
    pub fn to_query_string(&self, defaults: &Reference) -> String {
        form_urlencoded::Serializer::new(String::new())
            .append_pair("sheet_url", self.sheet_url.trim())
            .append_pair("city", self.city(defaults))
            .append_pair("latitude", &self.latitude(defaults))
            .append_pair("longitude", &self.longitude(defaults))
            .finish()
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn parse_degrees(field: &'static str, value: &str) -> Result<f64, RunQueryError> {
    value
        .parse::<f64>()
        .ok()
        .filter(|degrees| degrees.is_finite())
        .ok_or_else(|| RunQueryError::InvalidNumber {
            field,
            value: value.to_string(),
        })
}

#[derive(Error, Debug, PartialEq)]
pub enum RunQueryError {
    #[error("{field} must be a number, got '{value}'")]
    InvalidNumber { field: &'static str, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app_config::AppConfigBuilder;
    use pretty_assertions::assert_eq;

    fn query(sheet_url: &str, city: &str, latitude: &str, longitude: &str) -> RunQuery {
        RunQuery {
            sheet_url: sheet_url.to_string(),
            city: Some(city.to_string()),
            latitude: Some(latitude.to_string()),
            longitude: Some(longitude.to_string()),
        }
    }

    #[test]
    fn empty_fields_fall_back_to_the_configured_reference() {
        let config = AppConfigBuilder::new().build();

        let reference = query("", " ", "", "").reference_point(config.reference()).unwrap();

        assert_eq!(reference, ReferencePoint::new("Atlanta", GeoLocation::new(33.7490, -84.3880)));
    }

    #[test]
    fn submitted_fields_override_the_configured_reference() {
        let config = AppConfigBuilder::new().build();

        let reference = query("", "Chicago", "41.8781", " -87.6298 ").reference_point(config.reference()).unwrap();

        assert_eq!(reference, ReferencePoint::new("Chicago", GeoLocation::new(41.8781, -87.6298)));
    }

    #[test]
    fn out_of_range_reference_coordinates_are_accepted() {
        let config = AppConfigBuilder::new().build();

        let reference = query("", "Nowhere", "95", "-200").reference_point(config.reference()).unwrap();

        assert_eq!(reference.location, GeoLocation::new(95.0, -200.0));
    }

    #[test]
    fn non_numeric_reference_coordinates_are_rejected() {
        let config = AppConfigBuilder::new().build();

        let error = query("", "Atlanta", "north", "").reference_point(config.reference()).unwrap_err();

        assert_eq!(error.to_string(), "Reference Latitude must be a number, got 'north'");
    }

    #[test]
    fn sheet_url_is_none_when_blank() {
        assert_eq!(query("  ", "", "", "").sheet_url(), None);
        assert_eq!(query(" https://sheet ", "", "", "").sheet_url(), Some("https://sheet"));
    }

    #[test]
    fn to_query_string_encodes_the_resolved_form() {
        let config = AppConfigBuilder::new().build();

        let encoded = query("https://docs.google.com/spreadsheets/d/key/edit", "", "", "").to_query_string(config.reference());

        assert_eq!(
            encoded,
            "sheet_url=https%3A%2F%2Fdocs.google.com%2Fspreadsheets%2Fd%2Fkey%2Fedit&city=Atlanta&latitude=33.749&longitude=-84.388"
        );
    }
}
