use crate::domain::GeoLocation;

/// The origin every row's distance is measured from, constant for one run.
#[derive(Clone, Debug, PartialEq)]
pub struct ReferencePoint {
    pub label: String,
    pub location: GeoLocation,
}

impl ReferencePoint {
    pub fn new(label: impl Into<String>, location: GeoLocation) -> Self {
        ReferencePoint {
            label: label.into(),
            location,
        }
    }
}
