#[derive(Clone, Default, Debug, PartialEq)]
pub struct GeoLocation {
    pub latitude: f64,  // In degrees
    pub longitude: f64, // In degrees
}

impl GeoLocation {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        GeoLocation { latitude, longitude }
    }
}
