use crate::domain::GeoLocation;

/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance in kilometers between two coordinates, using the Haversine formula.
///
/// Out of range coordinates are not rejected, they produce a mathematically defined but physically meaningless
/// distance. Range checks are up to the caller.
pub fn haversine_km(from: &GeoLocation, to: &GeoLocation) -> f64 {
    let lat1 = from.latitude.to_radians();
    let lon1 = from.longitude.to_radians();
    let lat2 = to.latitude.to_radians();
    let lon2 = to.longitude.to_radians();

    let d_lat = lat2 - lat1;
    let d_lon = lon2 - lon1;

    // Rounding can push a just past 1 for antipodal points, which would turn sqrt(1 - a) into NaN
    let a = ((d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2)).min(1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}
