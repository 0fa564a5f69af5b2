mod distance;
mod geo_location;
mod reference_point;
pub mod table;

pub use distance::haversine_km;
pub use geo_location::GeoLocation;
pub use reference_point::ReferencePoint;
pub use table::{CellValue, Table, TableError};
