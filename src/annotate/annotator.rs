use crate::annotate::validator::{LATITUDE_COLUMN, LONGITUDE_COLUMN, ValidatedTable};
use crate::domain::table::display_cell;
use crate::domain::{CellValue, GeoLocation, Table, TableError, haversine_km};
use serde_json::Number;
use thiserror::Error;
use tracing::{debug, instrument};

pub const DISTANCE_COLUMN: &str = "Distance (km)";

/// Derives a new table with the distance from `reference` to every row appended as `Distance (km)`. Row order and the
/// original fields are kept as-is.
#[instrument(skip(table), fields(rows = table.table().len()))]
pub fn annotate(table: &ValidatedTable, reference: &GeoLocation) -> Result<Table, AnnotateError> {
    let distances = table
        .table()
        .rows()
        .iter()
        .enumerate()
        .map(|(index, row)| {
            let location = GeoLocation::new(
                coordinate(&row[table.latitude_index()], index, LATITUDE_COLUMN)?,
                coordinate(&row[table.longitude_index()], index, LONGITUDE_COLUMN)?,
            );
            let distance = haversine_km(reference, &location);
            debug!(row = index + 1, distance, "Computed distance");

            Ok(Number::from_f64(distance).map(CellValue::Number).unwrap_or(CellValue::Null))
        })
        .collect::<Result<Vec<_>, AnnotateError>>()?;

    Ok(table.table().with_column(DISTANCE_COLUMN, distances)?)
}

// Sheets may hand numbers back as text, so numeric strings are accepted as well
fn coordinate(value: &CellValue, index: usize, column: &'static str) -> Result<f64, AnnotateError> {
    let parsed = match value {
        CellValue::Number(n) => n.as_f64(),
        CellValue::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    parsed.filter(|f| f.is_finite()).ok_or_else(|| AnnotateError::InvalidCoordinate {
        row: index + 1,
        column,
        value: display_cell(value),
    })
}

#[derive(Error, Debug, PartialEq)]
pub enum AnnotateError {
    #[error("row {row} has an invalid {column} value '{value}'")]
    InvalidCoordinate { row: usize, column: &'static str, value: String },
    #[error(transparent)]
    Table(#[from] TableError),
}
