use crate::domain::Table;
use thiserror::Error;

pub const CITY_COLUMN: &str = "City";
pub const LATITUDE_COLUMN: &str = "Latitude";
pub const LONGITUDE_COLUMN: &str = "Longitude";

const REQUIRED_COLUMNS: [&str; 3] = [CITY_COLUMN, LATITUDE_COLUMN, LONGITUDE_COLUMN];

/// A table known to carry the required columns, with the coordinate column positions resolved.
#[derive(Debug)]
pub struct ValidatedTable<'a> {
    table: &'a Table,
    latitude: usize,
    longitude: usize,
}

impl<'a> ValidatedTable<'a> {
    pub fn table(&self) -> &'a Table {
        self.table
    }

    pub fn latitude_index(&self) -> usize {
        self.latitude
    }

    pub fn longitude_index(&self) -> usize {
        self.longitude
    }
}

pub fn validate(table: &Table) -> Result<ValidatedTable<'_>, ValidationError> {
    let missing = REQUIRED_COLUMNS
        .iter()
        .filter(|column| table.column_index(column).is_none())
        .map(|column| column.to_string())
        .collect::<Vec<_>>();

    match (table.column_index(LATITUDE_COLUMN), table.column_index(LONGITUDE_COLUMN)) {
        (Some(latitude), Some(longitude)) if missing.is_empty() => Ok(ValidatedTable {
            table,
            latitude,
            longitude,
        }),
        _ => Err(ValidationError::MissingColumns { missing }),
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum ValidationError {
    #[error("The Google Sheet must have 'City', 'Latitude', and 'Longitude' columns (missing: '{}').", .missing.join("', '"))]
    MissingColumns { missing: Vec<String> },
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    fn table(columns: &[&str]) -> Table {
        let row = columns.iter().map(|_| json!(1)).collect();
        Table::new(columns.iter().map(|c| c.to_string()).collect(), vec![row]).unwrap()
    }

    #[test]
    fn validate_resolves_the_coordinate_columns() {
        let table = table(&["Longitude", "City", "Country", "Latitude"]);

        let validated = validate(&table).unwrap();

        assert_eq!(validated.latitude_index(), 3);
        assert_eq!(validated.longitude_index(), 0);
    }

    #[rstest]
    #[case(&["City", "Latitude"], &["Longitude"])]
    #[case(&["Latitude", "Longitude"], &["City"])]
    #[case(&["city", "latitude", "longitude"], &["City", "Latitude", "Longitude"])]
    #[case(&[], &["City", "Latitude", "Longitude"])]
    fn validate_names_every_missing_column(#[case] columns: &[&str], #[case] missing: &[&str]) {
        let table = table(columns);

        let error = validate(&table).unwrap_err();

        assert_eq!(
            error,
            ValidationError::MissingColumns {
                missing: missing.iter().map(|c| c.to_string()).collect()
            }
        );
    }

    #[test]
    fn missing_columns_message_is_actionable() {
        let error = validate(&table(&["City", "Latitude"])).unwrap_err();

        assert_eq!(
            error.to_string(),
            "The Google Sheet must have 'City', 'Latitude', and 'Longitude' columns (missing: 'Longitude')."
        );
    }
}
