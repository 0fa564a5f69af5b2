use crate::domain::table::display_cell;
use crate::domain::{CellValue, Table};
use crate::sheets::DataSourceError;
use std::collections::HashSet;

/// Turns worksheet values into records keyed by the first row. Short rows are padded with empty strings, the way the
/// spreadsheet shows empty trailing cells.
pub fn records_from_values(mut values: Vec<Vec<CellValue>>) -> Result<Table, DataSourceError> {
    if values.is_empty() {
        return Ok(Table::default());
    }

    let width = values.iter().map(Vec::len).max().unwrap_or(0);
    for row in values.iter_mut() {
        row.resize(width, CellValue::String(String::new()));
    }

    let rows = values.split_off(1);
    let columns = values.remove(0).iter().map(display_cell).collect::<Vec<_>>();

    let mut seen = HashSet::with_capacity(columns.len());
    if let Some(duplicate) = columns.iter().filter(|c| !c.is_empty()).find(|c| !seen.insert(c.as_str())) {
        return Err(DataSourceError::DuplicateHeader(duplicate.clone()));
    }

    // A header without records carries no fields at all
    if rows.is_empty() {
        return Ok(Table::default());
    }

    Ok(Table::new(columns, rows)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotate::validate;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn records_from_values_uses_the_first_row_as_header() -> Result<(), DataSourceError> {
        let table = records_from_values(vec![
            vec![json!("City"), json!("Latitude"), json!("Longitude")],
            vec![json!("Atlanta"), json!(33.749), json!(-84.388)],
            vec![json!("Macon"), json!(32.8407), json!(-83.6324)],
        ])?;

        assert_eq!(table.columns(), ["City", "Latitude", "Longitude"]);
        assert_eq!(
            table.rows(),
            [
                vec![json!("Atlanta"), json!(33.749), json!(-84.388)],
                vec![json!("Macon"), json!(32.8407), json!(-83.6324)],
            ]
        );

        Ok(())
    }

    #[test]
    fn records_from_values_pads_short_rows() -> Result<(), DataSourceError> {
        let table = records_from_values(vec![
            vec![json!("City"), json!("Latitude"), json!("Longitude")],
            vec![json!("Macon")],
        ])?;

        assert_eq!(table.rows()[0], vec![json!("Macon"), json!(""), json!("")]);

        Ok(())
    }

    #[test]
    fn records_from_values_keeps_cells_beyond_the_header() -> Result<(), DataSourceError> {
        let table = records_from_values(vec![vec![json!("City")], vec![json!("Macon"), json!("note")]])?;

        assert_eq!(table.columns(), ["City", ""]);
        assert_eq!(table.rows()[0], vec![json!("Macon"), json!("note")]);

        Ok(())
    }

    #[test]
    fn records_from_values_returns_an_empty_table_for_an_empty_sheet() -> Result<(), DataSourceError> {
        let table = records_from_values(vec![])?;

        assert!(table.columns().is_empty());
        assert!(table.is_empty());

        Ok(())
    }

    #[test]
    fn records_from_values_drops_the_header_of_a_sheet_without_records() -> Result<(), DataSourceError> {
        let table = records_from_values(vec![vec![json!("City"), json!("Latitude"), json!("Longitude")]])?;

        assert!(table.columns().is_empty());
        assert!(table.is_empty());
        assert!(validate(&table).is_err(), "a header-only sheet should fail validation");

        Ok(())
    }

    #[test]
    fn records_from_values_rejects_duplicate_headers() {
        let result = records_from_values(vec![vec![json!("City"), json!("Latitude"), json!("City")]]);

        assert!(matches!(result, Err(DataSourceError::DuplicateHeader(column)) if column == "City"));
    }
}
