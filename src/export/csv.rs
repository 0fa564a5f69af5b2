use crate::domain::Table;
use crate::domain::table::display_cell;
use csv::Writer;
use std::io;
use std::string::FromUtf8Error;
use thiserror::Error;

pub const CSV_CONTENT_TYPE: &str = "text/csv";

/// Serializes a table as CSV: a header row followed by one line per record. Fields are quoted only when needed.
pub fn to_csv(table: &Table) -> Result<String, ExportError> {
    let mut writer = Writer::from_writer(Vec::new());

    writer.write_record(table.columns())?;
    for row in table.rows() {
        writer.write_record(row.iter().map(display_cell))?;
    }

    let bytes = writer.into_inner().map_err(|e| ExportError::Io(e.into_error()))?;
    Ok(String::from_utf8(bytes)?)
}

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("unable to write CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("unable to flush CSV: {0}")]
    Io(io::Error),
    #[error("CSV output is not valid UTF-8: {0}")]
    Utf8(#[from] FromUtf8Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn to_csv_writes_a_header_and_one_line_per_row() -> Result<(), ExportError> {
        let table = Table::new(
            vec!["City".to_string(), "Latitude".to_string(), "Longitude".to_string(), "Distance (km)".to_string()],
            vec![
                vec![json!("Atlanta"), json!(33.749), json!(-84.388), json!(0.0)],
                vec![json!("Macon"), json!(32.8407), json!(-83.6324), json!(125)],
            ],
        )
        .unwrap();

        let csv = to_csv(&table)?;

        assert_eq!(
            csv,
            "City,Latitude,Longitude,Distance (km)\nAtlanta,33.749,-84.388,0.0\nMacon,32.8407,-83.6324,125\n"
        );

        Ok(())
    }

    #[test]
    fn to_csv_quotes_fields_when_needed() -> Result<(), ExportError> {
        let table = Table::new(
            vec!["City".to_string(), "Note".to_string()],
            vec![vec![json!("Washington, D.C."), json!("the \"capital\"")], vec![json!(null), json!(true)]],
        )
        .unwrap();

        let csv = to_csv(&table)?;

        assert_eq!(csv, "City,Note\n\"Washington, D.C.\",\"the \"\"capital\"\"\"\n,TRUE\n");

        Ok(())
    }

    #[test]
    fn to_csv_writes_only_the_header_for_an_empty_table() -> Result<(), ExportError> {
        let table = Table::new(vec!["City".to_string()], vec![]).unwrap();

        assert_eq!(to_csv(&table)?, "City\n");

        Ok(())
    }
}
