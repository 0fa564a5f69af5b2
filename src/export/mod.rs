mod csv;

pub use self::csv::{CSV_CONTENT_TYPE, to_csv};
