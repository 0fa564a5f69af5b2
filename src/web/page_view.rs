use crate::app_config::AppConfig;
use crate::domain::Table;
use crate::domain::table::display_cell;
use crate::pipeline::{ErrorKind, RunError};
use crate::web::run_query::RunQuery;
use serde::Serialize;

pub const PAGE_TITLE: &str = "Distance Calculator from Google Sheets";

#[derive(Debug, Serialize)]
pub struct PageView {
    title: &'static str,
    form: FormView,
    success: Option<String>,
    error: Option<ErrorView>,
    table: Option<TableView>,
    download_href: Option<String>,
    file_name: String,
}

#[derive(Debug, Serialize)]
struct FormView {
    sheet_url: String,
    city: String,
    latitude: String,
    longitude: String,
}

#[derive(Debug, Serialize)]
struct ErrorView {
    kind: &'static str,
    message: String,
}

#[derive(Debug, Serialize)]
struct TableView {
    reference: String,
    empty: bool,
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl PageView {
    pub fn new(query: &RunQuery, config: &AppConfig) -> Self {
        let defaults = config.reference();
        PageView {
            title: PAGE_TITLE,
            form: FormView {
                sheet_url: query.sheet_url.trim().to_string(),
                city: query.city(defaults).to_string(),
                latitude: query.latitude(defaults),
                longitude: query.longitude(defaults),
            },
            success: None,
            error: None,
            table: None,
            download_href: None,
            file_name: config.export().file_name().to_string(),
        }
    }

    pub fn with_table(mut self, sheet_url: &str, reference: &str, table: &Table, download_href: String) -> Self {
        self.success = Some(format!("Data fetched successfully from {}!", sheet_url));
        self.table = Some(TableView {
            reference: reference.to_string(),
            empty: table.is_empty(),
            columns: table.columns().to_vec(),
            rows: table.rows().iter().map(|row| row.iter().map(display_cell).collect()).collect(),
        });
        self.download_href = Some(download_href);
        self
    }

    pub fn with_run_error(self, error: &RunError) -> Self {
        let kind = match error.kind() {
            ErrorKind::Access => "access",
            ErrorKind::Schema => "schema",
            ErrorKind::Unanticipated => "unanticipated",
        };
        self.with_error(kind, error.user_message())
    }

    pub fn with_error(mut self, kind: &'static str, message: String) -> Self {
        self.error = Some(ErrorView { kind, message });
        self
    }
}
