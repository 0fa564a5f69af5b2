mod client;
mod credentials;
mod data_source;
mod google_sheets;
mod records;
mod sheet_url;
mod sheets_response;
mod token;

pub use client::new_client;
pub use data_source::{DataSource, DataSourceError};
pub use google_sheets::GoogleSheets;
