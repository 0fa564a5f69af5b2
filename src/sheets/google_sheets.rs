use crate::app_config::AppConfig;
use crate::domain::{CellValue, Table};
use crate::sheets::credentials::ServiceAccountKey;
use crate::sheets::records::records_from_values;
use crate::sheets::sheet_url::spreadsheet_key;
use crate::sheets::sheets_response::{ApiErrorResponse, SpreadsheetGet, ValueRange};
use crate::sheets::token::{AccessToken, fetch_access_token};
use crate::sheets::{DataSource, DataSourceError};
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use std::sync::Arc;
use tracing::{info, instrument};
use url::Url;

/// Reads the first worksheet of a Google spreadsheet as a service account.
#[derive(Debug)]
pub struct GoogleSheets {
    client: Client,
    config: Arc<AppConfig>,
}

impl GoogleSheets {
    pub fn new(client: Client, config: Arc<AppConfig>) -> Self {
        GoogleSheets { client, config }
    }

    fn spreadsheet_url(&self, key: &str, segments: &[&str]) -> Result<Url, DataSourceError> {
        let base = self.config.google().sheets_url();
        let mut url = Url::parse(base).map_err(|_| DataSourceError::InvalidSheetUrl(base.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| DataSourceError::InvalidSheetUrl(base.to_string()))?
            .pop_if_empty()
            .extend(["v4", "spreadsheets", key])
            .extend(segments);
        Ok(url)
    }

    #[instrument(skip(self, token))]
    async fn first_worksheet(&self, token: &AccessToken, key: &str) -> Result<String, DataSourceError> {
        let mut url = self.spreadsheet_url(key, &[])?;
        url.query_pairs_mut().append_pair("fields", "sheets.properties");

        let response = self.client.get(url).bearer_auth(token.secret()).send().await?;
        let spreadsheet = check_status(response).await?.json::<SpreadsheetGet>().await?;

        spreadsheet
            .sheets
            .into_iter()
            .min_by_key(|sheet| sheet.properties.index)
            .map(|sheet| sheet.properties.title)
            .ok_or(DataSourceError::NoWorksheet)
    }

    #[instrument(skip(self, token))]
    async fn worksheet_values(&self, token: &AccessToken, key: &str, title: &str) -> Result<Vec<Vec<CellValue>>, DataSourceError> {
        let mut url = self.spreadsheet_url(key, &["values", sheet_range(title).as_str()])?;
        url.query_pairs_mut().append_pair("valueRenderOption", "UNFORMATTED_VALUE");

        let response = self.client.get(url).bearer_auth(token.secret()).send().await?;
        let value_range = check_status(response).await?.json::<ValueRange>().await?;

        Ok(value_range.values)
    }
}

#[async_trait]
impl DataSource for GoogleSheets {
    #[instrument(skip(self))]
    async fn fetch(&self, sheet_url: &str) -> Result<Table, DataSourceError> {
        let key = spreadsheet_key(sheet_url)?;
        let credentials = ServiceAccountKey::load(self.config.google().credentials_file()).await?;
        let token = fetch_access_token(&self.client, &credentials, self.config.google().scopes()).await?;

        info!("Retrieving worksheet...");
        let title = self.first_worksheet(&token, &key).await?;
        let values = self.worksheet_values(&token, &key, &title).await?;
        let table = records_from_values(values)?;
        info!("Retrieving worksheet... OK, '{}' has {} records", title, table.len());

        Ok(table)
    }
}

// A bare title like `Q1` would be read as a cell reference, so the whole sheet is addressed as `'title'`
fn sheet_range(title: &str) -> String {
    format!("'{}'", title.replace('\'', "''"))
}

async fn check_status(response: Response) -> Result<Response, DataSourceError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await?;
    let message = serde_json::from_str::<ApiErrorResponse>(&body)
        .map(|r| r.error.message)
        .unwrap_or(body);

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(DataSourceError::PermissionDenied { status, message }),
        _ => Err(DataSourceError::UnexpectedStatus { status, message }),
    }
}
