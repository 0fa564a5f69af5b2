use crate::domain::CellValue;
use serde::Deserialize;

// API: https://developers.google.com/identity/protocols/oauth2/service-account#httprest
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
}

#[derive(Debug, Deserialize)]
pub struct TokenError {
    pub error: String,
    pub error_description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiError,
}

#[allow(dead_code)]
#[derive(Debug, Deserialize)]
pub struct ApiError {
    pub code: u16,
    pub message: String,
    pub status: Option<String>,
}

// API: https://developers.google.com/sheets/api/reference/rest/v4/spreadsheets/get
#[derive(Debug, Deserialize)]
pub struct SpreadsheetGet {
    #[serde(default)]
    pub sheets: Vec<Sheet>,
}

#[derive(Debug, Deserialize)]
pub struct Sheet {
    pub properties: SheetProperties,
}

#[allow(dead_code)]
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetProperties {
    pub sheet_id: u64,
    pub title: String,
    #[serde(default)]
    pub index: u64,
}

// API: https://developers.google.com/sheets/api/reference/rest/v4/spreadsheets.values#ValueRange
#[allow(dead_code)]
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueRange {
    pub range: String,
    #[serde(default)]
    pub values: Vec<Vec<CellValue>>,
}
