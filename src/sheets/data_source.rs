use crate::domain::{Table, TableError};
use async_trait::async_trait;
use reqwest::StatusCode;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Anything that turns a sheet identifier into a table of named fields.
#[async_trait]
pub trait DataSource: Send + Sync {
    async fn fetch(&self, sheet_url: &str) -> Result<Table, DataSourceError>;
}

#[derive(Error, Debug)]
pub enum DataSourceError {
    #[error("unable to read credentials file '{}': {source}", .path.display())]
    CredentialsUnreadable { source: io::Error, path: PathBuf },
    #[error("invalid credentials file '{}': {source}", .path.display())]
    CredentialsInvalid { source: serde_json::Error, path: PathBuf },
    #[error("invalid service account private key: {0}")]
    PrivateKey(#[from] jsonwebtoken::errors::Error),
    #[error("authorization failed ({status}): {message}")]
    Authorization { status: StatusCode, message: String },
    #[error("no valid key found in URL '{0}'")]
    InvalidSheetUrl(String),
    #[error("permission denied ({status}): {message}")]
    PermissionDenied { status: StatusCode, message: String },
    #[error("request to the spreadsheet service failed ({status}): {message}")]
    UnexpectedStatus { status: StatusCode, message: String },
    #[error("the spreadsheet has no worksheets")]
    NoWorksheet,
    #[error("the header row contains duplicate column '{0}'")]
    DuplicateHeader(String),
    #[error("request error: {0}")]
    RequestError(#[from] reqwest::Error),
    #[error(transparent)]
    Table(#[from] TableError),
}

impl DataSourceError {
    /// Credential and permission failures, the caller should surface these verbatim.
    pub fn is_access_error(&self) -> bool {
        matches!(
            self,
            DataSourceError::CredentialsUnreadable { .. }
                | DataSourceError::CredentialsInvalid { .. }
                | DataSourceError::PrivateKey(_)
                | DataSourceError::Authorization { .. }
                | DataSourceError::InvalidSheetUrl(_)
                | DataSourceError::PermissionDenied { .. }
        )
    }
}
