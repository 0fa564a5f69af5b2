use crate::annotate::{AnnotateError, ValidationError, annotate, validate};
use crate::domain::{ReferencePoint, Table};
use crate::sheets::{DataSource, DataSourceError};
use thiserror::Error;
use tracing::{info, instrument, warn};

/// Fetches a sheet and annotates every row with its distance to `reference`. Each call is an independent run.
#[instrument(skip(source, reference), fields(reference_city = %reference.label))]
pub async fn run(source: &dyn DataSource, sheet_url: &str, reference: &ReferencePoint) -> Result<Table, RunError> {
    info!("📄 Fetching sheet...");
    let result = fetch_and_annotate(source, sheet_url, reference).await;

    match &result {
        Ok(table) => info!("📄 Fetching sheet... OK, {} rows annotated", table.len()),
        Err(err) => warn!(kind = ?err.kind(), "⚠️ Unable to annotate the sheet: {}", err),
    }

    result
}

async fn fetch_and_annotate(source: &dyn DataSource, sheet_url: &str, reference: &ReferencePoint) -> Result<Table, RunError> {
    let table = source.fetch(sheet_url).await?;
    let validated = validate(&table)?;
    Ok(annotate(&validated, &reference.location)?)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ErrorKind {
    Access,
    Schema,
    Unanticipated,
}

#[derive(Error, Debug)]
pub enum RunError {
    #[error(transparent)]
    DataSource(#[from] DataSourceError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Annotate(#[from] AnnotateError),
}

impl RunError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RunError::DataSource(err) if err.is_access_error() => ErrorKind::Access,
            RunError::Validation(_) => ErrorKind::Schema,
            _ => ErrorKind::Unanticipated,
        }
    }

    /// The message shown to the user. Schema problems are already actionable, everything else is prefixed.
    pub fn user_message(&self) -> String {
        match self.kind() {
            ErrorKind::Schema => self.to_string(),
            ErrorKind::Access | ErrorKind::Unanticipated => format!("Error fetching data: {}", self),
        }
    }
}
