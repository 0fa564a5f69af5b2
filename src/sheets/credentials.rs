use crate::sheets::DataSourceError;
use serde::Deserialize;
use std::fmt::{Debug, Formatter};
use std::path::Path;
use tokio::fs;
use tracing::instrument;

/// The parts of a Google service account key file needed to obtain an access token.
#[derive(Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub(crate) client_email: String,
    pub(crate) private_key: String,
    pub(crate) private_key_id: Option<String>,
    pub(crate) token_uri: String,
}

impl ServiceAccountKey {
    #[instrument]
    pub async fn load(path: &Path) -> Result<Self, DataSourceError> {
        let content = fs::read_to_string(path).await.map_err(|e| DataSourceError::CredentialsUnreadable {
            source: e,
            path: path.to_path_buf(),
        })?;

        serde_json::from_str(&content).map_err(|e| DataSourceError::CredentialsInvalid {
            source: e,
            path: path.to_path_buf(),
        })
    }
}

impl Debug for ServiceAccountKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceAccountKey")
            .field("client_email", &self.client_email)
            .field("private_key", &"<redacted>")
            .field("private_key_id", &self.private_key_id)
            .field("token_uri", &self.token_uri)
            .finish()
    }
}
