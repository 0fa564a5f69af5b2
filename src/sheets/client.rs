use crate::app_config::AppConfig;
use reqwest::Client;
use thiserror::Error;

pub const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

pub fn new_client(config: &AppConfig) -> Result<Client, SheetsClientError> {
    let mut builder = Client::builder().user_agent(USER_AGENT);
    if let Some(timeout) = config.google().request_timeout() {
        builder = builder.timeout(timeout);
    }

    let client = builder.build()?;
    Ok(client)
}

#[derive(Error, Debug)]
pub enum SheetsClientError {
    #[error("request error: {0}")]
    RequestError(#[from] reqwest::Error),
}
