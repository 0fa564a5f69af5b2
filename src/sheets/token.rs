use crate::sheets::DataSourceError;
use crate::sheets::credentials::ServiceAccountKey;
use crate::sheets::sheets_response::{TokenError, TokenResponse};
use chrono::Utc;
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use reqwest::Client;
use serde::Serialize;
use tracing::{info, instrument};

pub const GRANT_TYPE: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const TOKEN_LIFETIME_SECONDS: i64 = 3600;

#[derive(Debug, Serialize)]
struct Claims<'a> {
    iss: &'a str,
    scope: String,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

/// A bearer token for the Google APIs. Only lives for a single run.
pub struct AccessToken(String);

impl AccessToken {
    pub fn secret(&self) -> &str {
        &self.0
    }
}

/// Builds the signed JWT a service account trades for an access token.
pub fn assertion(key: &ServiceAccountKey, scopes: &[String], issued_at: i64) -> Result<String, DataSourceError> {
    let claims = Claims {
        iss: &key.client_email,
        scope: scopes.join(" "),
        aud: &key.token_uri,
        iat: issued_at,
        exp: issued_at + TOKEN_LIFETIME_SECONDS,
    };

    let mut header = Header::new(Algorithm::RS256);
    header.kid = key.private_key_id.clone();

    let encoding_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())?;
    Ok(encode(&header, &claims, &encoding_key)?)
}

#[instrument(skip_all, fields(client_email = %key.client_email))]
pub async fn fetch_access_token(client: &Client, key: &ServiceAccountKey, scopes: &[String]) -> Result<AccessToken, DataSourceError> {
    info!("Authorizing service account...");
    let jwt = assertion(key, scopes, Utc::now().timestamp())?;

    let response = client
        .post(&key.token_uri)
        .form(&[("grant_type", GRANT_TYPE), ("assertion", jwt.as_str())])
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await?;
        let message = match serde_json::from_str::<TokenError>(&body) {
            Ok(TokenError {
                error,
                error_description: Some(description),
            }) => format!("{}: {}", error, description),
            Ok(TokenError { error, .. }) => error,
            Err(_) => body,
        };
        return Err(DataSourceError::Authorization { status, message });
    }

    let token = response.json::<TokenResponse>().await?;
    info!("Authorizing service account... OK");

    Ok(AccessToken(token.access_token))
}
