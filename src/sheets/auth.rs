use anyhow::{Context, Result};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};

use crate::model::ServiceAccountKey;
use crate::sheets::error::SheetError;

/// Read/write spreadsheet access plus read-only drive access, the fixed
/// permission set every fetch operation runs under.
const SCOPES: &str =
    "https://www.googleapis.com/auth/spreadsheets https://www.googleapis.com/auth/drive.readonly";

const GRANT_TYPE: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

#[derive(Serialize)]
struct Claims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Exchange a signed service-account assertion for a bearer token.
///
/// Called once per top-level fetch; no token cache, matching the
/// re-open-per-call design of the client.
pub async fn fetch_access_token(
    http: &reqwest::Client,
    key: &ServiceAccountKey,
) -> Result<String> {
    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        iss: &key.client_email,
        scope: SCOPES,
        aud: &key.token_uri,
        iat: now,
        exp: now + 3600,
    };

    let encoding_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())
        .map_err(|e| SheetError::Auth(format!("invalid private key: {e}")))?;
    let assertion = jsonwebtoken::encode(&Header::new(Algorithm::RS256), &claims, &encoding_key)
        .map_err(|e| SheetError::Auth(format!("failed to sign token request: {e}")))?;

    let response = http
        .post(&key.token_uri)
        .form(&[("grant_type", GRANT_TYPE), ("assertion", assertion.as_str())])
        .send()
        .await
        .context("Failed to reach the token endpoint")?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(SheetError::Auth(format!(
            "token exchange rejected with status {status}: {body}"
        ))
        .into());
    }

    let token: TokenResponse = response
        .json()
        .await
        .context("Failed to decode token response")?;
    Ok(token.access_token)
}
