use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::debug;

use crate::google::{ensure_success, GoogleApiError};

/// Sheets read/write plus full Drive access (upload + sharing).
pub const SCOPES: &str =
    "https://www.googleapis.com/auth/spreadsheets https://www.googleapis.com/auth/drive";

const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME_SECS: i64 = 3600;
/// A cached token is refreshed this long before Google says it expires.
const EXPIRY_MARGIN_SECS: i64 = 60;

/// The fields of a service-account JSON key this client needs.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
    #[serde(default)]
    pub private_key_id: Option<String>,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

impl ServiceAccountKey {
    pub async fn from_file(path: &Path) -> Result<Self, GoogleApiError> {
        let credentials_error = |reason: String| GoogleApiError::Credentials {
            path: path.display().to_string(),
            reason,
        };
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| credentials_error(e.to_string()))?;
        serde_json::from_str(&raw).map_err(|e| credentials_error(e.to_string()))
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct AssertionClaims {
    iss: String,
    scope: String,
    aud: String,
    iat: i64,
    exp: i64,
}

/// Signs the RS256 JWT exchanged for an access token.
fn build_assertion(key: &ServiceAccountKey, now: DateTime<Utc>) -> Result<String, GoogleApiError> {
    let claims = AssertionClaims {
        iss: key.client_email.clone(),
        scope: SCOPES.to_string(),
        aud: key.token_uri.clone(),
        iat: now.timestamp(),
        exp: now.timestamp() + ASSERTION_LIFETIME_SECS,
    };
    let mut header = Header::new(Algorithm::RS256);
    header.kid = key.private_key_id.clone();

    let signing_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())?;
    Ok(encode(&header, &claims, &signing_key)?)
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

#[derive(Debug, Clone)]
struct CachedToken {
    access_token: String,
    expires_at: DateTime<Utc>,
}

impl CachedToken {
    fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        now + Duration::seconds(EXPIRY_MARGIN_SECS) < self.expires_at
    }
}

/// Hands out bearer tokens for the configured service account.
///
/// The key file is read when a token is needed, not at startup, so a missing
/// file fails submissions without stopping the process.
pub struct TokenProvider {
    client: Client,
    key_path: PathBuf,
    cached: Mutex<Option<CachedToken>>,
}

impl TokenProvider {
    pub fn new(client: Client, key_path: PathBuf) -> Self {
        Self {
            client,
            key_path,
            cached: Mutex::new(None),
        }
    }

    pub async fn access_token(&self) -> Result<String, GoogleApiError> {
        let mut cached = self.cached.lock().await;
        if let Some(token) = cached.as_ref().filter(|t| t.is_fresh(Utc::now())) {
            return Ok(token.access_token.clone());
        }

        let key = ServiceAccountKey::from_file(&self.key_path).await?;
        let token = self.exchange(&key).await?;
        let access_token = token.access_token.clone();
        *cached = Some(token);
        Ok(access_token)
    }

    async fn exchange(&self, key: &ServiceAccountKey) -> Result<CachedToken, GoogleApiError> {
        let now = Utc::now();
        let assertion = build_assertion(key, now)?;

        let response = self
            .client
            .post(&key.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await?;
        let token: TokenResponse = ensure_success(response).await?.json().await?;

        debug!(
            "Access token issued for {} (expires in {}s)",
            key.client_email, token.expires_in
        );

        Ok(CachedToken {
            access_token: token.access_token,
            expires_at: now + Duration::seconds(token.expires_in),
        })
    }
}
