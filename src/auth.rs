//! Service-account authentication
//!
//! Implements the OAuth2 JWT-bearer grant used by Google service accounts:
//! the key file's private key signs a short-lived RS256 assertion, which the
//! key's `token_uri` exchanges for a bearer access token.

use anyhow::{Context, Result};
use chrono::Utc;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Read-only access to Analytics data.
pub const ANALYTICS_READONLY_SCOPE: &str = "https://www.googleapis.com/auth/analytics.readonly";

const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME_SECS: i64 = 3600;

/// The fields of a service-account JSON key file this tool needs.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceAccountKey {
    #[serde(rename = "type", default)]
    pub key_type: Option<String>,
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

#[derive(Debug, Serialize)]
pub struct AssertionClaims {
    pub iss: String,
    pub scope: String,
    pub aud: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<u64>,
}

impl ServiceAccountKey {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read service account key: {}", path.display()))?;
        Self::from_json(&content)
            .with_context(|| format!("Invalid service account key: {}", path.display()))
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let key: ServiceAccountKey =
            serde_json::from_str(content).context("Failed to parse service account JSON")?;

        if let Some(key_type) = key.key_type.as_deref() {
            if key_type != "service_account" {
                anyhow::bail!("expected a service_account key, got type \"{}\"", key_type);
            }
        }

        Ok(key)
    }

    /// Claims for an assertion issued at `issued_at` (unix seconds).
    pub fn claims(&self, scope: &str, issued_at: i64) -> AssertionClaims {
        AssertionClaims {
            iss: self.client_email.clone(),
            scope: scope.to_string(),
            aud: self.token_uri.clone(),
            iat: issued_at,
            exp: issued_at + ASSERTION_LIFETIME_SECS,
        }
    }

    /// Sign an RS256 assertion for `scope` with the key's private key.
    pub fn signed_assertion(&self, scope: &str) -> Result<String> {
        let mut header = Header::new(Algorithm::RS256);
        header.kid = self.private_key_id.clone();

        let encoding_key = EncodingKey::from_rsa_pem(self.private_key.as_bytes())
            .context("Service account private key is not a valid RSA PEM key")?;

        encode(&header, &self.claims(scope, Utc::now().timestamp()), &encoding_key)
            .context("Failed to sign service account assertion")
    }

    /// Exchange a signed assertion for an access token.
    pub async fn fetch_access_token(&self, http: &Client, scope: &str) -> Result<String> {
        let assertion = self.signed_assertion(scope)?;

        debug!(token_uri = %self.token_uri, client_email = %self.client_email, "Requesting access token");

        let response = http
            .post(&self.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await
            .context("Failed to reach token endpoint")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Token request rejected ({}): {}", status, body.trim());
        }

        let token: TokenResponse = response
            .json()
            .await
            .context("Failed to parse token response")?;

        info!(expires_in = ?token.expires_in, "Obtained access token");
        Ok(token.access_token)
    }
}
