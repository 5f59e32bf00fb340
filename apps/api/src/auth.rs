//! Owner-identity resolution. The caller's bearer token is the per-request
//! credential, forwarded to the identity provider; the service key
//! authenticates this backend to it.

use async_trait::async_trait;
use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;
use tracing::warn;
use uuid::Uuid;

use crate::errors::AppError;

#[derive(Debug, Error)]
pub enum AuthError {
    /// The credential was present but the provider rejected it.
    #[error("credential rejected")]
    Rejected,

    #[error("identity provider unreachable: {0}")]
    Upstream(String),
}

#[derive(Debug, Clone, Copy)]
pub struct OwnerIdentity {
    pub id: Uuid,
}

/// Resolves a bearer credential to an owner identity. Absence or invalidity
/// of the credential maps to `Unauthorized`, never a crash.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn resolve(&self, bearer: &str) -> Result<OwnerIdentity, AuthError>;
}

#[derive(Debug, Deserialize)]
struct IdentityResponse {
    id: Uuid,
}

/// Supabase-style identity endpoint: `GET {base}/auth/v1/user` with the
/// service key plus the caller's bearer token.
pub struct HttpIdentityProvider {
    client: Client,
    base_url: String,
    service_key: String,
}

impl HttpIdentityProvider {
    pub fn new(base_url: String, service_key: String) -> Self {
        Self {
            client: Client::new(),
            base_url,
            service_key,
        }
    }
}

#[async_trait]
impl IdentityProvider for HttpIdentityProvider {
    async fn resolve(&self, bearer: &str) -> Result<OwnerIdentity, AuthError> {
        let url = format!("{}/auth/v1/user", self.base_url.trim_end_matches('/'));

        let response = self
            .client
            .get(url)
            .header(AUTHORIZATION, format!("Bearer {bearer}"))
            .header("apikey", &self.service_key)
            .send()
            .await
            .map_err(|err| AuthError::Upstream(err.to_string()))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(AuthError::Rejected);
        }
        if !status.is_success() {
            return Err(AuthError::Upstream(format!(
                "identity provider returned {status}"
            )));
        }

        let identity: IdentityResponse = response
            .json()
            .await
            .map_err(|err| AuthError::Upstream(err.to_string()))?;

        Ok(OwnerIdentity { id: identity.id })
    }
}

/// Extracts the bearer token from the Authorization header, if any.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Resolves the authenticated owner or fails with `Unauthorized`.
pub async fn require_owner(
    identity: &dyn IdentityProvider,
    headers: &HeaderMap,
) -> Result<Uuid, AppError> {
    let token = bearer_token(headers).ok_or(AppError::Unauthorized)?;
    let owner = identity.resolve(token).await?;
    Ok(owner.id)
}

/// Best-effort owner resolution for routes where identity is optional. An
/// unusable credential is logged and treated as anonymous rather than
/// failing the request.
pub async fn optional_owner(
    identity: &dyn IdentityProvider,
    headers: &HeaderMap,
) -> Option<Uuid> {
    let token = bearer_token(headers)?;
    match identity.resolve(token).await {
        Ok(owner) => Some(owner.id),
        Err(err) => {
            warn!("Ignoring unusable credential on optional-auth route: {err}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn extracts_bearer_token() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc123"));
        assert_eq!(bearer_token(&headers), Some("abc123"));
    }

    #[test]
    fn rejects_missing_or_malformed_header() {
        assert_eq!(bearer_token(&HeaderMap::new()), None);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic abc123"));
        assert_eq!(bearer_token(&headers), None);

        let mut empty = HeaderMap::new();
        empty.insert(AUTHORIZATION, HeaderValue::from_static("Bearer "));
        assert_eq!(bearer_token(&empty), None);
    }
}
