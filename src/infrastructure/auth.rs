//! Session-token authentication for embedded admin requests
//!
//! Tokens are HS256 JWTs signed with the app secret. The store a request
//! acts for is the host of the `dest` claim.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};

use crate::api::error::ApiError;
use crate::domain::{DomainError, SessionAuthenticator, ShopIdentity};
use crate::infrastructure::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Issuer, `https://<shop>/admin`
    pub iss: String,
    /// Destination, `https://<shop>`
    pub dest: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aud: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    pub exp: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nbf: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sid: Option<String>,
}

/// Extract the store domain from a `dest` claim
pub fn shop_from_dest(dest: &str) -> Result<String, DomainError> {
    let url = url::Url::parse(dest)
        .map_err(|e| DomainError::Unauthorized(format!("Invalid dest claim: {}", e)))?;

    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(host.to_string()),
        _ => Err(DomainError::Unauthorized(
            "dest claim carries no shop host".to_string(),
        )),
    }
}

/// Verifies session tokens against the app secret
pub struct JwtSessionAuthenticator {
    key: DecodingKey,
    validation: Validation,
}

impl JwtSessionAuthenticator {
    pub fn new(secret: &str, audience: Option<&str>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_nbf = true;
        match audience {
            Some(aud) => validation.set_audience(&[aud]),
            None => validation.validate_aud = false,
        }

        Self {
            key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    pub fn decode_claims(&self, token: &str) -> Result<SessionClaims, DomainError> {
        decode::<SessionClaims>(token, &self.key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!("Rejected session token: {}", e);
                DomainError::Unauthorized("Invalid or expired token".to_string())
            })
    }
}

#[async_trait]
impl SessionAuthenticator for JwtSessionAuthenticator {
    async fn resolve_caller_identity(&self, token: &str) -> Result<ShopIdentity, DomainError> {
        let claims = self.decode_claims(token)?;
        let shop = shop_from_dest(&claims.dest)?;
        Ok(ShopIdentity { shop })
    }
}

/// Mint a session token for `shop`, valid for `ttl`
pub fn create_session_token(
    shop: &str,
    secret: &str,
    audience: Option<&str>,
    ttl: Duration,
) -> Result<String, String> {
    let now = Utc::now();
    let expiration = now
        .checked_add_signed(ttl)
        .ok_or_else(|| "token expiry out of range".to_string())?
        .timestamp();

    let claims = SessionClaims {
        iss: format!("https://{}/admin", shop),
        dest: format!("https://{}", shop),
        aud: audience.map(str::to_owned),
        sub: None,
        exp: expiration.max(0) as usize,
        nbf: None,
        iat: Some(now.timestamp().max(0) as usize),
        sid: None,
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| e.to_string())
}

fn bearer_token(parts: &Parts) -> Result<Option<String>, DomainError> {
    let Some(header) = parts.headers.get("Authorization") else {
        return Ok(None);
    };

    let value = header.to_str().map_err(|_| {
        DomainError::Unauthorized("Invalid Authorization header format".to_string())
    })?;

    value
        .strip_prefix("Bearer ")
        .map(|token| Some(token.trim().to_string()))
        .ok_or_else(|| DomainError::Unauthorized("Invalid Authorization header format".to_string()))
}

fn query_token(parts: &Parts) -> Option<String> {
    let query = parts.uri.query()?;
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == "id_token")
        .map(|(_, value)| value.into_owned())
}

/// The store the current request acts for
#[derive(Debug, Clone)]
pub struct ShopSession(pub ShopIdentity);

#[axum::async_trait]
impl<S> FromRequestParts<S> for ShopSession
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = match bearer_token(parts)? {
            Some(token) => token,
            None => query_token(parts).ok_or_else(|| {
                DomainError::Unauthorized("Missing Authorization header".to_string())
            })?,
        };

        let app_state = AppState::from_ref(state);
        let identity = app_state
            .authenticator
            .resolve_caller_identity(&token)
            .await?;

        Ok(ShopSession(identity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shop_from_dest() {
        assert_eq!(
            shop_from_dest("https://shop1.myshopify.com").unwrap(),
            "shop1.myshopify.com"
        );
        assert!(shop_from_dest("not a url").is_err());
    }

    #[tokio::test]
    async fn test_token_round_trip_resolves_shop() {
        let token =
            create_session_token("shop1.myshopify.com", "s3cret", None, Duration::minutes(5))
                .unwrap();
        let auth = JwtSessionAuthenticator::new("s3cret", None);

        let identity = auth.resolve_caller_identity(&token).await.unwrap();
        assert_eq!(identity.shop, "shop1.myshopify.com");
    }

    #[tokio::test]
    async fn test_wrong_secret_is_unauthorized() {
        let token =
            create_session_token("shop1.myshopify.com", "s3cret", None, Duration::minutes(5))
                .unwrap();
        let auth = JwtSessionAuthenticator::new("other", None);

        let err = auth.resolve_caller_identity(&token).await.unwrap_err();
        assert!(matches!(err, DomainError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn test_expired_token_is_unauthorized() {
        let token =
            create_session_token("shop1.myshopify.com", "s3cret", None, Duration::minutes(-10))
                .unwrap();
        let auth = JwtSessionAuthenticator::new("s3cret", None);

        assert!(auth.resolve_caller_identity(&token).await.is_err());
    }

    #[tokio::test]
    async fn test_audience_is_checked_when_configured() {
        let token = create_session_token(
            "shop1.myshopify.com",
            "s3cret",
            Some("other-app"),
            Duration::minutes(5),
        )
        .unwrap();
        let auth = JwtSessionAuthenticator::new("s3cret", Some("my-app"));

        assert!(auth.resolve_caller_identity(&token).await.is_err());
    }
}
