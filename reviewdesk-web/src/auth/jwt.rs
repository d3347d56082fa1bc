//! JWT access tokens
//!
//! HS256 tokens whose `sub` claim is the identity identifier. Verification is
//! exposed through [`CredentialVerifier`] so the authenticator never sees
//! `jsonwebtoken` types.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use reviewdesk_core::{AuthConfig, CredentialError, CredentialVerifier};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// JWT Claims structure
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Subject (identity ID)
    pub sub: String,
    /// Issued at (timestamp)
    pub iat: i64,
    /// Expiration time (timestamp)
    pub exp: i64,
    /// Issuer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
}

impl Claims {
    /// Claims valid from now for `ttl_secs`
    pub fn new(user_id: impl Into<String>, ttl_secs: u64, issuer: Option<String>) -> Self {
        let now = Utc::now();
        let exp = Duration::try_seconds(i64::try_from(ttl_secs).unwrap_or(i64::MAX))
            .and_then(|ttl| now.checked_add_signed(ttl))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        Self {
            sub: user_id.into(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
            iss: issuer,
        }
    }
}

/// Token issuance errors
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("Token creation failed: {0}")]
    Creation(#[from] jsonwebtoken::errors::Error),
}

/// Issues and verifies access tokens
pub struct JwtService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    issuer: Option<String>,
    ttl_secs: u64,
}

impl JwtService {
    pub fn new(config: &AuthConfig) -> Self {
        let secret = config.jwt_secret.as_bytes();

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = config.leeway_secs;
        if let Some(issuer) = &config.issuer {
            validation.set_issuer(&[issuer]);
            validation.set_required_spec_claims(&["exp", "iss"]);
        }

        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
            issuer: config.issuer.clone(),
            ttl_secs: config.access_token_ttl_secs,
        }
    }

    /// Issue an access token for `user_id` with the configured lifetime
    pub fn issue_access_token(&self, user_id: &str) -> Result<String, TokenError> {
        let claims = Claims::new(user_id, self.ttl_secs, self.issuer.clone());
        self.encode_claims(&claims)
    }

    /// Sign arbitrary claims
    pub fn encode_claims(&self, claims: &Claims) -> Result<String, TokenError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding).map_err(|e| {
            warn!("Failed to encode JWT token: {}", e);
            TokenError::Creation(e)
        })
    }

    /// Verify and decode token
    pub fn decode_claims(&self, token: &str) -> Result<Claims, CredentialError> {
        let token_data = decode::<Claims>(token, &self.decoding, &self.validation).map_err(|e| {
            debug!("Token verification failed: {}", e);
            match e.kind() {
                ErrorKind::ExpiredSignature => CredentialError::Expired,
                ErrorKind::InvalidSignature => CredentialError::InvalidSignature,
                ErrorKind::InvalidToken
                | ErrorKind::Base64(_)
                | ErrorKind::Json(_)
                | ErrorKind::Utf8(_) => CredentialError::Malformed,
                _ => CredentialError::Rejected(e.to_string()),
            }
        })?;

        Ok(token_data.claims)
    }
}

#[async_trait]
impl CredentialVerifier for JwtService {
    async fn verify(&self, token: &str) -> Result<String, CredentialError> {
        let claims = self.decode_claims(token)?;

        if claims.sub.trim().is_empty() {
            return Err(CredentialError::Rejected("empty subject".to_string()));
        }

        Ok(claims.sub)
    }
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("issuer", &self.issuer)
            .field("ttl_secs", &self.ttl_secs)
            .finish_non_exhaustive()
    }
}
