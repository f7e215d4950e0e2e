use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::jwks::JwksCache;

/// Bearer-token claims.
///
/// Supabase issues JWTs with these standard + custom fields. The `sub` field is
/// the user's UUID; `user_metadata` carries profile info from the OAuth provider.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// The auth user UUID.
    pub sub: String,
    /// Token expiration (Unix timestamp).
    pub exp: usize,
    /// Token issued-at (Unix timestamp).
    pub iat: Option<usize>,
    pub iss: Option<String>,
    pub email: Option<String>,
    /// Provider role (e.g. "authenticated"), unrelated to marketplace roles.
    pub role: Option<String>,
    pub user_metadata: Option<UserMetadata>,
}

/// Metadata populated by the OAuth provider.
#[derive(Debug, Serialize, Deserialize)]
pub struct UserMetadata {
    pub full_name: Option<String>,
    pub name: Option<String>,
    pub avatar_url: Option<String>,
    pub picture: Option<String>,
    pub email: Option<String>,
    pub email_verified: Option<bool>,
}

impl Claims {
    /// Extract the user UUID from the `sub` claim.
    pub fn user_id(&self) -> Result<Uuid, TokenError> {
        Uuid::parse_str(&self.sub).map_err(TokenError::BadSubject)
    }

    /// Best-effort display name from metadata.
    pub fn display_name(&self) -> Option<String> {
        self.user_metadata
            .as_ref()
            .and_then(|m| m.full_name.clone().or_else(|| m.name.clone()))
    }

    /// Best-effort avatar URL from metadata.
    pub fn avatar_url(&self) -> Option<String> {
        self.user_metadata
            .as_ref()
            .and_then(|m| m.avatar_url.clone().or_else(|| m.picture.clone()))
    }

    /// Best-effort email: prefer top-level, fall back to metadata.
    pub fn user_email(&self) -> Option<String> {
        self.email
            .clone()
            .or_else(|| self.user_metadata.as_ref().and_then(|m| m.email.clone()))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("Failed to decode header: {0}")]
    Header(jsonwebtoken::errors::Error),

    #[error("No 'kid' in token header")]
    MissingKid,

    #[error("Unsupported signing algorithm {0:?}")]
    UnsupportedAlgorithm(Algorithm),

    #[error("Failed to fetch JWKS: {0}")]
    Jwks(String),

    #[error("Key with kid={0} not found in JWKS")]
    UnknownKid(String),

    #[error("Token validation failed: {0}")]
    Invalid(#[from] jsonwebtoken::errors::Error),

    #[error("Invalid UUID in sub claim: {0}")]
    BadSubject(uuid::Error),
}

/// How bearer tokens are checked.
pub enum TokenVerifier {
    /// Asymmetric keys published by the auth provider.
    Jwks(JwksCache),
    /// HS256 with a shared secret.
    SharedSecret(String),
}

impl TokenVerifier {
    pub async fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        match self {
            TokenVerifier::Jwks(cache) => cache.validate_token(token).await,
            TokenVerifier::SharedSecret(secret) => validate_token(token, secret),
        }
    }
}

/// Validate an HS256 token signed with `secret` and return its claims.
pub fn validate_token(token: &str, secret: &str) -> Result<Claims, TokenError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_aud = false;

    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )?;
    Ok(data.claims)
}
