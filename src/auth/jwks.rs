use jsonwebtoken::jwk::{Jwk, JwkSet};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode, decode_header};
use moka::future::Cache;
use std::time::Duration;
use tracing::debug;

use super::jwt::{Claims, TokenError};

const JWKS_URL_TEMPLATE: &str = "https://{}.supabase.co/auth/v1/.well-known/jwks.json";
const KEY_TTL: Duration = Duration::from_secs(3600);

/// Signing keys fetched from the provider's JWKS endpoint, cached per `kid`.
#[derive(Clone)]
pub struct JwksCache {
    keys: Cache<String, Jwk>,
    jwks_url: String,
    client: reqwest::Client,
    anon_key: String,
}

impl JwksCache {
    pub fn new(project_ref: &str, anon_key: &str) -> Self {
        Self {
            keys: Cache::builder()
                .time_to_live(KEY_TTL)
                .max_capacity(10)
                .build(),
            jwks_url: JWKS_URL_TEMPLATE.replace("{}", project_ref),
            client: reqwest::Client::new(),
            anon_key: anon_key.to_string(),
        }
    }

    async fn fetch_jwks(&self) -> Result<JwkSet, TokenError> {
        debug!(url = %self.jwks_url, "Fetching JWKS");

        let response = self
            .client
            .get(&self.jwks_url)
            .header("apikey", &self.anon_key)
            .send()
            .await
            .map_err(|e| TokenError::Jwks(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TokenError::Jwks(format!("HTTP {status}")));
        }

        response
            .json::<JwkSet>()
            .await
            .map_err(|e| TokenError::Jwks(e.to_string()))
    }

    async fn key_for(&self, kid: &str) -> Result<Jwk, TokenError> {
        if let Some(cached) = self.keys.get(kid).await {
            return Ok(cached);
        }

        // Unknown kid: the provider may have rotated keys, so refresh the whole set.
        let jwks = self.fetch_jwks().await?;
        for key in &jwks.keys {
            if let Some(id) = &key.common.key_id {
                self.keys.insert(id.clone(), key.clone()).await;
            }
        }

        jwks.find(kid)
            .cloned()
            .ok_or_else(|| TokenError::UnknownKid(kid.to_string()))
    }

    pub async fn validate_token(&self, token: &str) -> Result<Claims, TokenError> {
        let header = decode_header(token).map_err(TokenError::Header)?;
        let kid = header.kid.ok_or(TokenError::MissingKid)?;

        let algorithm = match header.alg {
            Algorithm::ES256 | Algorithm::ES384 | Algorithm::RS256 => header.alg,
            other => return Err(TokenError::UnsupportedAlgorithm(other)),
        };

        let jwk = self.key_for(&kid).await?;
        let decoding_key = DecodingKey::from_jwk(&jwk)?;

        let mut validation = Validation::new(algorithm);
        validation.validate_aud = false;

        let data = decode::<Claims>(token, &decoding_key, &validation)?;
        Ok(data.claims)
    }
}
