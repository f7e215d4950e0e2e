//! Integration test for bearer-token validation.
//!
//! Mints JWTs locally with the same HS256 secret the server would be
//! configured with, then validates them through `validate_token` and
//! `TokenVerifier`. No running server or database is needed.
//!
//! Run with: `cargo test --test auth_test`
use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use uuid::Uuid;

use artlink_backend::auth::jwt::{Claims, TokenError, TokenVerifier, UserMetadata, validate_token};

/// A fake secret for testing — never use the real one in tests committed to git.
const TEST_SECRET: &str = "test-secret-at-least-256-bits-long-for-hs256-xxxxxxx";

fn sign(claims: &Claims) -> String {
    encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .expect("Failed to encode test JWT")
}

/// Helper: mint a JWT signed with HS256 using the test secret.
fn mint_test_token(sub: &str, email: &str, full_name: &str) -> String {
    let now = Utc::now().timestamp() as usize;

    sign(&Claims {
        sub: sub.to_string(),
        exp: now + 3600, // 1 hour from now
        iat: Some(now),
        iss: Some("https://example.supabase.co/auth/v1".to_string()),
        email: Some(email.to_string()),
        role: Some("authenticated".to_string()),
        user_metadata: Some(UserMetadata {
            full_name: Some(full_name.to_string()),
            name: None,
            avatar_url: Some("https://example.com/avatar.png".to_string()),
            picture: None,
            email: Some(email.to_string()),
            email_verified: Some(true),
        }),
    })
}

fn assert_kind(result: Result<Claims, TokenError>, expected: ErrorKind) {
    match result {
        Err(TokenError::Invalid(e)) => assert_eq!(*e.kind(), expected),
        Err(other) => panic!("expected {expected:?}, got {other}"),
        Ok(_) => panic!("expected {expected:?}, token was accepted"),
    }
}

#[test]
fn test_valid_token_decodes_correctly() {
    let user_id = Uuid::new_v4();
    let token = mint_test_token(&user_id.to_string(), "alice@example.com", "Alice Smith");

    let claims = validate_token(&token, TEST_SECRET).expect("Token should be valid");

    assert_eq!(claims.sub, user_id.to_string());
    assert_eq!(claims.user_email().unwrap(), "alice@example.com");
    assert_eq!(claims.display_name().unwrap(), "Alice Smith");
    assert_eq!(
        claims.avatar_url().unwrap(),
        "https://example.com/avatar.png"
    );
    assert_eq!(claims.user_id().unwrap(), user_id);
}

#[test]
fn test_expired_token_is_rejected() {
    let now = Utc::now().timestamp() as usize;

    let token = sign(&Claims {
        sub: Uuid::new_v4().to_string(),
        exp: now - 300, // expired 5 minutes ago (well past the 60s default leeway)
        iat: Some(now - 3600),
        iss: None,
        email: Some("expired@example.com".to_string()),
        role: None,
        user_metadata: None,
    });

    assert_kind(validate_token(&token, TEST_SECRET), ErrorKind::ExpiredSignature);
}

#[test]
fn test_wrong_secret_is_rejected() {
    let token = mint_test_token(&Uuid::new_v4().to_string(), "bob@example.com", "Bob Jones");

    assert_kind(
        validate_token(&token, "completely-wrong-secret-xxxxxxxxxxxxxxxxxxx"),
        ErrorKind::InvalidSignature,
    );
}

#[test]
fn test_garbage_token_is_rejected() {
    let result = validate_token("not.a.valid.jwt", TEST_SECRET);
    assert!(result.is_err());
}

#[test]
fn test_non_uuid_subject_is_rejected() {
    let token = mint_test_token("not-a-uuid", "carol@example.com", "Carol");
    let claims = validate_token(&token, TEST_SECRET).expect("Signature is fine");

    assert!(matches!(claims.user_id(), Err(TokenError::BadSubject(_))));
}

#[test]
fn test_claims_helpers_with_missing_metadata() {
    let now = Utc::now().timestamp() as usize;

    let claims = Claims {
        sub: Uuid::new_v4().to_string(),
        exp: now + 3600,
        iat: Some(now),
        iss: None,
        email: Some("bare@example.com".to_string()),
        role: None,
        user_metadata: None, // no metadata at all
    };

    // Should fall back to top-level email.
    assert_eq!(claims.user_email().unwrap(), "bare@example.com");
    // No metadata → None.
    assert!(claims.display_name().is_none());
    assert!(claims.avatar_url().is_none());
}

#[test]
fn test_email_falls_back_to_metadata() {
    let now = Utc::now().timestamp() as usize;

    let claims = Claims {
        sub: Uuid::new_v4().to_string(),
        exp: now + 3600,
        iat: None,
        iss: None,
        email: None,
        role: None,
        user_metadata: Some(UserMetadata {
            full_name: None,
            name: Some("Dee".to_string()),
            avatar_url: None,
            picture: Some("https://example.com/dee.png".to_string()),
            email: Some("dee@example.com".to_string()),
            email_verified: None,
        }),
    };

    assert_eq!(claims.user_email().unwrap(), "dee@example.com");
    assert_eq!(claims.display_name().unwrap(), "Dee");
    assert_eq!(claims.avatar_url().unwrap(), "https://example.com/dee.png");
}

#[tokio::test]
async fn test_shared_secret_verifier_matches_validate_token() {
    let user_id = Uuid::new_v4();
    let token = mint_test_token(&user_id.to_string(), "erin@example.com", "Erin");

    let verifier = TokenVerifier::SharedSecret(TEST_SECRET.to_string());
    let claims = verifier.verify(&token).await.expect("Token should be valid");
    assert_eq!(claims.user_id().unwrap(), user_id);

    let wrong = TokenVerifier::SharedSecret("another-secret-xxxxxxxxxxxxxxxxxxxxxxxxxx".into());
    assert!(wrong.verify(&token).await.is_err());
}
