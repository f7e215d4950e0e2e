use actix_web::http::header::Header;
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use actix_web_httpauth::headers::authorization::{Authorization, Bearer};
use futures_util::future::LocalBoxFuture;
use std::sync::Arc;

use crate::auth::jwt::TokenVerifier;
use crate::error::AppError;
use crate::models::users::{self, CreateUserFromAuth, Roles};
use crate::repository::Store;

/// The caller behind a verified bearer token.
///
/// Extracting it verifies the token and finds (or, on first sight, creates)
/// the matching user row. New users start out as clients.
pub struct AuthenticatedUser(pub users::Model);

impl FromRequest for AuthenticatedUser {
    type Error = AppError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();

        Box::pin(async move {
            let auth = Authorization::<Bearer>::parse(&req).map_err(|_| {
                AppError::Unauthorized("Authorization header must be: Bearer <token>".into())
            })?;

            let verifier = req
                .app_data::<web::Data<Arc<TokenVerifier>>>()
                .ok_or_else(|| AppError::Internal("Token verifier not configured".into()))?;

            let claims = verifier.verify(auth.as_ref().token()).await.map_err(|e| {
                tracing::debug!(error = %e, "Rejected bearer token");
                AppError::Unauthorized(format!("Invalid token: {e}"))
            })?;

            let user_id = claims
                .user_id()
                .map_err(|e| AppError::Unauthorized(e.to_string()))?;

            let email = claims
                .user_email()
                .ok_or_else(|| AppError::Unauthorized("No email in token claims".into()))?;

            let store = req
                .app_data::<web::Data<Arc<dyn Store>>>()
                .ok_or_else(|| AppError::Internal("Store not configured".into()))?;

            let user = store
                .find_or_create_user(CreateUserFromAuth {
                    id: user_id,
                    email,
                    display_name: claims.display_name(),
                    avatar_url: claims.avatar_url(),
                    auth_provider: "supabase".to_string(),
                    role: Roles::Client,
                })
                .await?;

            Ok(AuthenticatedUser(user))
        })
    }
}
