//! HTTP-level tests for the commission routes.
//!
//! Serves only the commission scope over the in-memory store, authenticating
//! with HS256 tokens minted here.
//!
//! Run with: `cargo test --test commission_routes_test`
use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use chrono::Utc;
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use serde_json::{Value, json};
use uuid::Uuid;

use artlink_backend::auth::jwt::{Claims, TokenVerifier};
use artlink_backend::error;
use artlink_backend::handlers;
use artlink_backend::models::commissions::{CommissionResponse, Status};
use artlink_backend::models::progress_updates;
use artlink_backend::models::users::{self, Roles};
use artlink_backend::repository::Store;
use artlink_backend::repository::memory::InMemoryStore;
use artlink_backend::services::CommissionService;

const TEST_SECRET: &str = "test-secret-at-least-256-bits-long-for-hs256-xxxxxxx";

fn bearer(user: &users::Model) -> (&'static str, String) {
    let now = Utc::now().timestamp() as usize;
    let claims = Claims {
        sub: user.id.to_string(),
        exp: now + 3600,
        iat: Some(now),
        iss: None,
        email: Some(user.email.clone()),
        role: Some("authenticated".to_string()),
        user_metadata: None,
    };
    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .expect("Failed to encode test JWT");

    ("Authorization", format!("Bearer {token}"))
}

struct Parties {
    artist: users::Model,
    artist_profile: Uuid,
    client: users::Model,
    bystander: users::Model,
}

async fn seed(store: &InMemoryStore) -> Parties {
    let artist = store.add_user("ada@example.com", Roles::Artist).await;
    let profile = store.add_artist_profile(artist.id, "Ada").await;
    let client = store.add_user("cy@example.com", Roles::Client).await;
    store.add_client_profile(client.id).await;
    let bystander = store.add_user("bo@example.com", Roles::Client).await;

    Parties {
        artist,
        artist_profile: profile.id,
        client,
        bystander,
    }
}

/// Commission routes over `$store`, authenticated with [`TEST_SECRET`].
macro_rules! app_with {
    ($store:expr) => {{
        let store: Arc<dyn Store> = $store;
        test::init_service(
            App::new()
                .configure(error::extractor_configs)
                .app_data(web::Data::new(store.clone()))
                .app_data(web::Data::new(Arc::new(TokenVerifier::SharedSecret(
                    TEST_SECRET.to_string(),
                ))))
                .app_data(web::Data::new(CommissionService::new(store)))
                .service(web::scope("/api").configure(handlers::commissions::init_routes)),
        )
        .await
    }};
}

#[actix_web::test]
async fn requests_without_a_token_are_unauthorized() {
    let store = Arc::new(InMemoryStore::new());
    let app = app_with!(store);

    let req = test::TestRequest::get().uri("/api/commissions").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"].is_string());
}

#[actix_web::test]
async fn lifecycle_over_http() {
    let store = Arc::new(InMemoryStore::new());
    let p = seed(&store).await;
    let app = app_with!(store);

    let req = test::TestRequest::post()
        .uri("/api/commissions")
        .insert_header(bearer(&p.client))
        .set_json(json!({
            "artistId": p.artist_profile,
            "description": "Character sheet, three poses",
            "price": 100.0,
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: CommissionResponse = test::read_body_json(resp).await;
    assert_eq!(created.status, Status::Pending);
    assert_eq!(created.artist_id, p.artist.id);
    assert_eq!(created.client.as_ref().unwrap().email, "cy@example.com");

    let status_uri = format!("/api/commissions/{}/status", created.id);

    let req = test::TestRequest::patch()
        .uri(&status_uri)
        .insert_header(bearer(&p.artist))
        .set_json(json!({ "status": "accepted" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::patch()
        .uri(&status_uri)
        .insert_header(bearer(&p.bystander))
        .set_json(json!({ "status": "completed" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body["error"],
        "Only the client can mark commissions as completed"
    );

    let req = test::TestRequest::patch()
        .uri(&status_uri)
        .insert_header(bearer(&p.client))
        .set_json(json!({ "status": "completed" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let completed: CommissionResponse = test::read_body_json(resp).await;
    assert_eq!(completed.status, Status::Completed);
}

#[actix_web::test]
async fn client_without_profile_is_forbidden_and_bad_bodies_are_400() {
    let store = Arc::new(InMemoryStore::new());
    let p = seed(&store).await;
    let app = app_with!(store);

    let req = test::TestRequest::post()
        .uri("/api/commissions")
        .insert_header(bearer(&p.bystander))
        .set_json(json!({
            "artistId": p.artist_profile,
            "description": "Anything",
            "price": 5.0,
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::post()
        .uri("/api/commissions")
        .insert_header(bearer(&p.client))
        .set_json(json!({
            "artistId": p.artist_profile,
            "description": "   ",
            "price": 5.0,
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::post()
        .uri("/api/commissions")
        .insert_header(bearer(&p.client))
        .set_json(json!({ "artistId": "not-a-uuid" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"].is_string());
}

#[actix_web::test]
async fn unknown_artist_and_unknown_commission_are_404() {
    let store = Arc::new(InMemoryStore::new());
    let p = seed(&store).await;
    let app = app_with!(store);

    let req = test::TestRequest::post()
        .uri("/api/commissions")
        .insert_header(bearer(&p.client))
        .set_json(json!({
            "artistId": Uuid::new_v4(),
            "description": "Logo",
            "price": 5.0,
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Artist not found");

    let req = test::TestRequest::get()
        .uri(&format!("/api/commissions/{}", Uuid::new_v4()))
        .insert_header(bearer(&p.client))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::get()
        .uri(&format!("/api/commissions/artist/{}", Uuid::new_v4()))
        .insert_header(bearer(&p.client))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn listings_progress_and_read_access() {
    let store = Arc::new(InMemoryStore::new());
    let p = seed(&store).await;
    let app = app_with!(store);

    let req = test::TestRequest::post()
        .uri("/api/commissions")
        .insert_header(bearer(&p.client))
        .set_json(json!({
            "artistId": p.artist.id,
            "description": "Album cover",
            "price": 250.0,
        }))
        .to_request();
    let created: CommissionResponse = test::call_and_read_body_json(&app, req).await;

    let req = test::TestRequest::post()
        .uri(&format!("/api/commissions/{}/progress", created.id))
        .insert_header(bearer(&p.artist))
        .set_json(json!({ "message": "First sketch", "imageUrl": "https://example.com/s1.png" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let update: progress_updates::Model = test::read_body_json(resp).await;
    assert_eq!(update.seq, 1);

    let req = test::TestRequest::post()
        .uri(&format!("/api/commissions/{}/progress", created.id))
        .insert_header(bearer(&p.client))
        .set_json(json!({ "message": "Can I post too?" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::get()
        .uri("/api/commissions/artist")
        .insert_header(bearer(&p.artist))
        .to_request();
    let inbox: Vec<CommissionResponse> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(inbox.len(), 1);
    assert_eq!(inbox[0].progress_updates.len(), 1);

    let req = test::TestRequest::get()
        .uri(&format!("/api/commissions/artist/{}", p.artist_profile))
        .insert_header(bearer(&p.bystander))
        .to_request();
    let by_ref: Vec<CommissionResponse> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(by_ref.len(), 1);

    let req = test::TestRequest::get()
        .uri("/api/commissions/client")
        .insert_header(bearer(&p.bystander))
        .to_request();
    let none: Vec<CommissionResponse> = test::call_and_read_body_json(&app, req).await;
    assert!(none.is_empty());

    let req = test::TestRequest::get()
        .uri(&format!("/api/commissions/{}", created.id))
        .insert_header(bearer(&p.bystander))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::get()
        .uri(&format!("/api/commissions/{}", created.id))
        .insert_header(bearer(&p.artist))
        .to_request();
    let fetched: CommissionResponse = test::call_and_read_body_json(&app, req).await;
    assert_eq!(fetched.progress_updates[0].message, "First sketch");
}

#[actix_web::test]
async fn unknown_status_value_is_rejected() {
    let store = Arc::new(InMemoryStore::new());
    let p = seed(&store).await;
    let app = app_with!(store);

    let req = test::TestRequest::patch()
        .uri(&format!("/api/commissions/{}/status", Uuid::new_v4()))
        .insert_header(bearer(&p.artist))
        .set_json(json!({ "status": "archived" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
