use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{App, HttpServer, web};
use artlink_backend::auth::TokenVerifier;
use artlink_backend::auth::jwks::JwksCache;
use artlink_backend::cache::RedisCache;
use artlink_backend::config::{AppConfig, AuthConfig};
use artlink_backend::repository::{SeaOrmStore, Store};
use artlink_backend::services::CommissionService;
use artlink_backend::{create_pool, db, error, handlers};
use dotenv::dotenv;
use std::io;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

fn startup_error(context: &str, err: impl std::fmt::Display) -> io::Error {
    io::Error::other(format!("{context}: {err}"))
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let config = AppConfig::from_env().map_err(|e| startup_error("Invalid configuration", e))?;

    let db = create_pool(&config.database_url)
        .await
        .map_err(|e| startup_error("Failed to connect to database", e))?;
    tracing::info!("Connected to database");

    if config.run_migrations {
        db::run_migrations(&db)
            .await
            .map_err(|e| startup_error("Failed to run migrations", e))?;
        tracing::info!("Migrations applied");
    }

    let redis_cache = RedisCache::new(&config.redis_url)
        .await
        .map_err(|e| startup_error("Failed to connect to Redis", e))?;
    tracing::info!("Connected to Redis");

    let verifier = match &config.auth {
        AuthConfig::Supabase {
            project_ref,
            anon_key,
        } => {
            tracing::info!(%project_ref, "Verifying tokens against Supabase JWKS");
            TokenVerifier::Jwks(JwksCache::new(project_ref, anon_key))
        }
        AuthConfig::SharedSecret(secret) => {
            tracing::info!("Verifying tokens with a shared HS256 secret");
            TokenVerifier::SharedSecret(secret.clone())
        }
    };

    let store: Arc<dyn Store> = Arc::new(SeaOrmStore::new(db.clone()));
    let commission_service = web::Data::new(CommissionService::new(store.clone()));

    let db_data = web::Data::new(db);
    let store_data = web::Data::new(store);
    let redis_data = web::Data::new(Arc::new(redis_cache));
    let cache_config = web::Data::new(config.cache.clone());
    let verifier_data = web::Data::new(Arc::new(verifier));

    let bind_addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Server running at http://{bind_addr}");

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allowed_methods(vec!["GET", "POST", "PUT", "PATCH", "DELETE", "OPTIONS"])
            .allowed_headers(vec![
                actix_web::http::header::AUTHORIZATION,
                actix_web::http::header::CONTENT_TYPE,
                actix_web::http::header::ACCEPT,
            ])
            .max_age(3600);

        App::new()
            .wrap(cors)
            .wrap(Logger::default())
            .configure(error::extractor_configs)
            .app_data(db_data.clone())
            .app_data(store_data.clone())
            .app_data(commission_service.clone())
            .app_data(redis_data.clone())
            .app_data(cache_config.clone())
            .app_data(verifier_data.clone())
            .service(web::scope("/api").configure(handlers::init_routes))
    })
    .bind(&bind_addr)?
    .run()
    .await
}
