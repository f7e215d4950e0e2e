pub mod applications;
pub mod artists;
pub mod auth;
pub mod availability;
pub mod clients;
pub mod commissions;
pub mod portfolio;
pub mod projects;
pub mod users;

use actix_web::web;

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    // ── Auth routes (protected by JWT via the AuthenticatedUser extractor) ──
    cfg.service(
        web::scope("/auth")
            .route("/me", web::get().to(auth::me))
            .route("/complete-profile", web::post().to(auth::complete_profile)),
    );

    // ── User routes ──
    cfg.service(web::resource("/users").route(web::get().to(users::get_users)));
    cfg.service(
        web::resource("/users/{id}")
            .route(web::get().to(users::get_user))
            .route(web::put().to(users::update_user))
            .route(web::delete().to(users::delete_user)),
    );

    // ── Artist and client profiles ──
    cfg.service(
        web::scope("/artists")
            .route("", web::get().to(artists::get_artists))
            .route("", web::post().to(artists::create_artist))
            .route("/user/{user_id}", web::get().to(artists::get_artist_by_user))
            .route("/{id}", web::get().to(artists::get_artist))
            .route("/{id}", web::put().to(artists::update_artist)),
    );
    cfg.service(
        web::scope("/clients")
            .route("", web::post().to(clients::create_client))
            .route("/me", web::get().to(clients::get_my_client)),
    );

    // ── Portfolio routes ──
    portfolio::init_routes(cfg);

    // ── Projects and applications ──
    cfg.service(
        web::scope("/projects")
            .route("", web::get().to(projects::get_projects))
            .route("", web::post().to(projects::create_project))
            .route("/{id}", web::get().to(projects::get_project))
            .route("/{id}", web::put().to(projects::update_project))
            .route("/{id}", web::delete().to(projects::delete_project)),
    );
    applications::init_routes(cfg);

    // ── Availability posts ──
    cfg.service(
        web::scope("/availability-posts")
            .route("", web::get().to(availability::get_posts))
            .route("", web::post().to(availability::create_post))
            .route("/{id}", web::get().to(availability::get_post))
            .route("/{id}", web::put().to(availability::update_post))
            .route("/{id}", web::delete().to(availability::delete_post)),
    );

    // ── Commissions ──
    commissions::init_routes(cfg);
}
