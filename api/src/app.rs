//! Application assembly.
//!
//! `create_app` builds the full actix-web `App` from injected
//! dependencies, so integration tests can run the identical routing
//! and middleware stack over in-memory implementations.

use std::sync::Arc;

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    middleware::Logger,
    web, App, Error, HttpResponse,
};
use us_core::repositories::UserRepository;
use us_core::services::auth::AuthService;
use us_core::services::hasher::PasswordHasher;
use us_core::services::token::TokenService;

use crate::middleware::AuthGate;
use crate::routes;

/// Shared per-worker state handed to every handler.
pub struct AppState<R, H> {
    pub auth_service: AuthService<R, H>,
}

/// GET /health
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({ "status": "healthy" }))
}

pub fn create_app<R, H>(
    state: web::Data<AppState<R, H>>,
    token_service: Arc<TokenService>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
>
where
    R: UserRepository + 'static,
    H: PasswordHasher + 'static,
{
    App::new()
        .app_data(state)
        .wrap(AuthGate::new(token_service))
        .wrap(Logger::default())
        .route("/health", web::get().to(health_check))
        .route("/auth/register", web::post().to(routes::auth::register::<R, H>))
        .route("/auth/login", web::post().to(routes::auth::login::<R, H>))
        .route("/profile", web::get().to(routes::user::get_profile::<R, H>))
        .route("/profile", web::put().to(routes::user::update_profile::<R, H>))
}
