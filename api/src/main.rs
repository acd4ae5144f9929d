use std::sync::Arc;

use actix_web::{web, HttpServer};
use dotenvy::dotenv;
use log::info;

use us_api::app::{create_app, AppState};
use us_core::services::auth::{AuthService, AuthServiceConfig};
use us_core::services::token::{KeyManager, TokenService};
use us_infra::{create_pool, BcryptPasswordHasher, PgUserRepository};
use us_shared::config::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = AppConfig::from_env().map_err(|e| anyhow::anyhow!(e))?;

    let keys = Arc::new(KeyManager::from_env()?);
    let token_service = Arc::new(TokenService::new(keys));

    let pool = create_pool(&config.database).await?;
    let auth_service = AuthService::new(
        PgUserRepository::new(pool),
        BcryptPasswordHasher::new(),
        Arc::clone(&token_service),
        AuthServiceConfig::new(chrono::Duration::seconds(config.auth.token_ttl_seconds)),
    );
    let state = web::Data::new(AppState { auth_service });

    let bind_address = config.server.bind_address();
    info!("starting user service on {}", bind_address);

    HttpServer::new(move || create_app(state.clone(), Arc::clone(&token_service)))
        .bind(&bind_address)?
        .run()
        .await?;

    Ok(())
}
