use actix_web::{web, HttpResponse};
use us_core::domain::value_objects::auth_response::LoginParams;
use us_core::repositories::UserRepository;
use us_core::services::hasher::PasswordHasher;

use crate::app::AppState;
use crate::dto::auth::{LoginRequest, LoginResponseBody};
use crate::handlers::service_error_response;

/// POST /auth/login
pub async fn login<R, H>(
    state: web::Data<AppState<R, H>>,
    body: web::Json<LoginRequest>,
) -> HttpResponse
where
    R: UserRepository + 'static,
    H: PasswordHasher + 'static,
{
    let body = body.into_inner();
    let params = LoginParams {
        phone: body.phone_number,
        password: body.password,
    };

    match state.auth_service.login(params).await {
        Ok(resp) => HttpResponse::Ok().json(LoginResponseBody {
            user_id: resp.user_id,
            token: resp.token,
        }),
        Err(err) => service_error_response(&err),
    }
}
