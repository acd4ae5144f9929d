use actix_web::{web, HttpResponse};
use us_core::domain::value_objects::auth_response::RegisterParams;
use us_core::repositories::UserRepository;
use us_core::services::hasher::PasswordHasher;

use crate::app::AppState;
use crate::dto::auth::{RegisterRequest, RegisterResponseBody};
use crate::handlers::service_error_response;

/// POST /auth/register
pub async fn register<R, H>(
    state: web::Data<AppState<R, H>>,
    body: web::Json<RegisterRequest>,
) -> HttpResponse
where
    R: UserRepository + 'static,
    H: PasswordHasher + 'static,
{
    let body = body.into_inner();
    let params = RegisterParams {
        full_name: body.full_name,
        phone: body.phone_number,
        password: body.password,
    };

    match state.auth_service.register(params).await {
        Ok(resp) => HttpResponse::Ok().json(RegisterResponseBody {
            user_id: resp.user_id,
        }),
        Err(err) => service_error_response(&err),
    }
}
