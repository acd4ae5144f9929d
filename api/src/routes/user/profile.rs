use actix_web::{web, HttpResponse};
use us_core::domain::value_objects::auth_response::UpdateProfileParams;
use us_core::repositories::UserRepository;
use us_core::services::hasher::PasswordHasher;

use crate::app::AppState;
use crate::dto::user::{ProfileResponseBody, UpdateProfileRequest};
use crate::handlers::{bad_request_response, service_error_response};
use crate::middleware::CurrentUser;

/// GET /profile
pub async fn get_profile<R, H>(
    state: web::Data<AppState<R, H>>,
    current_user: CurrentUser,
) -> HttpResponse
where
    R: UserRepository + 'static,
    H: PasswordHasher + 'static,
{
    match state.auth_service.get_profile(current_user.user_id).await {
        Ok(resp) => HttpResponse::Ok().json(ProfileResponseBody {
            full_name: resp.full_name,
            phone_number: resp.phone,
        }),
        Err(err) => service_error_response(&err),
    }
}

/// PUT /profile
pub async fn update_profile<R, H>(
    state: web::Data<AppState<R, H>>,
    current_user: CurrentUser,
    body: web::Json<UpdateProfileRequest>,
) -> HttpResponse
where
    R: UserRepository + 'static,
    H: PasswordHasher + 'static,
{
    let body = body.into_inner();
    if body.is_empty() {
        return bad_request_response("full name or phone number cannot be empty");
    }

    let params = UpdateProfileParams {
        user_id: current_user.user_id,
        full_name: body.full_name,
        phone: body.phone_number,
    };

    match state.auth_service.update_profile(params).await {
        Ok(resp) => HttpResponse::Ok().json(ProfileResponseBody {
            full_name: resp.full_name,
            phone_number: resp.phone,
        }),
        Err(err) => service_error_response(&err),
    }
}
