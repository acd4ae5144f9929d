//! Parameter and response value objects for the auth service

/// Input to `AuthService::login`.
#[derive(Debug, Clone)]
pub struct LoginParams {
    pub phone: String,
    pub password: String,
}

/// Successful login outcome: the user's id and a signed bearer token.
#[derive(Debug, Clone)]
pub struct LoginResponse {
    pub user_id: i64,
    pub token: String,
}

/// Input to `AuthService::register`.
#[derive(Debug, Clone)]
pub struct RegisterParams {
    pub full_name: String,
    pub phone: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct RegisterResponse {
    pub user_id: i64,
}

/// Profile view returned to the authenticated user.
#[derive(Debug, Clone)]
pub struct ProfileResponse {
    pub full_name: String,
    pub phone: String,
}

/// Input to `AuthService::update_profile`. `None` fields keep their
/// current value.
#[derive(Debug, Clone)]
pub struct UpdateProfileParams {
    pub user_id: i64,
    pub full_name: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone)]
pub struct UpdateProfileResponse {
    pub full_name: String,
    pub phone: String,
}
