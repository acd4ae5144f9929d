//! Bodies for the registration and login endpoints.

use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(rename = "fullName")]
    pub full_name: String,
    #[serde(rename = "phoneNumber")]
    pub phone_number: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponseBody {
    #[serde(rename = "userID")]
    pub user_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(rename = "phoneNumber")]
    pub phone_number: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponseBody {
    #[serde(rename = "userID")]
    pub user_id: i64,
    pub token: String,
}
