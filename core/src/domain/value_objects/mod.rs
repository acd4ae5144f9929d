pub mod auth_response;

pub use auth_response::{
    LoginParams, LoginResponse, ProfileResponse, RegisterParams, RegisterResponse,
    UpdateProfileParams, UpdateProfileResponse,
};
