//! Wire types shared across endpoints

mod response;

pub use response::ErrorResponse;
