pub mod token;
pub mod user;

pub use token::Claims;
pub use user::{ActivityKind, NewUser, User};
