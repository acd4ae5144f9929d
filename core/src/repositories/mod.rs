//! Repository abstractions and the transactional unit of work

pub mod transaction;
pub mod user;

pub use transaction::run_in_transaction;
pub use user::{MockUserRepository, UserRepository};
