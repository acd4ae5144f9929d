//! Profile endpoints for the authenticated user.

mod profile;

pub use profile::{get_profile, update_profile};
