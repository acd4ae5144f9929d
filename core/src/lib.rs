//! Core business logic and domain layer for the user service
//!
//! This crate contains the domain entities, the error taxonomy, the
//! repository abstraction (including the transactional unit of work), and
//! the authentication services. It has no knowledge of HTTP or of any
//! concrete storage engine; those live in the `us_api` and `us_infra`
//! crates respectively.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

#[cfg(test)]
pub(crate) mod test_support;
