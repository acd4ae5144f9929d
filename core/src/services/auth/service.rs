//! Auth service: login, registration and profile flows
//!
//! Every flow is a linear state machine with early exits; each failure is
//! mapped exactly once to a [`ServiceError`] kind and propagated unchanged.
//! No retries anywhere: the unit of work blocks the calling request until
//! commit or rollback completes.

use std::sync::Arc;

use crate::domain::entities::user::{ActivityKind, NewUser};
use crate::domain::value_objects::{
    LoginParams, LoginResponse, ProfileResponse, RegisterParams, RegisterResponse,
    UpdateProfileParams, UpdateProfileResponse,
};
use crate::errors::{phone_already_used_message, RepositoryError, ServiceError};
use crate::repositories::{run_in_transaction, UserRepository};
use crate::services::hasher::PasswordHasher;
use crate::services::token::TokenService;

use super::config::AuthServiceConfig;

/// Orchestrates credential checks, the transactional login bookkeeping and
/// token issuance.
pub struct AuthService<R, H> {
    repository: R,
    hasher: H,
    token_service: Arc<TokenService>,
    config: AuthServiceConfig,
}

impl<R, H> AuthService<R, H>
where
    R: UserRepository,
    H: PasswordHasher,
{
    pub fn new(
        repository: R,
        hasher: H,
        token_service: Arc<TokenService>,
        config: AuthServiceConfig,
    ) -> Self {
        Self {
            repository,
            hasher,
            token_service,
            config,
        }
    }

    /// Authenticate by phone and password.
    ///
    /// On success the login activity record and the login counter are
    /// written as one atomic unit, then a token with the configured
    /// validity window is issued. Unknown phone and wrong password return
    /// the identical bad-request message.
    pub async fn login(&self, params: LoginParams) -> Result<LoginResponse, ServiceError> {
        let user = self
            .repository
            .find_by_phone(&params.phone)
            .await
            .map_err(ServiceError::system)?;

        let Some(user) = user else {
            return Err(ServiceError::wrong_credentials());
        };

        // A compare error (corrupt stored hash) reads as a mismatch.
        let password_ok = self
            .hasher
            .verify(&user.hashed_password, &params.password)
            .unwrap_or(false);
        if !password_ok {
            return Err(ServiceError::wrong_credentials());
        }

        let user_id = user.id;
        run_in_transaction(&self.repository, move |repo, tx| {
            Box::pin(async move {
                repo.insert_activity_log(Some(&mut *tx), user_id, ActivityKind::Login)
                    .await?;
                repo.increment_login_count(Some(&mut *tx), user_id).await
            })
        })
        .await
        .map_err(ServiceError::system)?;

        let token = self
            .token_service
            .issue(user.id, self.config.token_ttl)
            .map_err(ServiceError::system)?;

        Ok(LoginResponse {
            user_id: user.id,
            token,
        })
    }

    /// Create a new user with a hashed password.
    pub async fn register(&self, params: RegisterParams) -> Result<RegisterResponse, ServiceError> {
        let existing = self
            .repository
            .find_by_phone(&params.phone)
            .await
            .map_err(ServiceError::system)?;
        if existing.is_some() {
            return Err(ServiceError::bad_request(phone_already_used_message(
                &params.phone,
            )));
        }

        let hashed_password = self
            .hasher
            .hash(&params.password)
            .map_err(ServiceError::system)?;

        let user = self
            .repository
            .insert(
                None,
                NewUser {
                    full_name: params.full_name,
                    hashed_password,
                    phone: params.phone.clone(),
                },
            )
            .await
            .map_err(|err| match err {
                // Concurrent registration lost the race on the unique index
                RepositoryError::UniqueViolation { .. } => {
                    ServiceError::conflict(phone_already_used_message(&params.phone))
                }
                other => ServiceError::system(other),
            })?;

        Ok(RegisterResponse { user_id: user.id })
    }

    /// Fetch the authenticated user's profile.
    pub async fn get_profile(&self, user_id: i64) -> Result<ProfileResponse, ServiceError> {
        let user = self
            .repository
            .find_by_id(user_id)
            .await
            .map_err(ServiceError::system)?;

        let Some(user) = user else {
            return Err(ServiceError::user_not_found());
        };

        Ok(ProfileResponse {
            full_name: user.full_name,
            phone: user.phone,
        })
    }

    /// Update full name and/or phone number; omitted fields keep their
    /// current value. A phone number already held by another user is a
    /// conflict.
    pub async fn update_profile(
        &self,
        params: UpdateProfileParams,
    ) -> Result<UpdateProfileResponse, ServiceError> {
        let user = self
            .repository
            .find_by_id(params.user_id)
            .await
            .map_err(ServiceError::system)?;

        let Some(user) = user else {
            return Err(ServiceError::user_not_found());
        };

        let full_name = params.full_name.unwrap_or(user.full_name);
        let phone = match params.phone {
            None => user.phone,
            Some(phone) if phone == user.phone => phone,
            Some(phone) => {
                let taken = self
                    .repository
                    .find_by_phone(&phone)
                    .await
                    .map_err(ServiceError::system)?;
                if taken.is_some() {
                    return Err(ServiceError::conflict(phone_already_used_message(&phone)));
                }
                phone
            }
        };

        self.repository
            .update_profile(None, user.id, &full_name, &phone)
            .await
            .map_err(|err| match err {
                RepositoryError::UniqueViolation { .. } => {
                    ServiceError::conflict(phone_already_used_message(&phone))
                }
                other => ServiceError::system(other),
            })?;

        Ok(UpdateProfileResponse { full_name, phone })
    }
}
