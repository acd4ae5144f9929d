//! User repository trait defining the storage capability surface
//!
//! The trait is async-first and deliberately small: the service layer only
//! ever needs these operations. Implementations live in `us_infra`; a mock
//! backed by in-memory maps lives next door for tests.
//!
//! Every write takes an optional transaction handle. Passing `Some` makes
//! the call participate in the caller's open transaction; passing `None`
//! executes it as an implicit single-statement transaction. This is what
//! lets the same operation be called standalone or composed inside a
//! larger atomic unit of work (see [`crate::repositories::transaction`]).

use async_trait::async_trait;

use crate::domain::entities::user::{ActivityKind, NewUser, User};
use crate::errors::RepositoryError;

/// Storage capability surface for user records and their activity log.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Open transaction handle. A handle is confined to one request's call
    /// chain; dropping it without committing must roll the transaction
    /// back, so an aborted unit of work can never leave writes behind.
    type Tx: Send;

    /// Begin a new storage-level transaction.
    async fn begin(&self) -> Result<Self::Tx, RepositoryError>;

    /// Commit the transaction, making all writes performed through the
    /// handle observable at once.
    async fn commit(&self, tx: Self::Tx) -> Result<(), RepositoryError>;

    /// Roll the transaction back, discarding all writes performed through
    /// the handle.
    async fn rollback(&self, tx: Self::Tx) -> Result<(), RepositoryError>;

    /// Look up a user by phone number. `Ok(None)` means no such user.
    async fn find_by_phone(&self, phone: &str) -> Result<Option<User>, RepositoryError>;

    /// Look up a user by id. `Ok(None)` means no such user.
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, RepositoryError>;

    /// Insert a new user and return it with storage-assigned fields.
    /// A duplicate phone number surfaces as
    /// [`RepositoryError::UniqueViolation`].
    async fn insert(
        &self,
        tx: Option<&mut Self::Tx>,
        user: NewUser,
    ) -> Result<User, RepositoryError>;

    /// Overwrite a user's full name and phone number.
    async fn update_profile(
        &self,
        tx: Option<&mut Self::Tx>,
        id: i64,
        full_name: &str,
        phone: &str,
    ) -> Result<(), RepositoryError>;

    /// Append an entry to the user activity log.
    async fn insert_activity_log(
        &self,
        tx: Option<&mut Self::Tx>,
        user_id: i64,
        activity: ActivityKind,
    ) -> Result<(), RepositoryError>;

    /// Increment the user's login counter.
    async fn increment_login_count(
        &self,
        tx: Option<&mut Self::Tx>,
        user_id: i64,
    ) -> Result<(), RepositoryError>;
}
