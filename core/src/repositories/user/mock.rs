//! In-memory implementation of `UserRepository` for tests
//!
//! Writes performed through an open [`MockTx`] are staged on the handle
//! and only applied to the shared state on commit; rollback (or dropping
//! the handle) discards them. Writes with no handle apply immediately,
//! mirroring the implicit single-statement transaction of a real store.
//! Per-operation failure flags let tests inject storage errors.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::domain::entities::user::{ActivityKind, NewUser, User};
use crate::errors::RepositoryError;

use super::trait_::UserRepository;

#[derive(Default)]
struct MockState {
    users: HashMap<i64, User>,
    activity_log: Vec<(i64, ActivityKind)>,
}

#[derive(Debug)]
enum StagedWrite {
    InsertUser(User),
    UpdateProfile {
        id: i64,
        full_name: String,
        phone: String,
    },
    ActivityLog {
        user_id: i64,
        activity: ActivityKind,
    },
    LoginIncrement {
        user_id: i64,
    },
}

/// Transaction handle of the mock store: a buffer of staged writes.
/// Dropping it uncommitted discards the buffer, which is exactly the
/// drop-rollback guarantee the trait requires.
#[derive(Debug, Default)]
pub struct MockTx {
    staged: Vec<StagedWrite>,
}

/// Mock user repository for tests.
pub struct MockUserRepository {
    state: Arc<RwLock<MockState>>,
    next_id: AtomicI64,
    fail_find_by_phone: AtomicBool,
    fail_insert_activity_log: AtomicBool,
    fail_increment_login_count: AtomicBool,
}

impl MockUserRepository {
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(MockState::default())),
            next_id: AtomicI64::new(1),
            fail_find_by_phone: AtomicBool::new(false),
            fail_insert_activity_log: AtomicBool::new(false),
            fail_increment_login_count: AtomicBool::new(false),
        }
    }

    /// Make every `find_by_phone` call fail with a storage error.
    pub fn fail_find_by_phone(&self, fail: bool) {
        self.fail_find_by_phone.store(fail, Ordering::SeqCst);
    }

    /// Make every `insert_activity_log` call fail with a storage error.
    pub fn fail_insert_activity_log(&self, fail: bool) {
        self.fail_insert_activity_log.store(fail, Ordering::SeqCst);
    }

    /// Make every `increment_login_count` call fail with a storage error.
    pub fn fail_increment_login_count(&self, fail: bool) {
        self.fail_increment_login_count.store(fail, Ordering::SeqCst);
    }

    /// Number of activity log entries recorded for a user.
    pub async fn activity_count(&self, user_id: i64) -> usize {
        let state = self.state.read().await;
        state
            .activity_log
            .iter()
            .filter(|(id, _)| *id == user_id)
            .count()
    }

    fn apply(state: &mut MockState, write: StagedWrite) {
        match write {
            StagedWrite::InsertUser(user) => {
                state.users.insert(user.id, user);
            }
            StagedWrite::UpdateProfile {
                id,
                full_name,
                phone,
            } => {
                if let Some(user) = state.users.get_mut(&id) {
                    user.full_name = full_name;
                    user.phone = phone;
                    user.updated_at = Utc::now();
                }
            }
            StagedWrite::ActivityLog { user_id, activity } => {
                state.activity_log.push((user_id, activity));
            }
            StagedWrite::LoginIncrement { user_id } => {
                if let Some(user) = state.users.get_mut(&user_id) {
                    user.login_count += 1;
                    user.updated_at = Utc::now();
                }
            }
        }
    }

    async fn write(
        &self,
        tx: Option<&mut MockTx>,
        write: StagedWrite,
    ) -> Result<(), RepositoryError> {
        match tx {
            Some(tx) => {
                tx.staged.push(write);
            }
            None => {
                let mut state = self.state.write().await;
                Self::apply(&mut state, write);
            }
        }
        Ok(())
    }
}

impl Default for MockUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    type Tx = MockTx;

    async fn begin(&self) -> Result<Self::Tx, RepositoryError> {
        Ok(MockTx::default())
    }

    async fn commit(&self, tx: Self::Tx) -> Result<(), RepositoryError> {
        let mut state = self.state.write().await;
        for write in tx.staged {
            Self::apply(&mut state, write);
        }
        Ok(())
    }

    async fn rollback(&self, tx: Self::Tx) -> Result<(), RepositoryError> {
        drop(tx);
        Ok(())
    }

    async fn find_by_phone(&self, phone: &str) -> Result<Option<User>, RepositoryError> {
        if self.fail_find_by_phone.load(Ordering::SeqCst) {
            return Err(RepositoryError::database("injected find_by_phone failure"));
        }
        let state = self.state.read().await;
        Ok(state.users.values().find(|u| u.phone == phone).cloned())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, RepositoryError> {
        let state = self.state.read().await;
        Ok(state.users.get(&id).cloned())
    }

    async fn insert(
        &self,
        tx: Option<&mut Self::Tx>,
        user: NewUser,
    ) -> Result<User, RepositoryError> {
        {
            let state = self.state.read().await;
            if state.users.values().any(|u| u.phone == user.phone) {
                return Err(RepositoryError::UniqueViolation {
                    message: format!("users_phone_key: {}", user.phone),
                });
            }
        }

        let now = Utc::now();
        let stored = User {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            full_name: user.full_name,
            hashed_password: user.hashed_password,
            phone: user.phone,
            login_count: 0,
            created_at: now,
            updated_at: now,
        };

        self.write(tx, StagedWrite::InsertUser(stored.clone())).await?;
        Ok(stored)
    }

    async fn update_profile(
        &self,
        tx: Option<&mut Self::Tx>,
        id: i64,
        full_name: &str,
        phone: &str,
    ) -> Result<(), RepositoryError> {
        {
            let state = self.state.read().await;
            if state
                .users
                .values()
                .any(|u| u.phone == phone && u.id != id)
            {
                return Err(RepositoryError::UniqueViolation {
                    message: format!("users_phone_key: {phone}"),
                });
            }
        }

        self.write(
            tx,
            StagedWrite::UpdateProfile {
                id,
                full_name: full_name.to_string(),
                phone: phone.to_string(),
            },
        )
        .await
    }

    async fn insert_activity_log(
        &self,
        tx: Option<&mut Self::Tx>,
        user_id: i64,
        activity: ActivityKind,
    ) -> Result<(), RepositoryError> {
        if self.fail_insert_activity_log.load(Ordering::SeqCst) {
            return Err(RepositoryError::database(
                "injected insert_activity_log failure",
            ));
        }
        self.write(tx, StagedWrite::ActivityLog { user_id, activity })
            .await
    }

    async fn increment_login_count(
        &self,
        tx: Option<&mut Self::Tx>,
        user_id: i64,
    ) -> Result<(), RepositoryError> {
        if self.fail_increment_login_count.load(Ordering::SeqCst) {
            return Err(RepositoryError::database(
                "injected increment_login_count failure",
            ));
        }
        self.write(tx, StagedWrite::LoginIncrement { user_id }).await
    }
}
