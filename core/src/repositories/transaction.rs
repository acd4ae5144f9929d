//! Transactional unit of work
//!
//! `run_in_transaction` groups several storage operations so that they all
//! become observable together or not at all: it begins a transaction, hands
//! the open handle to the supplied operation, commits when the operation
//! returns `Ok`, and rolls back when it returns `Err` (the error is
//! propagated unchanged). If the operation panics, the handle is dropped
//! and the implementation's drop-rollback guarantee takes over, so a
//! dangling open transaction is impossible; rollback after a successful
//! commit never happens because the handle is consumed by `commit`.

use futures_util::future::BoxFuture;

use crate::errors::RepositoryError;
use crate::repositories::user::UserRepository;

/// Run `op` inside a single storage transaction.
///
/// The operation receives the repository and the open transaction handle;
/// it passes `Some(&mut *tx)` to every write it wants inside the unit of
/// work. Exactly one handle is active per call chain.
///
/// # Example
///
/// ```ignore
/// run_in_transaction(&repository, move |repo, tx| {
///     Box::pin(async move {
///         repo.insert_activity_log(Some(&mut *tx), user_id, ActivityKind::Login).await?;
///         repo.increment_login_count(Some(&mut *tx), user_id).await
///     })
/// })
/// .await?;
/// ```
pub async fn run_in_transaction<R, T, F>(repository: &R, op: F) -> Result<T, RepositoryError>
where
    R: UserRepository,
    T: Send,
    F: for<'t> FnOnce(&'t R, &'t mut R::Tx) -> BoxFuture<'t, Result<T, RepositoryError>> + Send,
{
    let mut tx = repository.begin().await?;

    match op(repository, &mut tx).await {
        Ok(value) => {
            repository.commit(tx).await?;
            Ok(value)
        }
        Err(err) => {
            // Best effort: the handle also rolls back on drop.
            if let Err(rollback_err) = repository.rollback(tx).await {
                tracing::warn!(error = %rollback_err, "rollback failed after aborted unit of work");
            }
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::user::{ActivityKind, NewUser};
    use crate::repositories::user::MockUserRepository;

    fn new_user(phone: &str) -> NewUser {
        NewUser {
            full_name: "Test User".into(),
            hashed_password: "hashed::secret".into(),
            phone: phone.into(),
        }
    }

    #[tokio::test]
    async fn commit_makes_both_writes_observable() {
        let repo = MockUserRepository::new();
        let user = repo.insert(None, new_user("+628232482440")).await.unwrap();
        let user_id = user.id;

        run_in_transaction(&repo, move |repo, tx| {
            Box::pin(async move {
                repo.insert_activity_log(Some(&mut *tx), user_id, ActivityKind::Login)
                    .await?;
                repo.increment_login_count(Some(&mut *tx), user_id).await
            })
        })
        .await
        .unwrap();

        let stored = repo.find_by_id(user_id).await.unwrap().unwrap();
        assert_eq!(stored.login_count, 1);
        assert_eq!(repo.activity_count(user_id).await, 1);
    }

    #[tokio::test]
    async fn error_after_write_rolls_back_everything() {
        let repo = MockUserRepository::new();
        let user = repo.insert(None, new_user("+628232482440")).await.unwrap();
        let user_id = user.id;

        repo.fail_increment_login_count(true);

        let result = run_in_transaction(&repo, move |repo, tx| {
            Box::pin(async move {
                repo.insert_activity_log(Some(&mut *tx), user_id, ActivityKind::Login)
                    .await?;
                repo.increment_login_count(Some(&mut *tx), user_id).await
            })
        })
        .await;

        assert!(result.is_err());
        let stored = repo.find_by_id(user_id).await.unwrap().unwrap();
        assert_eq!(stored.login_count, 0);
        assert_eq!(repo.activity_count(user_id).await, 0);
    }

    #[tokio::test]
    async fn standalone_write_commits_without_explicit_transaction() {
        let repo = MockUserRepository::new();
        let user = repo.insert(None, new_user("+628232482440")).await.unwrap();

        repo.increment_login_count(None, user.id).await.unwrap();

        let stored = repo.find_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(stored.login_count, 1);
    }
}
