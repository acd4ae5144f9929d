//! Postgres implementation of the `UserRepository` trait
//!
//! Each write accepts an optional open transaction handle; with `None` it
//! executes against the pool as an implicit single-statement transaction,
//! with `Some` it runs on the caller's transaction connection. sqlx rolls
//! an uncommitted `Transaction` back when it is dropped, which provides
//! the drop-rollback guarantee the trait requires.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Postgres, Row, Transaction};

use us_core::domain::entities::user::{ActivityKind, NewUser, User};
use us_core::errors::RepositoryError;
use us_core::repositories::UserRepository;

/// Postgres error code for a unique constraint violation.
const UNIQUE_VIOLATION_CODE: &str = "23505";

const USER_COLUMNS: &str = "id, full_name, hashed_password, phone, login_count, created_at, updated_at";

/// Postgres-backed user repository.
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_user(row: &PgRow) -> Result<User, RepositoryError> {
        Ok(User {
            id: row.try_get("id").map_err(map_sqlx_error)?,
            full_name: row.try_get("full_name").map_err(map_sqlx_error)?,
            hashed_password: row.try_get("hashed_password").map_err(map_sqlx_error)?,
            phone: row.try_get("phone").map_err(map_sqlx_error)?,
            login_count: row.try_get("login_count").map_err(map_sqlx_error)?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(map_sqlx_error)?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(map_sqlx_error)?,
        })
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    type Tx = Transaction<'static, Postgres>;

    async fn begin(&self) -> Result<Self::Tx, RepositoryError> {
        self.pool.begin().await.map_err(map_sqlx_error)
    }

    async fn commit(&self, tx: Self::Tx) -> Result<(), RepositoryError> {
        tx.commit().await.map_err(map_sqlx_error)
    }

    async fn rollback(&self, tx: Self::Tx) -> Result<(), RepositoryError> {
        tx.rollback().await.map_err(map_sqlx_error)
    }

    async fn find_by_phone(&self, phone: &str) -> Result<Option<User>, RepositoryError> {
        let query = format!(
            "SELECT {USER_COLUMNS}
             FROM users
             WHERE phone = $1
             LIMIT 1"
        );

        let row = sqlx::query(&query)
            .bind(phone)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, RepositoryError> {
        let query = format!(
            "SELECT {USER_COLUMNS}
             FROM users
             WHERE id = $1
             LIMIT 1"
        );

        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn insert(
        &self,
        tx: Option<&mut Self::Tx>,
        user: NewUser,
    ) -> Result<User, RepositoryError> {
        let query = format!(
            "INSERT INTO users (full_name, hashed_password, phone)
             VALUES ($1, $2, $3)
             RETURNING {USER_COLUMNS}"
        );

        let statement = sqlx::query(&query)
            .bind(&user.full_name)
            .bind(&user.hashed_password)
            .bind(&user.phone);

        let row = match tx {
            Some(tx) => statement.fetch_one(&mut **tx).await,
            None => statement.fetch_one(&self.pool).await,
        }
        .map_err(map_sqlx_error)?;

        Self::row_to_user(&row)
    }

    async fn update_profile(
        &self,
        tx: Option<&mut Self::Tx>,
        id: i64,
        full_name: &str,
        phone: &str,
    ) -> Result<(), RepositoryError> {
        let statement = sqlx::query(
            "UPDATE users
             SET full_name = $1, phone = $2, updated_at = CURRENT_TIMESTAMP
             WHERE id = $3",
        )
        .bind(full_name)
        .bind(phone)
        .bind(id);

        match tx {
            Some(tx) => statement.execute(&mut **tx).await,
            None => statement.execute(&self.pool).await,
        }
        .map_err(map_sqlx_error)?;

        Ok(())
    }

    async fn insert_activity_log(
        &self,
        tx: Option<&mut Self::Tx>,
        user_id: i64,
        activity: ActivityKind,
    ) -> Result<(), RepositoryError> {
        let statement = sqlx::query(
            "INSERT INTO user_activity_logs (user_id, activity_type)
             VALUES ($1, $2)",
        )
        .bind(user_id)
        .bind(activity.as_str());

        let result = match tx {
            Some(tx) => statement.execute(&mut **tx).await,
            None => statement.execute(&self.pool).await,
        }
        .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::database("no rows affected"));
        }

        Ok(())
    }

    async fn increment_login_count(
        &self,
        tx: Option<&mut Self::Tx>,
        user_id: i64,
    ) -> Result<(), RepositoryError> {
        let statement = sqlx::query(
            "UPDATE users
             SET login_count = login_count + 1, updated_at = CURRENT_TIMESTAMP
             WHERE id = $1",
        )
        .bind(user_id);

        match tx {
            Some(tx) => statement.execute(&mut **tx).await,
            None => statement.execute(&self.pool).await,
        }
        .map_err(map_sqlx_error)?;

        Ok(())
    }
}

fn map_sqlx_error(err: sqlx::Error) -> RepositoryError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some(UNIQUE_VIOLATION_CODE) {
            return RepositoryError::UniqueViolation {
                message: db_err.message().to_string(),
            };
        }
    }
    RepositoryError::database(err.to_string())
}
