use sqlx::SqlitePool;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::auth::repo_types::{ApprovalStatus, Role, User};

impl User {
    /// Find a user by (lowercased) email.
    pub async fn find_by_email(db: &SqlitePool, email: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password_hash, role, status, created_at
            FROM users
            WHERE email = ?
            "#,
        )
        .bind(email)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    pub async fn find_by_id(db: &SqlitePool, id: Uuid) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password_hash, role, status, created_at
            FROM users
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    /// True when the email or the username is already registered.
    pub async fn identity_taken(
        db: &SqlitePool,
        email: &str,
        username: &str,
    ) -> anyhow::Result<bool> {
        let row = sqlx::query_scalar::<_, i64>(
            "SELECT 1 FROM users WHERE email = ? OR username = ? LIMIT 1",
        )
        .bind(email)
        .bind(username)
        .fetch_optional(db)
        .await?;
        Ok(row.is_some())
    }

    /// Insert a new user with an already-hashed password. Returns the raw
    /// sqlx error so callers can map a unique-constraint race to
    /// `DuplicateIdentity`.
    pub async fn create(
        db: &SqlitePool,
        username: &str,
        email: &str,
        password_hash: &str,
        role: Role,
        status: ApprovalStatus,
    ) -> sqlx::Result<User> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, username, email, password_hash, role, status, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            RETURNING id, username, email, password_hash, role, status, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(username)
        .bind(email)
        .bind(password_hash)
        .bind(role)
        .bind(status)
        .bind(OffsetDateTime::now_utc())
        .fetch_one(db)
        .await
    }

    pub async fn find_any_admin(db: &SqlitePool) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password_hash, role, status, created_at
            FROM users
            WHERE role = ?
            LIMIT 1
            "#,
        )
        .bind(Role::Admin)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    /// Users awaiting approval, oldest signup first.
    pub async fn list_pending(db: &SqlitePool) -> anyhow::Result<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password_hash, role, status, created_at
            FROM users
            WHERE status = ?
            ORDER BY rowid
            "#,
        )
        .bind(ApprovalStatus::Pending)
        .fetch_all(db)
        .await?;
        Ok(users)
    }

    /// Every account, newest signup first.
    pub async fn list_all(db: &SqlitePool) -> anyhow::Result<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password_hash, role, status, created_at
            FROM users
            ORDER BY created_at DESC, rowid DESC
            "#,
        )
        .fetch_all(db)
        .await?;
        Ok(users)
    }

    /// Transition an account's approval status; `None` when no such user.
    pub async fn set_status(
        db: &SqlitePool,
        id: Uuid,
        status: ApprovalStatus,
    ) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET status = ?
            WHERE id = ?
            RETURNING id, username, email, password_hash, role, status, created_at
            "#,
        )
        .bind(status)
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }
}
