use crate::auth::repo_types::{Account, ResetRequest};
use sqlx::PgPool;
use time::OffsetDateTime;

impl Account {
    /// Find an account by email.
    pub async fn find_by_email(db: &PgPool, email: &str) -> anyhow::Result<Option<Account>> {
        let account = sqlx::query_as::<_, Account>(
            r#"
            SELECT id, email, password_hash, created_at, last_login
            FROM accounts
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(db)
        .await?;
        Ok(account)
    }

    /// Create a new account; `last_login` starts out NULL.
    pub async fn create(
        db: &PgPool,
        email: &str,
        password_hash: &str,
        created_at: OffsetDateTime,
    ) -> anyhow::Result<Account> {
        let account = sqlx::query_as::<_, Account>(
            r#"
            INSERT INTO accounts (email, password_hash, created_at, last_login)
            VALUES ($1, $2, $3, NULL)
            RETURNING id, email, password_hash, created_at, last_login
            "#,
        )
        .bind(email)
        .bind(password_hash)
        .bind(created_at)
        .fetch_one(db)
        .await?;
        Ok(account)
    }

    pub async fn touch_last_login(
        db: &PgPool,
        email: &str,
        at: OffsetDateTime,
    ) -> anyhow::Result<()> {
        sqlx::query("UPDATE accounts SET last_login = $2 WHERE email = $1")
            .bind(email)
            .bind(at)
            .execute(db)
            .await?;
        Ok(())
    }

    pub async fn update_password(
        db: &PgPool,
        email: &str,
        password_hash: &str,
    ) -> anyhow::Result<()> {
        sqlx::query("UPDATE accounts SET password_hash = $2 WHERE email = $1")
            .bind(email)
            .bind(password_hash)
            .execute(db)
            .await?;
        Ok(())
    }

    pub async fn delete(db: &PgPool, email: &str) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM accounts WHERE email = $1")
            .bind(email)
            .execute(db)
            .await?;
        Ok(())
    }
}

impl ResetRequest {
    /// Drop every outstanding code for the email; keeps at most one live
    /// request per account.
    pub async fn purge_for_email(db: &PgPool, email: &str) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM password_resets WHERE email = $1")
            .bind(email)
            .execute(db)
            .await?;
        Ok(())
    }

    pub async fn create(
        db: &PgPool,
        email: &str,
        code: &str,
        expires_at: OffsetDateTime,
    ) -> anyhow::Result<()> {
        sqlx::query("INSERT INTO password_resets (email, code, expires_at) VALUES ($1, $2, $3)")
            .bind(email)
            .bind(code)
            .bind(expires_at)
            .execute(db)
            .await?;
        Ok(())
    }

    /// Exact (email, code) match; expiry is the caller's concern.
    pub async fn find(
        db: &PgPool,
        email: &str,
        code: &str,
    ) -> anyhow::Result<Option<ResetRequest>> {
        let request = sqlx::query_as::<_, ResetRequest>(
            r#"
            SELECT email, code, expires_at
            FROM password_resets
            WHERE email = $1 AND code = $2
            "#,
        )
        .bind(email)
        .bind(code)
        .fetch_optional(db)
        .await?;
        Ok(request)
    }

    /// A used code is deleted so it can succeed exactly once.
    pub async fn consume(db: &PgPool, email: &str, code: &str) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM password_resets WHERE email = $1 AND code = $2")
            .bind(email)
            .bind(code)
            .execute(db)
            .await?;
        Ok(())
    }
}
