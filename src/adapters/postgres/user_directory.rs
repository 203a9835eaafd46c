use crate::domain::UserId;
use crate::ports::user_directory::{Result, UserDirectory as UserDirectoryTrait, UserSummary};
use async_trait::async_trait;
use sqlx::{PgPool, Row};
use uuid::Uuid;

/// PostgreSQL implementation of UserDirectory
///
/// Read-only view of the `users` table owned by the account context.
pub struct UserDirectory {
    pool: PgPool,
}

impl UserDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserDirectoryTrait for UserDirectory {
    async fn exists(&self, user_id: UserId) -> Result<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM users WHERE user_id = $1)")
                .bind(user_id.value())
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    async fn find_summaries(&self, user_ids: &[UserId]) -> Result<Vec<UserSummary>> {
        let ids: Vec<Uuid> = user_ids.iter().map(UserId::value).collect();

        let rows = sqlx::query(
            r#"
            SELECT user_id, name, email, phone
            FROM users
            WHERE user_id = ANY($1)
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .iter()
            .map(|row| UserSummary {
                user_id: UserId::from_uuid(row.get("user_id")),
                name: row.get("name"),
                email: row.get("email"),
                phone: row.get("phone"),
            })
            .collect())
    }
}
