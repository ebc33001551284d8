//! SQLite implementation of the subscription registry.

use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::instrument;

use turnstile_core::{NewSubscriptionTarget, StorageError, SubscriptionRegistry, SubscriptionTarget};

use crate::error::map_db_error;

/// Database row for a subscription target.
#[derive(Debug, sqlx::FromRow)]
struct TargetRow {
    id: i64,
    chat_ref: String,
    join_link: String,
    is_open: bool,
    is_active: bool,
}

impl From<TargetRow> for SubscriptionTarget {
    fn from(row: TargetRow) -> Self {
        SubscriptionTarget {
            id: row.id,
            chat_ref: row.chat_ref,
            join_link: row.join_link,
            is_open: row.is_open,
            is_active: row.is_active,
        }
    }
}

/// SQLite-backed [`SubscriptionRegistry`].
#[derive(Clone)]
pub struct SqliteSubscriptionRegistry {
    pool: SqlitePool,
}

impl SqliteSubscriptionRegistry {
    /// Create a new registry over the given pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Inserts a new required chat.
    ///
    /// Duplicate `chat_ref`s are a configuration error left to the
    /// administrative caller; the data layer does not enforce uniqueness.
    #[instrument(skip(self))]
    pub async fn insert(
        &self,
        target: &NewSubscriptionTarget,
    ) -> Result<SubscriptionTarget, StorageError> {
        let result = sqlx::query(
            r#"
            INSERT INTO subscription_targets (chat_ref, join_link, is_open, is_active)
            VALUES (?1, ?2, ?3, 1)
            "#,
        )
        .bind(&target.chat_ref)
        .bind(&target.join_link)
        .bind(target.is_open)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(SubscriptionTarget {
            id: result.last_insert_rowid(),
            chat_ref: target.chat_ref.clone(),
            join_link: target.join_link.clone(),
            is_open: target.is_open,
            is_active: true,
        })
    }

    /// Soft-deletes a target; the gating engine stops seeing it.
    #[instrument(skip(self))]
    pub async fn deactivate(&self, id: i64) -> Result<(), StorageError> {
        let result = sqlx::query(
            r#"
            UPDATE subscription_targets
            SET is_active = 0
            WHERE id = ?1 AND is_active = 1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound {
                kind: "subscription target".to_string(),
                id: id.to_string(),
            });
        }

        Ok(())
    }
}

#[async_trait]
impl SubscriptionRegistry for SqliteSubscriptionRegistry {
    #[instrument(skip(self))]
    async fn list_active(&self, is_open: bool) -> Result<Vec<SubscriptionTarget>, StorageError> {
        let rows = sqlx::query_as::<_, TargetRow>(
            r#"
            SELECT id, chat_ref, join_link, is_open, is_active
            FROM subscription_targets
            WHERE is_open = ?1 AND is_active = 1
            ORDER BY id
            "#,
        )
        .bind(is_open)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(SubscriptionTarget::from).collect())
    }
}
