// store.rs
use async_trait::async_trait;
use sqlx::PgPool;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{NewPollOption, Poll, PollOption, PollRecord, Vote};

#[derive(Error, Debug)]
pub enum StoreError {
    /// A uniqueness constraint rejected the write.
    #[error("duplicate row")]
    Conflict,

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Everything the workflows need from the backing store. The server
/// talks to Postgres through [`PgStore`]; tests script a mock.
#[async_trait]
pub trait PollStore: Send + Sync {
    /// Resolve a session token to a user id, `None` when nobody is
    /// authenticated.
    async fn current_user(&self, token: Option<&str>) -> Result<Option<Uuid>, StoreError>;

    /// Insert a poll and fetch the stored row back.
    async fn insert_poll(&self, question: &str, author_id: Uuid) -> Result<PollRecord, StoreError>;

    /// Insert one option row per entry, as a batch.
    async fn insert_options(
        &self,
        poll_id: Uuid,
        options: &[NewPollOption],
    ) -> Result<(), StoreError>;

    /// Remove a poll (options and votes cascade).
    async fn delete_poll(&self, poll_id: Uuid) -> Result<(), StoreError>;

    /// Look up an existing vote for (poll, user).
    async fn find_vote(&self, poll_id: Uuid, user_id: Uuid) -> Result<Option<Vote>, StoreError>;

    /// Record a vote. A second vote by the same user on the same poll
    /// fails with [`StoreError::Conflict`].
    async fn insert_vote(
        &self,
        poll_id: Uuid,
        option_id: Uuid,
        user_id: Uuid,
    ) -> Result<(), StoreError>;

    /// All polls, newest first, options in display order with derived
    /// vote counts.
    async fn list_polls(&self) -> Result<Vec<Poll>, StoreError>;

    async fn get_poll(&self, poll_id: Uuid) -> Result<Option<Poll>, StoreError>;
}

pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn options_for(&self, poll_id: Uuid) -> Result<Vec<PollOption>, StoreError> {
        let options = sqlx::query_as::<_, PollOption>(
            "SELECT o.id, o.poll_id, o.text, o.order_index, COUNT(v.user_id) AS votes
             FROM poll_options o
             LEFT JOIN votes v ON v.option_id = o.id
             WHERE o.poll_id = $1
             GROUP BY o.id, o.poll_id, o.text, o.order_index
             ORDER BY o.order_index",
        )
        .bind(poll_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(options)
    }

    fn with_options(record: PollRecord, options: Vec<PollOption>) -> Poll {
        Poll {
            id: record.id,
            question: record.question,
            author_id: record.author_id,
            created_at: record.created_at,
            options,
        }
    }
}

#[async_trait]
impl PollStore for PgStore {
    async fn current_user(&self, token: Option<&str>) -> Result<Option<Uuid>, StoreError> {
        let Some(token) = token else {
            return Ok(None);
        };

        let user_id = sqlx::query_scalar::<_, Uuid>(
            "SELECT user_id FROM sessions WHERE token = $1",
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user_id)
    }

    async fn insert_poll(&self, question: &str, author_id: Uuid) -> Result<PollRecord, StoreError> {
        let poll = sqlx::query_as::<_, PollRecord>(
            "INSERT INTO polls (question, author_id)
             VALUES ($1, $2)
             RETURNING id, question, author_id, created_at",
        )
        .bind(question)
        .bind(author_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(poll)
    }

    async fn insert_options(
        &self,
        poll_id: Uuid,
        options: &[NewPollOption],
    ) -> Result<(), StoreError> {
        for option in options {
            sqlx::query(
                "INSERT INTO poll_options (poll_id, text, order_index) VALUES ($1, $2, $3)",
            )
            .bind(poll_id)
            .bind(&option.text)
            .bind(option.order_index)
            .execute(&self.pool)
            .await?;
        }

        Ok(())
    }

    async fn delete_poll(&self, poll_id: Uuid) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM polls WHERE id = $1")
            .bind(poll_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn find_vote(&self, poll_id: Uuid, user_id: Uuid) -> Result<Option<Vote>, StoreError> {
        let vote = sqlx::query_as::<_, Vote>(
            "SELECT poll_id, option_id, user_id FROM votes WHERE poll_id = $1 AND user_id = $2",
        )
        .bind(poll_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(vote)
    }

    async fn insert_vote(
        &self,
        poll_id: Uuid,
        option_id: Uuid,
        user_id: Uuid,
    ) -> Result<(), StoreError> {
        sqlx::query("INSERT INTO votes (poll_id, option_id, user_id) VALUES ($1, $2, $3)")
            .bind(poll_id)
            .bind(option_id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| match &e {
                // votes_poll_user_key closes the check-then-insert race
                sqlx::Error::Database(db) if db.is_unique_violation() => StoreError::Conflict,
                _ => StoreError::Database(e),
            })?;

        Ok(())
    }

    async fn list_polls(&self) -> Result<Vec<Poll>, StoreError> {
        let records = sqlx::query_as::<_, PollRecord>(
            "SELECT id, question, author_id, created_at FROM polls ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        let mut polls = Vec::with_capacity(records.len());
        for record in records {
            let options = self.options_for(record.id).await?;
            polls.push(Self::with_options(record, options));
        }

        Ok(polls)
    }

    async fn get_poll(&self, poll_id: Uuid) -> Result<Option<Poll>, StoreError> {
        let record = sqlx::query_as::<_, PollRecord>(
            "SELECT id, question, author_id, created_at FROM polls WHERE id = $1",
        )
        .bind(poll_id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(record) = record else {
            return Ok(None);
        };

        let options = self.options_for(record.id).await?;
        Ok(Some(Self::with_options(record, options)))
    }
}
