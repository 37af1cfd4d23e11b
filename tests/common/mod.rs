use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use pollboard::models::{NewPollOption, Poll, PollRecord, Vote};
use pollboard::store::{PollStore, StoreError};

fn database_error() -> StoreError {
    StoreError::Database(sqlx::Error::RowNotFound)
}

/// A scripted store for tests. Records every write so assertions can
/// check what reached the store and in what order.
pub struct MockStore {
    pub user: Option<Uuid>,
    pub poll_id: Uuid,
    pub existing_vote: Option<Vote>,
    pub fail_insert_poll: bool,
    pub fail_insert_options: bool,
    pub fail_find_vote: bool,
    pub vote_conflict: bool,
    pub inserted_polls: Mutex<Vec<(String, Uuid)>>,
    pub inserted_options: Mutex<Vec<(Uuid, Vec<NewPollOption>)>>,
    pub inserted_votes: Mutex<Vec<Vote>>,
    pub deleted_polls: Mutex<Vec<Uuid>>,
}

impl MockStore {
    pub fn authed(user: Uuid) -> Self {
        Self {
            user: Some(user),
            poll_id: Uuid::new_v4(),
            existing_vote: None,
            fail_insert_poll: false,
            fail_insert_options: false,
            fail_find_vote: false,
            vote_conflict: false,
            inserted_polls: Mutex::new(Vec::new()),
            inserted_options: Mutex::new(Vec::new()),
            inserted_votes: Mutex::new(Vec::new()),
            deleted_polls: Mutex::new(Vec::new()),
        }
    }

    pub fn anonymous() -> Self {
        Self {
            user: None,
            ..Self::authed(Uuid::new_v4())
        }
    }
}

#[async_trait]
impl PollStore for MockStore {
    async fn current_user(&self, _token: Option<&str>) -> Result<Option<Uuid>, StoreError> {
        Ok(self.user)
    }

    async fn insert_poll(&self, question: &str, author_id: Uuid) -> Result<PollRecord, StoreError> {
        if self.fail_insert_poll {
            return Err(database_error());
        }

        self.inserted_polls
            .lock()
            .unwrap()
            .push((question.to_string(), author_id));

        Ok(PollRecord {
            id: self.poll_id,
            question: question.to_string(),
            author_id,
            created_at: Utc::now(),
        })
    }

    async fn insert_options(
        &self,
        poll_id: Uuid,
        options: &[NewPollOption],
    ) -> Result<(), StoreError> {
        if self.fail_insert_options {
            return Err(database_error());
        }

        self.inserted_options
            .lock()
            .unwrap()
            .push((poll_id, options.to_vec()));
        Ok(())
    }

    async fn delete_poll(&self, poll_id: Uuid) -> Result<(), StoreError> {
        self.deleted_polls.lock().unwrap().push(poll_id);
        Ok(())
    }

    async fn find_vote(&self, _poll_id: Uuid, _user_id: Uuid) -> Result<Option<Vote>, StoreError> {
        if self.fail_find_vote {
            return Err(database_error());
        }
        Ok(self.existing_vote.clone())
    }

    async fn insert_vote(
        &self,
        poll_id: Uuid,
        option_id: Uuid,
        user_id: Uuid,
    ) -> Result<(), StoreError> {
        if self.vote_conflict {
            return Err(StoreError::Conflict);
        }

        self.inserted_votes.lock().unwrap().push(Vote {
            poll_id,
            option_id,
            user_id,
        });
        Ok(())
    }

    async fn list_polls(&self) -> Result<Vec<Poll>, StoreError> {
        Ok(Vec::new())
    }

    async fn get_poll(&self, _poll_id: Uuid) -> Result<Option<Poll>, StoreError> {
        Ok(None)
    }
}
