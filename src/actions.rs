// actions.rs
use tracing::{error, warn};
use uuid::Uuid;

use crate::cache::ViewCache;
use crate::error::AppError;
use crate::forms::parse_create_poll;
use crate::models::{CreatePollForm, NewPollOption};
use crate::store::{PollStore, StoreError};

pub const LOGIN_REQUIRED: &str = "You must be logged in to perform this action";
pub const LOGIN_REQUIRED_TO_VOTE: &str = "You must be logged in to vote";
pub const POLL_FAILED: &str = "Failed to create poll";
pub const OPTIONS_FAILED: &str = "Failed to create poll options";
pub const VOTE_FAILED: &str = "Failed to record vote";

async fn require_user(
    store: &dyn PollStore,
    token: Option<&str>,
    message: &'static str,
) -> Result<Uuid, AppError> {
    match store.current_user(token).await {
        Ok(Some(user_id)) => Ok(user_id),
        Ok(None) => Err(AppError::Unauthorized(message)),
        Err(e) => {
            warn!(error = %e, "user lookup failed");
            Err(AppError::Unauthorized(message))
        }
    }
}

/// Create a poll with its options. Validates first, so a bad form
/// never reaches the store, then inserts the poll and its option rows
/// in submission order. Returns the new poll's id.
pub async fn create_poll(
    store: &dyn PollStore,
    views: &ViewCache,
    token: Option<&str>,
    form: &CreatePollForm,
) -> Result<Uuid, AppError> {
    let input = parse_create_poll(form)?;
    let author_id = require_user(store, token, LOGIN_REQUIRED).await?;

    let poll = store
        .insert_poll(&input.question, author_id)
        .await
        .map_err(|e| {
            error!(error = %e, "poll insert failed");
            AppError::Store(POLL_FAILED)
        })?;

    let records: Vec<NewPollOption> = input
        .options
        .iter()
        .enumerate()
        .map(|(index, text)| NewPollOption {
            text: text.clone(),
            order_index: index as i32,
        })
        .collect();

    if let Err(e) = store.insert_options(poll.id, &records).await {
        error!(error = %e, poll_id = %poll.id, "options insert failed");
        // Best-effort cleanup so the failed create leaves no orphaned
        // poll behind.
        if let Err(e) = store.delete_poll(poll.id).await {
            warn!(error = %e, poll_id = %poll.id, "orphaned poll cleanup failed");
        }
        return Err(AppError::Store(OPTIONS_FAILED));
    }

    views.invalidate("/polls");
    views.invalidate(&format!("/polls/{}", poll.id));

    Ok(poll.id)
}

/// Record one user's vote on a poll. A user gets one vote per poll:
/// the lookup here is the fast path, the store's unique constraint on
/// (poll, user) catches concurrent duplicates.
pub async fn cast_vote(
    store: &dyn PollStore,
    views: &ViewCache,
    token: Option<&str>,
    poll_id: Uuid,
    option_id: Uuid,
) -> Result<(), AppError> {
    let user_id = require_user(store, token, LOGIN_REQUIRED_TO_VOTE).await?;

    let existing = store.find_vote(poll_id, user_id).await.map_err(|e| {
        error!(error = %e, %poll_id, "vote lookup failed");
        AppError::Store(VOTE_FAILED)
    })?;
    if existing.is_some() {
        return Err(AppError::AlreadyVoted);
    }

    store
        .insert_vote(poll_id, option_id, user_id)
        .await
        .map_err(|e| match e {
            StoreError::Conflict => AppError::AlreadyVoted,
            e => {
                error!(error = %e, %poll_id, "vote insert failed");
                AppError::Store(VOTE_FAILED)
            }
        })?;

    views.invalidate(&format!("/polls/{poll_id}"));
    views.invalidate("/polls");

    Ok(())
}
