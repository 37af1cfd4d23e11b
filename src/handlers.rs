// handlers.rs
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::HeaderMap,
    response::{IntoResponse, Redirect},
    Form, Json,
};
use serde_json::json;
use tracing::error;
use uuid::Uuid;

use crate::actions;
use crate::error::AppError;
use crate::models::{CreatePollForm, VoteForm};
use crate::state::AppState;

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(http::header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

/// Create a poll from a submitted form and redirect to its page.
pub async fn create_poll(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Form(form): Form<CreatePollForm>,
) -> Result<Redirect, AppError> {
    let poll_id = actions::create_poll(
        state.store.as_ref(),
        &state.views,
        bearer_token(&headers),
        &form,
    )
    .await?;

    Ok(Redirect::to(&format!("/polls/{poll_id}")))
}

/// Cast the calling user's vote on a poll.
pub async fn vote(
    State(state): State<Arc<AppState>>,
    Path(poll_id): Path<Uuid>,
    headers: HeaderMap,
    Form(form): Form<VoteForm>,
) -> Result<impl IntoResponse, AppError> {
    actions::cast_vote(
        state.store.as_ref(),
        &state.views,
        bearer_token(&headers),
        poll_id,
        form.option_id,
    )
    .await?;

    Ok(Json(json!({ "status": "Vote recorded" })))
}

/// Fetch all polls, newest first, with per-option vote counts.
pub async fn get_polls(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, AppError> {
    let polls = state.store.list_polls().await.map_err(|e| {
        error!(error = %e, "poll listing failed");
        AppError::Store("Failed to fetch polls")
    })?;

    state.views.refresh("/polls");
    Ok(Json(polls))
}

/// Fetch a single poll with its options.
pub async fn get_poll(
    State(state): State<Arc<AppState>>,
    Path(poll_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let poll = state
        .store
        .get_poll(poll_id)
        .await
        .map_err(|e| {
            error!(error = %e, %poll_id, "poll fetch failed");
            AppError::Store("Failed to fetch poll")
        })?
        .ok_or(AppError::NotFound("Poll not found"))?;

    state.views.refresh(&format!("/polls/{poll_id}"));
    Ok(Json(poll))
}
