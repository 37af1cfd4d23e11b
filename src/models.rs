// models.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A poll row as stored, before options are attached.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct PollRecord {
    pub id: Uuid,
    pub question: String,
    pub author_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// One selectable answer. `votes` is derived by counting vote rows,
/// never stored on the option itself.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct PollOption {
    pub id: Uuid,
    pub poll_id: Uuid,
    pub text: String,
    pub order_index: i32,
    pub votes: i64,
}

/// A poll with its options, as served to clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Poll {
    pub id: Uuid,
    pub question: String,
    pub author_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub options: Vec<PollOption>,
}

/// An option row to insert alongside a new poll.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewPollOption {
    pub text: String,
    pub order_index: i32,
}

/// A single user's vote on a poll. At most one row per (poll, user).
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Vote {
    pub poll_id: Uuid,
    pub option_id: Uuid,
    pub user_id: Uuid,
}

/// Raw create-poll form submission: a question and up to three options.
#[derive(Debug, Default, Deserialize)]
pub struct CreatePollForm {
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub option1: String,
    #[serde(default)]
    pub option2: String,
    #[serde(default)]
    pub option3: String,
}

/// Validated create-poll input produced by the form parser.
#[derive(Debug, Clone, PartialEq)]
pub struct CreatePollInput {
    pub question: String,
    pub options: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct VoteForm {
    pub option_id: Uuid,
}
