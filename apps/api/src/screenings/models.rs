use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// A stored interview configuration: the system prompt sent to the model
/// plus the job and candidate metadata it was derived from.
///
/// `id` and `prompt` are immutable after creation; the candidate fields may
/// be overwritten once an interview begins. Rows are never deleted.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Screening {
    pub id: String,
    pub prompt: String,
    pub job_title: Option<String>,
    pub company_name: Option<String>,
    pub job_description: Option<String>,
    pub candidate_name: Option<String>,
    pub candidate_email: Option<String>,
    pub created_at: DateTime<Utc>,
}
