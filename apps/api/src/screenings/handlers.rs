use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::errors::{AppError, INVALID_SCREENING_ID};
use crate::llm_client::ChatMessage;
use crate::screenings::models::Screening;
use crate::screenings::prompts::build_screening_prompt;
use crate::screenings::store::{self, NewScreening};
use crate::state::AppState;

/// Upper bound on the debug listing.
const RECENT_LIMIT: i64 = 20;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateScreeningRequest {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub job_title: Option<String>,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub job_description: Option<String>,
    #[serde(default)]
    pub candidate_name: Option<String>,
    #[serde(default)]
    pub candidate_email: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RespondRequest {
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize)]
pub struct RespondResponse {
    pub reply: ChatMessage,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartScreeningRequest {
    #[serde(default)]
    pub candidate_name: Option<String>,
    #[serde(default)]
    pub candidate_email: Option<String>,
}

/// POST /screening
///
/// Derives the system prompt from the job fields and persists the record.
/// The prompt is immutable from here on.
pub async fn handle_create_screening(
    State(state): State<AppState>,
    Json(req): Json<CreateScreeningRequest>,
) -> Result<Json<Value>, AppError> {
    let id = require_field(req.id.as_deref(), "id")?;
    let job_title = require_field(req.job_title.as_deref(), "jobTitle")?;
    let company_name = require_field(req.company_name.as_deref(), "companyName")?;
    let job_description = require_field(req.job_description.as_deref(), "jobDescription")?;

    let prompt = build_screening_prompt(job_title, company_name, job_description);

    store::create(
        &state.db,
        NewScreening {
            id,
            prompt: &prompt,
            job_title,
            company_name,
            job_description,
            candidate_name: req.candidate_name.as_deref(),
            candidate_email: req.candidate_email.as_deref(),
        },
    )
    .await?;

    Ok(Json(json!({ "success": true })))
}

/// GET /screening/:id
pub async fn handle_get_screening(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let screening = store::get(&state.db, &id)
        .await?
        .ok_or_else(|| AppError::NotFound(INVALID_SCREENING_ID.to_string()))?;

    Ok(Json(json!({ "prompt": screening.prompt })))
}

/// POST /screening/:id/respond
///
/// Relays the caller-supplied history, prefixed with the stored prompt, to
/// the model and returns its reply. The relay is never invoked for an
/// unknown id.
pub async fn handle_respond(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<RespondRequest>,
) -> Result<Json<RespondResponse>, AppError> {
    let screening = store::get(&state.db, &id)
        .await?
        .ok_or_else(|| AppError::NotFound(INVALID_SCREENING_ID.to_string()))?;

    let reply = state.llm.respond(&screening.prompt, &req.messages).await?;

    Ok(Json(RespondResponse { reply }))
}

/// POST /screening/:id/start
///
/// Records candidate identity once an interview begins. Overwrites any
/// previously stored candidate fields; the prompt is unaffected.
pub async fn handle_start_screening(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<StartScreeningRequest>,
) -> Result<Json<Value>, AppError> {
    let candidate_name = require_field(req.candidate_name.as_deref(), "candidateName")?;
    let candidate_email = require_field(req.candidate_email.as_deref(), "candidateEmail")?;

    store::update_candidate_info(&state.db, &id, candidate_name, candidate_email).await?;

    Ok(Json(json!({ "success": true })))
}

/// GET /debug/screenings
///
/// Bounded listing of the newest records, full rows included. Deliberately
/// unauthenticated, matching the service's trust model.
pub async fn handle_debug_screenings(
    State(state): State<AppState>,
) -> Result<Json<Vec<Screening>>, AppError> {
    let screenings = store::list_recent(&state.db, RECENT_LIMIT).await?;
    Ok(Json(screenings))
}

/// Presence check for a required body field. Rejects absent, empty and
/// whitespace-only values before any side effect.
fn require_field<'a>(value: Option<&'a str>, name: &str) -> Result<&'a str, AppError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(AppError::Validation(format!(
            "Missing required field: {name}"
        ))),
    }
}
