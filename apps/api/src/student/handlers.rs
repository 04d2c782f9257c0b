use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;
use crate::student::intake::{IntakeReply, IntakeSession, IntakeStage, UploadKind};
use crate::student::transcript::{
    analyze_transcript, clean_letter_text, summarize_cv, TranscriptAnalysis,
};

#[derive(Serialize)]
pub struct StartIntakeResponse {
    pub student_id: Uuid,
    pub stage: IntakeStage,
    pub message: String,
}

/// Either a ready-made `summary` or raw document `text` to be processed.
#[derive(Deserialize)]
pub struct UploadRequest {
    pub kind: UploadKind,
    pub summary: Option<String>,
    pub text: Option<String>,
}

#[derive(Deserialize)]
pub struct AnswerRequest {
    pub text: String,
}

enum ProcessedUpload {
    Summary(UploadKind, String),
    Transcript(TranscriptAnalysis),
}

fn session_not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Intake session {id} not found"))
}

/// POST /api/v1/intake
pub async fn handle_start_intake(State(state): State<AppState>) -> Json<StartIntakeResponse> {
    let session = IntakeSession::new(Uuid::new_v4());
    let response = StartIntakeResponse {
        student_id: session.student_id,
        stage: session.stage,
        message: session.question(),
    };
    state
        .intake_sessions
        .lock()
        .await
        .insert(session.student_id, session);
    info!("Started intake session {}", response.student_id);
    Json(response)
}

/// POST /api/v1/intake/:id/uploads
pub async fn handle_upload(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UploadRequest>,
) -> Result<Json<IntakeReply>, AppError> {
    if !state.intake_sessions.lock().await.contains_key(&id) {
        return Err(session_not_found(id));
    }

    // Document processing talks to the LLM, so it runs without holding the session lock.
    let summary = req.summary.filter(|s| !s.trim().is_empty());
    let text = req.text.filter(|t| !t.trim().is_empty());
    let processed = match (summary, text, req.kind) {
        (Some(summary), _, kind) => ProcessedUpload::Summary(kind, summary.trim().to_string()),
        (None, Some(text), UploadKind::Cv) => {
            ProcessedUpload::Summary(UploadKind::Cv, summarize_cv(state.llm.as_ref(), &text).await?)
        }
        (None, Some(text), UploadKind::Transcript) => {
            ProcessedUpload::Transcript(analyze_transcript(state.llm.as_ref(), &text).await?)
        }
        (None, Some(text), UploadKind::MotivationLetter) => {
            ProcessedUpload::Summary(UploadKind::MotivationLetter, clean_letter_text(&text))
        }
        (None, None, _) => {
            return Err(AppError::Validation(
                "Upload needs either 'summary' or 'text'".into(),
            ))
        }
    };

    let mut sessions = state.intake_sessions.lock().await;
    let session = sessions.get_mut(&id).ok_or_else(|| session_not_found(id))?;
    let reply = match processed {
        ProcessedUpload::Summary(kind, summary) => session.record_upload(kind, summary)?,
        ProcessedUpload::Transcript(analysis) => session.record_transcript(analysis)?,
    };
    Ok(Json(reply))
}

/// POST /api/v1/intake/:id/answers
///
/// Persists the profile into the student directory once the student confirms,
/// then closes the session. A failed save leaves the session open and
/// unconfirmed.
pub async fn handle_answer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<AnswerRequest>,
) -> Result<Json<IntakeReply>, AppError> {
    let (reply, confirmed_session) = {
        let mut sessions = state.intake_sessions.lock().await;
        let session = sessions.get_mut(&id).ok_or_else(|| session_not_found(id))?;
        let reply = session.answer(&req.text)?;
        let confirmed = reply.confirmed.then(|| session.clone());
        (reply, confirmed)
    };

    if let Some(session) = confirmed_session {
        let student_dir = state.config.student_data_dir.join(id.to_string());
        if let Err(e) = session.persist(&student_dir).await {
            warn!("Could not save profile for intake session {id}: {e}");
            if let Some(open) = state.intake_sessions.lock().await.get_mut(&id) {
                open.reopen();
            }
            return Err(e.into());
        }
        state.intake_sessions.lock().await.remove(&id);
        info!("Closed intake session {id}");
    }

    Ok(Json(reply))
}
