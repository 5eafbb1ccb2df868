use crate::dtos::{ApiResponse, VerdictRequest};
use crate::services::providers::{CompletionRequest, UserContent};
use crate::services::{composer, extractor};
use crate::startup::AppState;
use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use service_core::error::AppError;
use validator::Validate;

use super::analyze::resolve_persona;

/// Second phase: render the echoed questions and the answer set into
/// the verdict prompt, make one model round trip, and relay the parsed
/// verdict.
pub async fn verdict(
    State(state): State<AppState>,
    Path(persona_slug): Path<String>,
    Json(request): Json<VerdictRequest>,
) -> Result<impl IntoResponse, AppError> {
    let persona = resolve_persona(&persona_slug)?;
    request.validate()?;

    let prompt = composer::compose_verdict(
        persona,
        &request.subject,
        &request.questions,
        &request.answers,
    )?;

    tracing::info!(
        persona = persona.slug,
        questions = request.questions.len(),
        "verdict request"
    );

    let completion = state
        .provider
        .complete(CompletionRequest {
            model: state.config.anthropic.verdict_model.clone(),
            system: persona.verdict_system.to_string(),
            user_content: UserContent::Text(prompt),
            max_tokens: persona.verdict_max_tokens,
        })
        .await?;

    let verdict = extractor::parse_verdict(&completion, persona)?;
    Ok(Json(ApiResponse::ok(verdict)))
}
