use crate::dtos::ApiResponse;
use crate::models::{ImageAttachment, IntakeRequest};
use crate::personas::{self, Persona};
use crate::services::providers::CompletionRequest;
use crate::services::{composer, extractor};
use crate::startup::AppState;
use axum::{
    Json,
    extract::{Multipart, Path, State},
    response::IntoResponse,
};
use service_core::error::AppError;

pub fn resolve_persona(slug: &str) -> Result<&'static Persona, AppError> {
    personas::lookup(slug)
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("unknown persona: {slug}")))
}

/// First phase: take the multipart intake, compose the analysis prompt,
/// make one model round trip, and relay the parsed result.
pub async fn analyze(
    State(state): State<AppState>,
    Path(persona_slug): Path<String>,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let persona = resolve_persona(&persona_slug)?;
    let intake = read_intake(multipart, persona, state.config.uploads.max_image_bytes).await?;

    if intake.subject.is_empty() && intake.images.is_empty() {
        return Err(AppError::InvalidInput(anyhow::anyhow!(
            "a subject description or at least one image is required"
        )));
    }

    tracing::info!(
        persona = persona.slug,
        subject_len = intake.subject.len(),
        images = intake.images.len(),
        "analyze request"
    );

    let completion = state
        .provider
        .complete(CompletionRequest {
            model: state.config.anthropic.analyze_model.clone(),
            system: persona.analysis_system.to_string(),
            user_content: composer::compose_analysis(persona, &intake),
            max_tokens: persona.analyze_max_tokens,
        })
        .await?;

    let analysis = extractor::parse_analysis(&completion, persona)?;
    Ok(Json(ApiResponse::ok(analysis)))
}

/// Drain the multipart form into an in-memory intake. Attachment count
/// and per-file size are bounded here, before composition; field data
/// lives only for this request.
async fn read_intake(
    mut multipart: Multipart,
    persona: &Persona,
    max_image_bytes: usize,
) -> Result<IntakeRequest, AppError> {
    let mut intake = IntakeRequest::default();

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        AppError::InvalidInput(anyhow::anyhow!("failed to read multipart field: {e}"))
    })? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "subject" => {
                intake.subject = read_text(field).await?.trim().to_string();
            }
            "experience" => {
                intake.experience = Some(read_text(field).await?);
            }
            "goal" => {
                intake.goals.push(read_text(field).await?);
            }
            "image" => {
                if intake.images.len() >= persona.max_images {
                    return Err(AppError::InvalidInput(anyhow::anyhow!(
                        "too many images (max {})",
                        persona.max_images
                    )));
                }
                let media_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| {
                        AppError::InvalidInput(anyhow::anyhow!("failed to read image: {e}"))
                    })?
                    .to_vec();
                if data.len() > max_image_bytes {
                    return Err(AppError::InvalidInput(anyhow::anyhow!(
                        "image exceeds the {} byte limit",
                        max_image_bytes
                    )));
                }
                intake.images.push(ImageAttachment { media_type, data });
            }
            other => {
                tracing::debug!(field = %other, "ignoring unknown multipart field");
            }
        }
    }

    Ok(intake)
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|e| AppError::InvalidInput(anyhow::anyhow!("failed to read text field: {e}")))
}
