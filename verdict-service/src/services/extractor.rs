//! Response extraction.
//!
//! Models wrap their JSON in prose, markdown fences, or nothing at
//! all, depending on mood. Recovery is two-stage: strip every fence
//! marker, then take the outermost `{...}` span and parse it. Anything
//! that survives parsing is still validated against the phase schema;
//! there is no fallback to a partial or default object.

use crate::models::{AnalysisResult, VerdictResult, QUESTION_COUNT};
use crate::personas::{Persona, QuestionStyle};
use thiserror::Error;

use service_core::error::AppError;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("completion contains no JSON object")]
    NoJsonObject,

    #[error("completion is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("schema violation: {0}")]
    Schema(String),
}

/// Remove every triple-backtick fence marker, including a language tag
/// glued to the opening fence (```json, ```JSON, ...). The fenced
/// content itself is kept. A tag is only recognized when the run ends
/// at a line break; prose glued to a closing fence stays intact.
fn strip_fences(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(pos) = rest.find("```") {
        out.push_str(&rest[..pos]);
        rest = &rest[pos + 3..];
        let tag_len: usize = rest
            .chars()
            .take_while(|c| c.is_ascii_alphanumeric())
            .map(char::len_utf8)
            .sum();
        if tag_len > 0 && matches!(rest[tag_len..].chars().next(), Some('\n' | '\r')) {
            rest = &rest[tag_len..];
        }
    }
    out.push_str(rest);
    out
}

/// Recover the JSON object embedded in a free-form completion.
pub fn extract_json(text: &str) -> Result<serde_json::Value, ExtractError> {
    let stripped = strip_fences(text);
    let start = stripped.find('{').ok_or(ExtractError::NoJsonObject)?;
    let end = stripped.rfind('}').ok_or(ExtractError::NoJsonObject)?;
    if end < start {
        return Err(ExtractError::NoJsonObject);
    }
    Ok(serde_json::from_str(&stripped[start..=end])?)
}

/// Parse and validate an analysis-phase completion.
pub fn parse_analysis(raw: &str, persona: &Persona) -> Result<AnalysisResult, AppError> {
    let value = extract_json(raw).map_err(|e| malformed(raw, &e))?;
    let analysis: AnalysisResult = serde_json::from_value(value)
        .map_err(|e| malformed(raw, &ExtractError::InvalidJson(e)))?;
    validate_analysis(&analysis, persona).map_err(|e| malformed(raw, &e))?;
    Ok(analysis)
}

/// Parse and validate a verdict-phase completion.
pub fn parse_verdict(raw: &str, persona: &Persona) -> Result<VerdictResult, AppError> {
    let value = extract_json(raw).map_err(|e| malformed(raw, &e))?;
    let verdict: VerdictResult = serde_json::from_value(value)
        .map_err(|e| malformed(raw, &ExtractError::InvalidJson(e)))?;
    if !persona.verdict_labels.contains(&verdict.verdict.as_str()) {
        return Err(malformed(
            raw,
            &ExtractError::Schema(format!(
                "verdict '{}' is not one of {:?}",
                verdict.verdict, persona.verdict_labels
            )),
        ));
    }
    Ok(verdict)
}

fn validate_analysis(analysis: &AnalysisResult, persona: &Persona) -> Result<(), ExtractError> {
    if analysis.questions.len() != QUESTION_COUNT {
        return Err(ExtractError::Schema(format!(
            "expected {} questions, got {}",
            QUESTION_COUNT,
            analysis.questions.len()
        )));
    }

    for (index, question) in analysis.questions.iter().enumerate() {
        if question.q.trim().is_empty() {
            return Err(ExtractError::Schema(format!(
                "question {index} has empty text"
            )));
        }
        match persona.question_style {
            QuestionStyle::YesNo => {
                if question.options.as_ref().is_some_and(|o| !o.is_empty()) {
                    return Err(ExtractError::Schema(format!(
                        "question {index} carries options for a yes/no persona"
                    )));
                }
            }
            QuestionStyle::MultipleChoice { choices } => {
                let count = question.options.as_ref().map_or(0, Vec::len);
                if count != choices {
                    return Err(ExtractError::Schema(format!(
                        "question {index} has {count} options, expected {choices}"
                    )));
                }
            }
        }
    }
    Ok(())
}

/// Log the raw completion for diagnosis; the client only ever sees a
/// generic parse-failure message.
fn malformed(raw: &str, err: &ExtractError) -> AppError {
    let snippet: String = raw.chars().take(400).collect();
    tracing::warn!(error = %err, raw = %snippet, "failed to parse model completion");
    AppError::MalformedResponse(err.to_string())
}
