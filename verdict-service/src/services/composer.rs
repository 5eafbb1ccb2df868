//! Prompt composition.
//!
//! Pure functions from intake data to the user payload sent upstream.
//! The persona templates travel separately as system instructions; the
//! composer only renders the caller's facts.

use crate::models::{IntakeRequest, Question};
use crate::personas::Persona;
use crate::services::providers::{ContentPart, UserContent};
use anyhow::anyhow;
use service_core::error::AppError;
use std::borrow::Cow;
use std::fmt::Write;

/// Self-reported experience keys mapped to natural-language phrases.
/// Unknown keys pass through verbatim so the composer never rejects an
/// enum value it hasn't seen.
const EXPERIENCE_PHRASES: &[(&str, &str)] = &[
    ("novice", "has never done anything like this before"),
    ("dabbler", "has tinkered with small jobs here and there"),
    ("confident", "is comfortable taking on serious projects"),
    ("pro", "does this kind of work professionally"),
];

const GOAL_PHRASES: &[(&str, &str)] = &[
    ("save_money", "keeping the cost down"),
    ("learn", "learning to handle it themselves"),
    ("speed", "getting it done as soon as possible"),
    ("quality", "a result that lasts"),
    ("closure", "a straight answer either way"),
];

fn phrase<'a>(table: &[(&str, &'static str)], key: &'a str) -> Cow<'a, str> {
    table
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, v)| Cow::Borrowed(*v))
        .unwrap_or(Cow::Borrowed(key))
}

/// Render the analysis-phase user payload. Image attachments come
/// first, in upload order, followed by one text block.
pub fn compose_analysis(persona: &Persona, intake: &IntakeRequest) -> UserContent {
    let mut text = String::new();

    if intake.subject.is_empty() {
        text.push_str("The situation is shown in the attached images.\n");
    } else {
        writeln!(text, "The situation: \"{}\"", intake.subject).ok();
    }

    if let Some(experience) = &intake.experience {
        writeln!(
            text,
            "They describe themselves as someone who {}.",
            phrase(EXPERIENCE_PHRASES, experience)
        )
        .ok();
    }

    if !intake.goals.is_empty() {
        let goals: Vec<Cow<'_, str>> = intake
            .goals
            .iter()
            .map(|g| phrase(GOAL_PHRASES, g))
            .collect();
        writeln!(text, "What matters to them: {}.", goals.join(", ")).ok();
    }

    if !intake.images.is_empty() {
        writeln!(
            text,
            "The {} attached image(s) show the situation first-hand.",
            intake.images.len()
        )
        .ok();
    }

    write!(
        text,
        "Size this up as {} and ask your 5 questions.",
        persona.display_name
    )
    .ok();

    if intake.images.is_empty() {
        UserContent::Text(text)
    } else {
        let mut parts: Vec<ContentPart> = intake
            .images
            .iter()
            .map(|img| ContentPart::Image {
                media_type: img.media_type.clone(),
                data: img.data.clone(),
            })
            .collect();
        parts.push(ContentPart::Text(text));
        UserContent::Parts(parts)
    }
}

/// Render the verdict-phase user prompt from the echoed questions and
/// the positional answers. Rejects empty or mismatched sequences; no
/// silent padding.
pub fn compose_verdict(
    persona: &Persona,
    subject: &str,
    questions: &[Question],
    answers: &[String],
) -> Result<String, AppError> {
    if questions.is_empty() || answers.is_empty() {
        return Err(AppError::InvalidInput(anyhow!(
            "questions and answers must both be present"
        )));
    }
    if questions.len() != answers.len() {
        return Err(AppError::InvalidInput(anyhow!(
            "got {} answers for {} questions",
            answers.len(),
            questions.len()
        )));
    }

    let transcript = questions
        .iter()
        .zip(answers)
        .map(|(question, answer)| format!("Q: {}\nA: {}", question.q, answer))
        .collect::<Vec<_>>()
        .join("\n\n");

    Ok(format!(
        "The situation: \"{subject}\"\n\n\
         You asked {} questions as {}. Here's exactly what they said:\n{transcript}\n\n\
         Give your verdict.",
        questions.len(),
        persona.display_name,
    ))
}
