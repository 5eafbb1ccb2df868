use serde::{Deserialize, Serialize};

/// Every persona asks exactly this many diagnostic questions.
pub const QUESTION_COUNT: usize = 5;

/// One question from the analysis phase. Yes/no personas omit
/// `options`; multiple-choice personas carry exactly four choices.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Question {
    pub q: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
}

/// First-phase result: the model's read on the situation plus the five
/// questions it wants answered. Stateless server side; the client
/// holds it and echoes the questions back in the verdict phase.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub situation_type: String,
    pub observations: Vec<String>,
    pub first_take: String,
    pub questions: Vec<Question>,
}

/// Second-phase result. `verdict` is validated against the persona's
/// closed label set before this struct ever reaches the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerdictResult {
    pub verdict: String,
    pub headline: String,
    pub reasoning: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub positives: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub negatives: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources: Option<String>,
    pub final_word: String,
}

/// User-supplied intake for the analysis phase, assembled from the
/// multipart form. Dropped as soon as the response is sent.
#[derive(Debug, Clone, Default)]
pub struct IntakeRequest {
    pub subject: String,
    pub experience: Option<String>,
    pub goals: Vec<String>,
    pub images: Vec<ImageAttachment>,
}

#[derive(Debug, Clone)]
pub struct ImageAttachment {
    pub media_type: String,
    pub data: Vec<u8>,
}
