//! Persona descriptors.
//!
//! Each product variant is one immutable descriptor: fixed system
//! instruction templates, the question style, the closed verdict label
//! set, and per-phase bounds. The handlers are generic over these, so
//! adding a persona means adding a descriptor, not new routes.

pub mod handyman;
pub mod wingman;

/// How the persona's five questions are answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionStyle {
    /// Strict yes/no questions; no option list.
    YesNo,
    /// Each question carries exactly this many free-text choices.
    MultipleChoice { choices: usize },
}

#[derive(Debug)]
pub struct Persona {
    pub slug: &'static str,
    pub display_name: &'static str,
    /// System instructions for the analysis phase.
    pub analysis_system: &'static str,
    /// System instructions for the verdict phase.
    pub verdict_system: &'static str,
    pub question_style: QuestionStyle,
    /// Closed set of acceptable `verdict` values. Anything else from
    /// the model is a parse failure.
    pub verdict_labels: &'static [&'static str],
    pub max_images: usize,
    pub analyze_max_tokens: u32,
    pub verdict_max_tokens: u32,
}

pub static ALL: &[&Persona] = &[&handyman::PERSONA, &wingman::PERSONA];

pub fn lookup(slug: &str) -> Option<&'static Persona> {
    ALL.iter().copied().find(|p| p.slug == slug)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_resolves_both_personas() {
        assert_eq!(lookup("handyman").unwrap().slug, "handyman");
        assert_eq!(lookup("wingman").unwrap().slug, "wingman");
        assert!(lookup("plumber").is_none());
    }

    #[test]
    fn wingman_questions_carry_four_choices() {
        assert_eq!(
            wingman::PERSONA.question_style,
            QuestionStyle::MultipleChoice { choices: 4 }
        );
    }

    #[test]
    fn verdict_label_sets_are_closed_and_nonempty() {
        for persona in ALL {
            assert!(!persona.verdict_labels.is_empty(), "{}", persona.slug);
        }
        assert_eq!(handyman::PERSONA.verdict_labels, ["DIY", "PRO"]);
        assert_eq!(wingman::PERSONA.verdict_labels.len(), 5);
    }
}
