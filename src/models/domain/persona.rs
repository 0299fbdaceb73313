use serde::{Deserialize, Serialize};

use crate::constants::persona_prompts::{
    CONSULTANT_PROMPT, CONSULTANT_SUGGESTIONS, QUIZ_PROMPT, QUIZ_SUGGESTIONS, ROLEPLAY_PROMPT,
    ROLEPLAY_SUGGESTIONS,
};

/// Closed set of instruction profiles a conversation can run under.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Persona {
    Consultant,
    Quiz,
    Roleplay,
}

impl Persona {
    pub const ALL: [Persona; 3] = [Persona::Consultant, Persona::Quiz, Persona::Roleplay];

    /// Resolves a caller-supplied identifier. Accepts the display labels and
    /// the English variant names, ignoring case and surrounding whitespace.
    pub fn from_identifier(identifier: &str) -> Option<Self> {
        match identifier.trim().to_lowercase().as_str() {
            "consultor" | "consultant" => Some(Persona::Consultant),
            "quiz" => Some(Persona::Quiz),
            "roleplay" => Some(Persona::Roleplay),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Persona::Consultant => "Consultor",
            Persona::Quiz => "Quiz",
            Persona::Roleplay => "Roleplay",
        }
    }

    pub fn caption(&self) -> &'static str {
        match self {
            Persona::Consultant => "Resolva problemas",
            Persona::Quiz => "Teste seu conhecimento",
            Persona::Roleplay => "Simule cenários",
        }
    }

    /// Instruction template; contains the context placeholder exactly once.
    pub fn template(&self) -> &'static str {
        match self {
            Persona::Consultant => CONSULTANT_PROMPT,
            Persona::Quiz => QUIZ_PROMPT,
            Persona::Roleplay => ROLEPLAY_PROMPT,
        }
    }

    /// Quick-start `(label, prompt)` pairs for an empty conversation.
    pub fn suggestions(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            Persona::Consultant => &CONSULTANT_SUGGESTIONS,
            Persona::Quiz => &QUIZ_SUGGESTIONS,
            Persona::Roleplay => &ROLEPLAY_SUGGESTIONS,
        }
    }
}

impl std::fmt::Display for Persona {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
