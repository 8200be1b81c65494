/// Phrases commonly used to override system instructions.
/// Matched case-insensitively anywhere in the input.
const FORBIDDEN_PHRASES: [&str; 5] = [
    "ignore previous instructions",
    "ignore all previous instructions",
    "system prompt",
    "you are now",
    "override",
];

/// Outcome of the input safety check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SafetyVerdict {
    Safe,
    Unsafe(String),
}

impl SafetyVerdict {
    pub fn is_safe(&self) -> bool {
        matches!(self, Self::Safe)
    }
}

/// Length and prompt injection heuristics, applied by the orchestration
/// layer before a query reaches the corpus. Never invoked by the core
/// pipelines themselves.
pub fn check_input(text: &str, max_length: usize) -> SafetyVerdict {
    if text.is_empty() {
        return SafetyVerdict::Unsafe("Input is empty.".to_string());
    }

    if text.chars().count() > max_length {
        return SafetyVerdict::Unsafe(format!(
            "Input exceeds maximum length of {max_length} characters."
        ));
    }

    let lower = text.to_lowercase();
    for phrase in FORBIDDEN_PHRASES {
        if lower.contains(phrase) {
            return SafetyVerdict::Unsafe(format!(
                "Potential safety violation detected: '{phrase}'"
            ));
        }
    }

    SafetyVerdict::Safe
}
