// Question detection for the response stage.

/// Markers that usually open or appear in an interview question.
const QUESTION_MARKERS: &[&str] = &[
    "?", "what", "how", "why", "when", "where", "who", "can you", "tell me", "describe", "explain",
];

/// Heuristic check for question-like utterances.
///
/// Approximate: matches common question words, a question mark, or any
/// utterance long enough to be a prompt. Replace this with a classifier
/// if the keyword list misfires too often.
pub fn is_question(text: &str) -> bool {
    let lowered = text.to_lowercase();
    QUESTION_MARKERS.iter().any(|marker| lowered.contains(marker)) || text.len() > 20
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_question_words() {
        assert!(is_question("What is your greatest strength?"));
        assert!(is_question("Tell me about yourself"));
        assert!(is_question("Describe your last project"));
        assert!(is_question("can you walk through your resume"));
    }

    #[test]
    fn test_detects_question_mark_alone() {
        assert!(is_question("Really?"));
    }

    #[test]
    fn test_long_statements_pass_as_prompts() {
        assert!(is_question("I'd like your thoughts on our stack"));
    }

    #[test]
    fn test_short_fillers_are_not_questions() {
        assert!(!is_question("ok"));
        assert!(!is_question("yes"));
        assert!(!is_question(""));
    }

    #[test]
    fn test_case_insensitive() {
        assert!(is_question("WHY this company"));
    }
}
