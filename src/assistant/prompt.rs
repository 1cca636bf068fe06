// Prompt assembly for answer generation. The wording here is load-bearing:
// the display layer and downstream consumers expect the sectioned
// **Main Answer** / **Key Points** / **Example/Experience** structure.

use crate::model::TranscriptEntry;

/// System instruction sent with every generation request.
pub const SYSTEM_INSTRUCTION: &str = "\
You are an expert interview copilot assistant. Your role is to help the interviewee answer questions professionally and effectively.

When given an interview question, provide:
1. A clear, concise, and professional answer
2. Key points to emphasize
3. Examples or experiences to mention if relevant

Keep responses natural, authentic, and appropriate for a professional interview setting.
Format your response to be easy to read quickly during an interview.

Structure your response as:
**Main Answer:** [Direct response to the question]
**Key Points:** [2-3 bullet points of important aspects to mention]
**Example/Experience:** [If relevant, suggest a brief example to share]";

/// Renders recent conversation turns, oldest first, one line per turn.
pub fn build_context(entries: &[TranscriptEntry]) -> String {
    let mut context = String::from("Recent interview conversation:\n");
    for entry in entries {
        context.push_str(&format!("{}: {}\n", entry.speaker, entry.text));
    }
    context
}

/// Full user prompt: context block, the current question, and the ask.
pub fn build_prompt(entries: &[TranscriptEntry], question: &str) -> String {
    format!(
        "{}\n\nCurrent Question: {}\n\nPlease provide a professional interview response:",
        build_context(entries),
        question
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SpeakerRole;

    #[test]
    fn test_context_lists_turns_oldest_first() {
        let entries = vec![
            TranscriptEntry::new("s1", SpeakerRole::Interviewer, "Tell me about yourself."),
            TranscriptEntry::new("s1", SpeakerRole::Candidate, "I build backend services."),
        ];

        let context = build_context(&entries);
        assert!(context.starts_with("Recent interview conversation:\n"));

        let interviewer_pos = context.find("interviewer: Tell me about yourself.").unwrap();
        let candidate_pos = context.find("candidate: I build backend services.").unwrap();
        assert!(interviewer_pos < candidate_pos);
    }

    #[test]
    fn test_prompt_contains_question_and_ask() {
        let entries = vec![TranscriptEntry::new(
            "s1",
            SpeakerRole::Interviewer,
            "Tell me about yourself.",
        )];

        let prompt = build_prompt(&entries, "Describe a challenge you overcame.");
        assert!(prompt.contains("Current Question: Describe a challenge you overcame."));
        assert!(prompt.ends_with("Please provide a professional interview response:"));
    }

    #[test]
    fn test_prompt_with_empty_context() {
        let prompt = build_prompt(&[], "Why do you want this role?");
        assert!(prompt.starts_with("Recent interview conversation:\n"));
        assert!(prompt.contains("Current Question: Why do you want this role?"));
    }
}
