//! Prompt text for meeting summarization.

/// System persona sent with every summarization request.
pub const SYSTEM_PROMPT: &str = "You are a precise meeting notes summarizer. \
Produce clear, structured notes with headings, bullet points, and an Action Items section. \
Keep names, dates, decisions, and blockers. Be concise and faithful to the transcript.";

/// Instruction used when the caller leaves the custom prompt blank.
pub const DEFAULT_INSTRUCTION: &str = "Summarize the meeting clearly.";

/// Build the user-role message from a transcript and an optional instruction.
pub fn build_user_prompt(transcript: &str, custom_prompt: &str) -> String {
    let instruction = match custom_prompt.trim() {
        "" => DEFAULT_INSTRUCTION,
        trimmed => trimmed,
    };
    format!(
        "Custom instruction: {}\n\nTranscript:\n{}",
        instruction,
        transcript.trim()
    )
}
