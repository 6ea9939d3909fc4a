//! Broadcast scripts and the prompt that produces them.

/// Hard input ceiling of the speech service, in characters.
pub const SYNTHESIS_CHAR_LIMIT: usize = 4096;

/// Script length the prompt asks for, in characters.
pub const TARGET_SCRIPT_CHARS: usize = 1500;

/// Natural-language script returned by the generation service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BroadcastScript(String);

impl BroadcastScript {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn char_count(&self) -> usize {
        self.0.chars().count()
    }

    /// The part of the script that is sent to synthesis.
    ///
    /// Anything past [`SYNTHESIS_CHAR_LIMIT`] characters is dropped.
    pub fn synthesis_input(&self) -> &str {
        truncate_chars(&self.0, SYNTHESIS_CHAR_LIMIT)
    }

    /// Whether [`Self::synthesis_input`] drops part of the script.
    pub fn is_truncated(&self) -> bool {
        self.synthesis_input().len() < self.0.len()
    }
}

/// Longest prefix of `text` holding at most `max_chars` characters.
///
/// Counts Unicode scalar values and never splits one.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

/// Fill the anchor prompt template with a rendered digest.
pub fn render_prompt(digest: &str) -> String {
    format!(
        r#"
You are a professional news anchor for a podcast called 'World News 20min'.
Based on the following news summaries, write a professional news broadcast script in Traditional Chinese (Mandarin).

Requirements:
- Tone: Professional, neutral, broadcast style (like CCTV or BBC).
- Structure:
  1. Intro ("欢迎收听20分钟世界新闻...");
  2. Detailed news reporting;
  3. Outro ("感谢收听，明天见。").
- Content: Summarize the key points clearly.
- Length: Approximately {TARGET_SCRIPT_CHARS} Chinese characters.
- Format: Plain text only. No markdown formatting.

News Data:
{digest}
"#
    )
}
