// Prompt prefix resolution

use crate::config::GeminiConfig;
use std::path::PathBuf;
use tracing::warn;

/// Source of the text prepended to every rewrite request.
///
/// An inline prefix (config or `GEMINI_PROMPT_BASE`) wins when non-empty;
/// otherwise the prompt file is read on every call, so edits apply without a
/// restart. A missing file yields an empty prefix.
#[derive(Debug, Clone)]
pub struct PromptSource {
    inline: Option<String>,
    file: PathBuf,
}

impl PromptSource {
    pub fn new(inline: Option<String>, file: impl Into<PathBuf>) -> Self {
        Self {
            inline: inline.filter(|p| !p.is_empty()),
            file: file.into(),
        }
    }

    pub fn from_config(config: &GeminiConfig) -> Self {
        Self::new(config.prompt_base.clone(), &config.prompt_file)
    }

    pub fn prefix(&self) -> String {
        if let Some(inline) = &self.inline {
            return inline.clone();
        }

        match std::fs::read_to_string(&self.file) {
            Ok(contents) => contents.trim().to_string(),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
            Err(e) => {
                warn!("Error reading {}: {}", self.file.display(), e);
                String::new()
            }
        }
    }

    /// Full prompt: prefix and user text joined verbatim, without a delimiter.
    pub fn build(&self, user_text: &str) -> String {
        let mut prompt = self.prefix();
        prompt.push_str(user_text);
        prompt
    }
}
