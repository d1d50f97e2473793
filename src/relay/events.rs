// SSE frames emitted by the rewrite stream

use serde_json::json;

/// One frame of the rewrite event stream.
///
/// A well-formed stream is zero or more `Chunk` events followed by exactly
/// one `Done` or `Error`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent {
    Chunk { text: String },
    Done,
    Error { message: String },
}

impl StreamEvent {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, StreamEvent::Chunk { .. })
    }

    /// Format as Server-Sent Event
    pub fn to_sse(&self) -> String {
        let data = match self {
            StreamEvent::Chunk { text } => json!({ "text": text }).to_string(),
            StreamEvent::Done => "[DONE]".to_string(),
            StreamEvent::Error { message } => json!({ "error": message }).to_string(),
        };

        format!("data: {}\n\n", data)
    }
}
