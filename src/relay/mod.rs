//! Streaming relay from the Gemini API to a Server-Sent-Events response.
//!
//! # Components
//!
//! - `events`: the `StreamEvent` frame type and its SSE encoding.
//! - `prompt`: resolution of the prompt prefix and prompt construction.
//! - `stream`: the relay loop turning an upstream text stream into events.

mod events;
mod prompt;
mod stream;

pub use events::StreamEvent;
pub use prompt::PromptSource;
pub use stream::{relay_events, sse_frames};
