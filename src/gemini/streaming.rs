// Gemini API streaming client

use super::{ApiErrorEnvelope, GenerateContentResponse};
use crate::error::{ProxyError, Result};
use futures::stream::Stream;
use reqwest::Client;
use std::pin::Pin;
use tracing::{debug, warn};

pub type ResponseStream = Pin<Box<dyn Stream<Item = Result<GenerateContentResponse>> + Send>>;

/// Open a Gemini SSE stream
pub async fn stream_generate_content(
    client: &Client,
    url: String,
    api_key: &str,
    request_body: String,
) -> Result<ResponseStream> {
    debug!("Starting Gemini SSE stream to: {}", url);

    // Make streaming request
    let response = client
        .post(&url)
        .header("x-goog-api-key", api_key)
        .header("Content-Type", "application/json")
        .header("Accept", "text/event-stream")
        .body(request_body)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let error_text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ApiErrorEnvelope>(&error_text)
            .map(|envelope| envelope.error.describe())
            .unwrap_or(error_text);
        return Err(ProxyError::GeminiApi(format!("HTTP {}: {}", status, message)));
    }

    // Convert response to byte stream
    let byte_stream = response.bytes_stream();

    Ok(Box::pin(parse_sse_stream(byte_stream)))
}

/// Parse SSE byte stream into GenerateContentResponse chunks
///
/// The stream ends after the first error it yields.
pub fn parse_sse_stream<S, E>(byte_stream: S) -> impl Stream<Item = Result<GenerateContentResponse>> + Send
where
    S: Stream<Item = std::result::Result<bytes::Bytes, E>> + Send + 'static,
    E: Into<ProxyError> + Send + 'static,
{
    use futures::StreamExt;

    async_stream::stream! {
        // Raw bytes: a multi-byte character may straddle two network chunks
        let mut buffer: Vec<u8> = Vec::new();

        futures::pin_mut!(byte_stream);

        while let Some(chunk_result) = byte_stream.next().await {
            match chunk_result {
                Ok(chunk) => {
                    debug!("Received chunk: {} bytes", chunk.len());
                    // Google frames events with CRLF; drop CR so "\n\n" always delimits
                    buffer.extend(chunk.iter().copied().filter(|&b| b != b'\r'));

                    // Process complete events (ends with \n\n)
                    while let Some(event_end) = find_event_end(&buffer) {
                        let event_bytes: Vec<u8> = buffer.drain(..event_end + 2).collect();
                        let event_data = String::from_utf8_lossy(&event_bytes[..event_end]);

                        match parse_sse_event(&event_data) {
                            Some(Ok(response)) => yield Ok(response),
                            Some(Err(e)) => {
                                yield Err(e);
                                return;
                            }
                            None => debug!("Skipping SSE event without payload"),
                        }
                    }
                }
                Err(e) => {
                    let err: ProxyError = e.into();
                    warn!("Stream error: {}", err);
                    yield Err(err);
                    return;
                }
            }
        }

        // This handles cases where the final event doesn't have a trailing \n\n
        let remaining = String::from_utf8_lossy(&buffer).to_string();
        if !remaining.trim().is_empty() {
            debug!("Processing remaining buffer: {} chars", remaining.len());
            if let Some(result) = parse_sse_event(&remaining) {
                yield result;
            }
        }

        debug!("Gemini SSE stream ended");
    }
}

fn find_event_end(buffer: &[u8]) -> Option<usize> {
    buffer.windows(2).position(|w| w == b"\n\n")
}

/// Parse a single SSE event
///
/// Returns `None` for events without a payload, `Some(Err(_))` when the event
/// is not valid JSON, carries an API error, or reports a blocked prompt or
/// a response cut off by a safety filter.
fn parse_sse_event(event_data: &str) -> Option<Result<GenerateContentResponse>> {
    // SSE format: "event: <name>\ndata: <json>" or just "data: <json>"; data may span lines
    let data = event_data
        .lines()
        .filter_map(|line| line.strip_prefix("data:"))
        .map(|d| d.strip_prefix(' ').unwrap_or(d))
        .collect::<Vec<_>>()
        .join("\n");

    let data = data.trim();
    if data.is_empty() || data == "[DONE]" {
        return None;
    }

    let parsed: serde_json::Value = match serde_json::from_str(data) {
        Ok(v) => v,
        Err(e) => {
            warn!("Failed to parse SSE JSON: {}", e);
            debug!("Raw data: {}", data.chars().take(200).collect::<String>());
            return Some(Err(ProxyError::GeminiApi(format!("Invalid stream event: {}", e))));
        }
    };

    if parsed.get("error").is_some() {
        let message = serde_json::from_value::<ApiErrorEnvelope>(parsed)
            .map(|envelope| envelope.error.describe())
            .unwrap_or_else(|_| "malformed error event".to_string());
        warn!("Gemini reported an error mid-stream: {}", message);
        return Some(Err(ProxyError::GeminiApi(message)));
    }

    let response = match serde_json::from_value::<GenerateContentResponse>(parsed) {
        Ok(response) => response,
        Err(e) => {
            warn!("Failed to convert to GenerateContentResponse: {}", e);
            return Some(Err(ProxyError::GeminiApi(format!("Invalid stream event: {}", e))));
        }
    };

    if let Some(reason) = response.block_reason() {
        return Some(Err(ProxyError::GeminiApi(format!("Prompt blocked: {}", reason))));
    }
    if let Some(reason) = response.blocked_finish_reason() {
        warn!("Gemini stopped the response: {}", reason);
        return Some(Err(ProxyError::GeminiApi(format!("Response blocked: {}", reason))));
    }

    Some(Ok(response))
}
