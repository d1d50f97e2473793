// Upstream text stream to SSE event relay

use super::StreamEvent;
use crate::error::{ProxyError, Result};
use futures::{Stream, StreamExt};
use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

/// Relay an upstream text stream as [`StreamEvent`]s.
///
/// `upstream` opens the provider call; it is only polled once the returned
/// stream is, so a failure to connect still surfaces as a terminal `Error`
/// event. Every upstream item becomes one `Chunk`; completion becomes `Done`;
/// the first upstream error, or `idle_timeout` elapsing while waiting for the
/// next item, becomes `Error`. Nothing follows the terminal event, and the
/// upstream stream is dropped as soon as it is reached.
pub fn relay_events<F, S>(upstream: F, idle_timeout: Duration) -> impl Stream<Item = StreamEvent> + Send
where
    F: Future<Output = Result<S>> + Send + 'static,
    S: Stream<Item = Result<String>> + Send + 'static,
{
    async_stream::stream! {
        let upstream = match tokio::time::timeout(idle_timeout, upstream).await {
            Ok(Ok(stream)) => stream,
            Ok(Err(e)) => {
                warn!("Upstream call failed: {}", e);
                yield StreamEvent::Error { message: e.to_string() };
                return;
            }
            Err(_) => {
                let e = ProxyError::IdleTimeout(idle_timeout);
                warn!("Upstream call failed: {}", e);
                yield StreamEvent::Error { message: e.to_string() };
                return;
            }
        };
        futures::pin_mut!(upstream);

        let mut chunk_count = 0usize;
        loop {
            match tokio::time::timeout(idle_timeout, upstream.next()).await {
                Ok(Some(Ok(text))) => {
                    chunk_count += 1;
                    debug!("Relaying chunk #{} ({} bytes)", chunk_count, text.len());
                    yield StreamEvent::Chunk { text };
                }
                Ok(Some(Err(e))) => {
                    warn!("Stream error after {} chunks: {}", chunk_count, e);
                    yield StreamEvent::Error { message: e.to_string() };
                    break;
                }
                Ok(None) => {
                    debug!("Upstream finished after {} chunks", chunk_count);
                    yield StreamEvent::Done;
                    break;
                }
                Err(_) => {
                    let e = ProxyError::IdleTimeout(idle_timeout);
                    warn!("Stream error after {} chunks: {}", chunk_count, e);
                    yield StreamEvent::Error { message: e.to_string() };
                    break;
                }
            }
        }
    }
}

/// Encode relay events as SSE body frames.
pub fn sse_frames<S>(events: S) -> impl Stream<Item = std::result::Result<String, std::convert::Infallible>> + Send
where
    S: Stream<Item = StreamEvent> + Send + 'static,
{
    events.map(|event| Ok(event.to_sse()))
}
