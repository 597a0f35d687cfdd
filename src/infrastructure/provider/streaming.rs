//! Streaming response handling.
//!
//! The provider answers a streaming chat completion with Server-Sent
//! Events: `data: {json}` lines separated by blank lines, terminated by a
//! `data: [DONE]` sentinel. This module frames the raw byte stream into
//! those payloads, deserializes each into a chunk, and normalizes the
//! chunk into the uniform [`StreamEvent`] shape the host loop consumes.
//!
//! Normalization rules:
//! - A chunk's content delta may be a plain string or a sequence of typed
//!   parts; only `text`-typed parts contribute, concatenated in order,
//!   everything else dropped silently. A delta that normalizes to the
//!   empty string yields no event.
//! - Missing token counts default to zero; a chunk with no usage field
//!   yields no usage event.
//! - A malformed chunk is logged and skipped rather than aborting the
//!   stream — partial output is more useful than none.

use std::collections::VecDeque;
use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::Bytes;
use futures::Stream;
use serde::Deserialize;
use tracing::{debug, warn};

use super::error::ProviderError;

/// Uniform event emitted by a generation stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent {
    /// Incremental text output from the model.
    Text {
        text: String,
    },
    /// Token accounting for the generation so far.
    Usage {
        input_tokens: u64,
        output_tokens: u64,
    },
}

/// One deserialized streaming chunk from the provider.
#[derive(Debug, Deserialize)]
pub(crate) struct ChatChunk {
    #[serde(default)]
    choices: Vec<ChunkChoice>,
    #[serde(default)]
    usage: Option<ChunkUsage>,
}

#[derive(Debug, Deserialize)]
struct ChunkChoice {
    #[serde(default)]
    delta: Option<ChunkDelta>,
}

#[derive(Debug, Deserialize)]
struct ChunkDelta {
    #[serde(default)]
    content: Option<DeltaContent>,
}

/// Content delta: a plain string or a sequence of typed parts.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DeltaContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

/// Typed content part. Anything that is not text is dropped silently.
#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum ContentPart {
    #[serde(rename = "text")]
    Text {
        #[serde(default)]
        text: String,
    },
    #[serde(other)]
    Other,
}

/// Token accounting fields, tolerant of both spellings the provider has
/// shipped. Missing counts default to zero.
#[derive(Debug, Deserialize)]
struct ChunkUsage {
    #[serde(default, alias = "promptTokens")]
    prompt_tokens: u64,
    #[serde(default, alias = "completionTokens")]
    completion_tokens: u64,
}

impl ChatChunk {
    /// Normalize a chunk into zero or more events, in emission order:
    /// the text delta (if any) first, then the usage summary (if any).
    fn into_events(self) -> Vec<StreamEvent> {
        let mut events = Vec::with_capacity(2);

        let delta = self.choices.into_iter().next().and_then(|c| c.delta);
        if let Some(content) = delta.and_then(|d| d.content) {
            let text = match content {
                DeltaContent::Text(text) => text,
                DeltaContent::Parts(parts) => parts
                    .into_iter()
                    .filter_map(|part| match part {
                        ContentPart::Text { text } => Some(text),
                        ContentPart::Other => None,
                    })
                    .collect(),
            };
            if !text.is_empty() {
                events.push(StreamEvent::Text { text });
            }
        }

        if let Some(usage) = self.usage {
            events.push(StreamEvent::Usage {
                input_tokens: usage.prompt_tokens,
                output_tokens: usage.completion_tokens,
            });
        }

        events
    }
}

/// Lazily turns a raw SSE byte stream into normalized [`StreamEvent`]s.
///
/// Pull-based: nothing is read from the wire beyond what the consumer
/// polls for, and dropping the stream drops the underlying connection.
pub struct GenerationStream {
    inner: Pin<Box<dyn Stream<Item = Result<Bytes, reqwest::Error>> + Send>>,
    // Raw bytes: a network chunk may end mid-way through a multi-byte
    // character, so decoding waits until a whole block is framed.
    buffer: Vec<u8>,
    pending: VecDeque<StreamEvent>,
    done: bool,
}

impl GenerationStream {
    /// Wrap a raw byte stream (normally `reqwest::Response::bytes_stream`).
    pub fn new(bytes: impl Stream<Item = Result<Bytes, reqwest::Error>> + Send + 'static) -> Self {
        Self {
            inner: Box::pin(bytes),
            buffer: Vec::new(),
            pending: VecDeque::new(),
            done: false,
        }
    }

    /// Parse one complete SSE block into events, if it carries a payload.
    ///
    /// Returns `true` when the block was the `[DONE]` sentinel.
    fn consume_block(&mut self, block: &str) -> bool {
        for line in block.lines() {
            let Some(data) = line.trim_start().strip_prefix("data:") else {
                continue;
            };
            let data = data.trim();

            if data.is_empty() {
                continue;
            }
            if data == "[DONE]" {
                return true;
            }

            match serde_json::from_str::<ChatChunk>(data) {
                Ok(chunk) => self.pending.extend(chunk.into_events()),
                Err(err) => {
                    // Degrade gracefully: skip the chunk, keep the stream.
                    warn!(error = %err, "skipping malformed stream chunk");
                }
            }
        }
        false
    }
}

impl std::fmt::Debug for GenerationStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerationStream")
            .field("buffer", &self.buffer)
            .field("pending", &self.pending)
            .field("done", &self.done)
            .finish_non_exhaustive()
    }
}

impl Stream for GenerationStream {
    type Item = Result<StreamEvent, ProviderError>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        loop {
            if let Some(event) = self.pending.pop_front() {
                return Poll::Ready(Some(Ok(event)));
            }
            if self.done {
                return Poll::Ready(None);
            }

            // Frame on blank lines; one block may hold several data lines.
            if let Some(block_end) = self.buffer.windows(2).position(|w| w == b"\n\n") {
                let block = String::from_utf8_lossy(&self.buffer[..block_end]).into_owned();
                self.buffer.drain(..block_end + 2);

                if self.consume_block(&block) {
                    self.done = true;
                }
                continue;
            }

            match self.inner.as_mut().poll_next(cx) {
                Poll::Ready(Some(Ok(bytes))) => {
                    self.buffer.extend_from_slice(&bytes);
                }
                Poll::Ready(Some(Err(err))) => {
                    return Poll::Ready(Some(Err(ProviderError::NetworkError(err))));
                }
                Poll::Ready(None) => {
                    // Tolerate providers that omit the [DONE] sentinel: a
                    // complete trailing block is still consumed.
                    if !self.buffer.is_empty() {
                        let rest = std::mem::take(&mut self.buffer);
                        let rest = String::from_utf8_lossy(&rest);
                        if rest.trim().is_empty() {
                            debug!("stream ended with blank trailing data");
                        } else {
                            self.consume_block(&rest);
                        }
                    }
                    self.done = true;
                }
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}
