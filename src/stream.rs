//! Newline-delimited JSON decoding for the streamed generate response.

use crate::models::StreamChunk;
use futures::stream::{self, Stream};
use std::collections::VecDeque;
use std::fmt;
use std::pin::Pin;
use tokio_stream::StreamExt;

/// Reassembles lines from arbitrarily split network reads. A trailing `\r`
/// is dropped from every line.
#[derive(Debug, Default)]
pub struct LineBuffer {
    pending: Vec<u8>,
    // Bytes of `pending` already known to hold no newline.
    scanned: usize,
}

impl LineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `bytes` and returns every line completed by them.
    pub fn push(&mut self, bytes: &[u8]) -> Vec<String> {
        self.pending.extend_from_slice(bytes);

        let mut lines = Vec::new();
        while let Some(offset) = self.pending[self.scanned..].iter().position(|b| *b == b'\n') {
            let pos = self.scanned + offset;
            let line: Vec<u8> = self.pending.drain(..=pos).collect();
            lines.push(Self::to_line(&line[..line.len() - 1]));
            self.scanned = 0;
        }
        self.scanned = self.pending.len();
        lines
    }

    /// Returns the unterminated remainder, if any, once the body has ended.
    pub fn finish(&mut self) -> Option<String> {
        if self.pending.is_empty() {
            return None;
        }
        let rest = std::mem::take(&mut self.pending);
        self.scanned = 0;
        Some(Self::to_line(&rest))
    }

    fn to_line(bytes: &[u8]) -> String {
        let bytes = bytes.strip_suffix(b"\r").unwrap_or(bytes);
        String::from_utf8_lossy(bytes).into_owned()
    }
}

/// Decodes one line; anything that is not a chunk object yields `None`.
pub fn parse_chunk(line: &str) -> Option<StreamChunk> {
    serde_json::from_str(line).ok()
}

struct DecoderState<S> {
    body: Pin<Box<S>>,
    lines: LineBuffer,
    ready: VecDeque<StreamChunk>,
    finished: bool,
}

impl<S> DecoderState<S> {
    fn enqueue(&mut self, lines: Vec<String>) {
        self.ready
            .extend(lines.iter().filter_map(|line| parse_chunk(line)));
    }
}

/// Turns a raw byte stream into chunks. Malformed lines are dropped without a
/// trace. A transport error ends the stream with a warning; chunks already
/// decoded are still delivered.
pub fn decode_chunks<S, B, E>(body: S) -> impl Stream<Item = StreamChunk>
where
    S: Stream<Item = std::result::Result<B, E>>,
    B: AsRef<[u8]>,
    E: fmt::Display,
{
    let state = DecoderState {
        body: Box::pin(body),
        lines: LineBuffer::new(),
        ready: VecDeque::new(),
        finished: false,
    };

    stream::unfold(state, |mut state| async move {
        loop {
            if let Some(chunk) = state.ready.pop_front() {
                return Some((chunk, state));
            }
            if state.finished {
                return None;
            }
            match state.body.next().await {
                Some(Ok(bytes)) => {
                    let lines = state.lines.push(bytes.as_ref());
                    state.enqueue(lines);
                }
                Some(Err(e)) => {
                    log::warn!("⚠️  Text stream interrupted: {}", e);
                    state.finished = true;
                }
                None => {
                    let rest = state.lines.finish().into_iter().collect();
                    state.enqueue(rest);
                    state.finished = true;
                }
            }
        }
    })
}

/// Concatenates chunk fragments in arrival order, stopping right after the
/// first chunk flagged `done`.
pub async fn collect_response<S>(chunks: S) -> String
where
    S: Stream<Item = StreamChunk>,
{
    tokio::pin!(chunks);

    let mut full_response = String::new();
    let mut chunk_count = 0usize;
    let mut saw_done = false;

    while let Some(chunk) = chunks.next().await {
        chunk_count += 1;
        full_response.push_str(&chunk.response);
        if chunk.done {
            saw_done = true;
            break;
        }
    }

    log::debug!(
        "📊 Received {} chunks ({} characters, done flag {})",
        chunk_count,
        full_response.len(),
        if saw_done { "seen" } else { "missing" }
    );
    full_response
}
