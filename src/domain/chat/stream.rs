//! Paced word streaming over an already completed answer
//!
//! The provider call underneath is not incremental. A [`ChatStream`] built by
//! [`ChatStream::synthesized`] replays a finished text word by word on a fixed
//! cadence, and says so through [`StreamOrigin`].

use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;

use futures::stream::{self, BoxStream, Stream, StreamExt};
use serde::Serialize;

/// Delay between two consecutive chunks of a synthesized stream
pub const DEFAULT_CHUNK_DELAY: Duration = Duration::from_millis(100);

/// One word of a streamed answer, including its trailing separator
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StreamChunk {
    word: String,
}

impl StreamChunk {
    fn from_word(word: &str) -> Self {
        let mut chunk = String::with_capacity(word.len() + 1);
        chunk.push_str(word);
        chunk.push(' ');
        Self { word: chunk }
    }

    pub fn as_str(&self) -> &str {
        &self.word
    }

    pub fn into_inner(self) -> String {
        self.word
    }
}

/// Where the chunks of a stream come from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamOrigin {
    /// A completed answer paced out locally
    Synthesized,
    /// The provider call failed; the stream is empty
    Aborted,
}

/// Finite, non-restartable stream of chunks for one streamed chat turn
pub struct ChatStream {
    origin: StreamOrigin,
    chunks: BoxStream<'static, StreamChunk>,
}

impl ChatStream {
    /// Split `text` on whitespace runs and emit one chunk per word, waiting
    /// `delay` before every chunk after the first.
    ///
    /// Dropping the stream drops any pending delay with it.
    pub fn synthesized(text: &str, delay: Duration) -> Self {
        let chunks: Vec<StreamChunk> = text
            .split_whitespace()
            .map(StreamChunk::from_word)
            .collect();

        let paced =
            stream::iter(chunks.into_iter().enumerate()).then(move |(index, chunk)| async move {
                if index > 0 {
                    tokio::time::sleep(delay).await;
                }
                chunk
            });

        Self {
            origin: StreamOrigin::Synthesized,
            chunks: paced.boxed(),
        }
    }

    /// A stream that terminates immediately without content
    pub fn aborted() -> Self {
        Self {
            origin: StreamOrigin::Aborted,
            chunks: stream::empty().boxed(),
        }
    }

    pub fn origin(&self) -> StreamOrigin {
        self.origin
    }
}

impl Stream for ChatStream {
    type Item = StreamChunk;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.chunks.poll_next_unpin(cx)
    }
}

impl std::fmt::Debug for ChatStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatStream")
            .field("origin", &self.origin)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn test_emits_one_chunk_per_word_in_order() {
        let stream = ChatStream::synthesized("a b c", DEFAULT_CHUNK_DELAY);
        assert_eq!(stream.origin(), StreamOrigin::Synthesized);

        let words: Vec<String> = stream.map(StreamChunk::into_inner).collect().await;
        assert_eq!(words, vec!["a ", "b ", "c "]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_chunks_are_paced() {
        let delay = Duration::from_millis(100);
        let mut stream = ChatStream::synthesized("a b c", delay);

        let start = Instant::now();
        stream.next().await.unwrap();
        let first = start.elapsed();
        assert!(first < delay);

        stream.next().await.unwrap();
        let second = start.elapsed();
        assert!(second - first >= delay);

        stream.next().await.unwrap();
        let third = start.elapsed();
        assert!(third - second >= delay);

        assert!(stream.next().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_take_stops_pacing_early() {
        let delay = Duration::from_millis(100);
        let stream = ChatStream::synthesized("a b c d e", delay);

        let start = Instant::now();
        let words: Vec<String> = stream.take(2).map(StreamChunk::into_inner).collect().await;

        assert_eq!(words, vec!["a ", "b "]);
        let elapsed = start.elapsed();
        assert!(elapsed >= delay && elapsed < delay * 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropping_mid_stream_cancels_pending_delay() {
        let delay = Duration::from_millis(100);
        let mut stream = ChatStream::synthesized("a b c", delay);

        let start = Instant::now();
        assert_eq!(stream.next().await.unwrap().as_str(), "a ");

        // Start the wait for the second chunk, then abandon it.
        let pending = tokio::time::timeout(delay / 2, stream.next()).await;
        assert!(pending.is_err());
        drop(stream);

        // With no live timer left, an idle paused clock stays where it is.
        tokio::task::yield_now().await;
        assert!(start.elapsed() < delay);
    }

    #[tokio::test(start_paused = true)]
    async fn test_whitespace_runs_collapse() {
        let stream = ChatStream::synthesized("  hello \n\t world  ", DEFAULT_CHUNK_DELAY);
        let words: Vec<String> = stream.map(StreamChunk::into_inner).collect().await;

        assert_eq!(words, vec!["hello ", "world "]);
    }

    #[tokio::test]
    async fn test_empty_text_yields_nothing() {
        let stream = ChatStream::synthesized("   ", DEFAULT_CHUNK_DELAY);
        assert_eq!(stream.count().await, 0);
    }

    #[tokio::test]
    async fn test_aborted_stream_is_empty() {
        let stream = ChatStream::aborted();
        assert_eq!(stream.origin(), StreamOrigin::Aborted);
        assert_eq!(stream.count().await, 0);
    }

    #[test]
    fn test_chunk_serialization() {
        let chunk = StreamChunk::from_word("hi");
        assert_eq!(serde_json::to_string(&chunk).unwrap(), r#"{"word":"hi "}"#);
    }
}
