//! Stream-transform surface
//!
//! Chunks of terminal output flow through a [`Transform`]. While the
//! transform is enabled each chunk is handed to a [`ChunkAnimation`] that
//! passes the (possibly rewritten) chunk on through its [`Continuation`].

use futures::{Stream, StreamExt};
use tokio::sync::oneshot;

use crate::driver::Animation;
use crate::error::{AnimationError, Result};
use crate::shape::Shape;

/// A portion of control codes on its way to the terminal
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Chunk {
    Bytes(Vec<u8>),
    Text(String),
}

impl Chunk {
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Chunk::Bytes(bytes) => bytes,
            Chunk::Text(text) => text.as_bytes(),
        }
    }

    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_bytes().is_empty()
    }
}

impl From<&str> for Chunk {
    fn from(text: &str) -> Self {
        Chunk::Text(text.to_string())
    }
}

impl From<String> for Chunk {
    fn from(text: String) -> Self {
        Chunk::Text(text)
    }
}

impl From<Vec<u8>> for Chunk {
    fn from(bytes: Vec<u8>) -> Self {
        Chunk::Bytes(bytes)
    }
}

impl From<&[u8]> for Chunk {
    fn from(bytes: &[u8]) -> Self {
        Chunk::Bytes(bytes.to_vec())
    }
}

/// Passes a chunk to the next stage. Consumed on use, so it runs at most
/// once; dropping it unused fails the transform.
#[derive(Debug)]
pub struct Continuation {
    sender: oneshot::Sender<Chunk>,
}

impl Continuation {
    pub fn call(self, chunk: impl Into<Chunk>) {
        // Receiver gone means the transform was abandoned
        let _ = self.sender.send(chunk.into());
    }
}

/// Per-chunk animation hook
pub trait ChunkAnimation: Send + Sync {
    /// Handle `chunk` and eventually call `next` with what should be
    /// written. `next` may be moved into a task and called later.
    fn animate_chunk(&self, chunk: Chunk, next: Continuation) -> Result<()>;
}

impl<S: Shape> ChunkAnimation for Animation<S> {
    fn animate_chunk(&self, _chunk: Chunk, _next: Continuation) -> Result<()> {
        tracing::warn!("animate_chunk() called on the base animation");
        Err(self.fail(AnimationError::NotImplemented))
    }
}

/// Gate in front of a [`ChunkAnimation`]; starts disabled
#[derive(Debug)]
pub struct Transform<A> {
    animation: A,
    enabled: bool,
}

impl<A: ChunkAnimation> Transform<A> {
    pub fn new(animation: A) -> Self {
        Self {
            animation,
            enabled: false,
        }
    }

    pub fn animation(&self) -> &A {
        &self.animation
    }

    pub fn enable(&mut self) -> &mut Self {
        self.enabled = true;
        self
    }

    pub fn disable(&mut self) -> &mut Self {
        self.enabled = false;
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_disabled(&self) -> bool {
        !self.enabled
    }

    /// Run one chunk through the animation, or pass it along untouched while
    /// disabled.
    pub async fn transform(&self, chunk: Chunk) -> Result<Chunk> {
        if self.is_disabled() {
            return Ok(chunk);
        }

        let (sender, receiver) = oneshot::channel();
        self.animation.animate_chunk(chunk, Continuation { sender })?;
        receiver.await.map_err(|_| AnimationError::ContinuationDropped)
    }

    /// Transform every chunk of `input`, preserving order
    pub fn pipe<'a, St>(&'a self, input: St) -> impl Stream<Item = Result<Chunk>> + 'a
    where
        St: Stream<Item = Chunk> + 'a,
    {
        input.then(move |chunk| self.transform(chunk))
    }
}
