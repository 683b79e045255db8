//! Ordered queue of incoming byte chunks.
//!
//! The transport hands the decoder whatever chunk sizes the kernel felt
//! like delivering; this queue lets the tokenizer search for frame
//! boundaries and detach exact byte ranges without first gluing the
//! chunks into one contiguous buffer.

use bytes::{Bytes, BytesMut};
use std::collections::VecDeque;

/// Append-only FIFO of byte chunks with cross-boundary search and split.
///
/// Invariant: [`len`](ChunkQueue::len) equals the sum of the queued chunk
/// lengths.
#[derive(Debug, Default)]
pub struct ChunkQueue {
    chunks: VecDeque<Bytes>,
    len: usize,
}

impl ChunkQueue {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of buffered bytes.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no bytes are buffered.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Appends a chunk to the tail. Empty chunks are dropped.
    pub fn push(&mut self, chunk: Bytes) {
        if chunk.is_empty() {
            return;
        }
        self.len += chunk.len();
        self.chunks.push_back(chunk);
    }

    /// Absolute offset of the first occurrence of `needle`, searching
    /// across chunk boundaries.
    pub fn index_of(&self, needle: &[u8]) -> Option<usize> {
        let first = *needle.first()?;
        let mut base = 0;
        for (chunk_idx, chunk) in self.chunks.iter().enumerate() {
            let mut from = 0;
            while let Some(hit) = chunk[from..].iter().position(|&b| b == first) {
                let at = from + hit;
                if self.matches_at(chunk_idx, at, needle) {
                    return Some(base + at);
                }
                from = at + 1;
            }
            base += chunk.len();
        }
        None
    }

    /// Compares `needle` against the bytes starting at `offset` within
    /// chunk `chunk_idx`, walking forward across boundaries.
    fn matches_at(&self, chunk_idx: usize, offset: usize, needle: &[u8]) -> bool {
        let mut ci = chunk_idx;
        let mut off = offset;
        for &expected in needle {
            while off >= self.chunks[ci].len() {
                off = 0;
                ci += 1;
                if ci == self.chunks.len() {
                    return false;
                }
            }
            if self.chunks[ci][off] != expected {
                return false;
            }
            off += 1;
        }
        true
    }

    /// Detaches the first `n` bytes as one contiguous buffer.
    ///
    /// When `n` lands on or inside the head chunk this is zero-copy
    /// (`Bytes` refcount bump); only a range spanning several chunks is
    /// concatenated.
    ///
    /// # Panics
    ///
    /// Panics if `n` exceeds [`len`](ChunkQueue::len).
    pub fn take(&mut self, n: usize) -> Bytes {
        assert!(n <= self.len, "take({n}) past end of {} buffered bytes", self.len);
        if n == 0 {
            return Bytes::new();
        }
        self.len -= n;

        let head_len = self.chunks.front().map_or(0, Bytes::len);
        if n < head_len {
            return self.chunks.front_mut().expect("head chunk present").split_to(n);
        }
        if n == head_len {
            return self.chunks.pop_front().expect("head chunk present");
        }

        let mut out = BytesMut::with_capacity(n);
        let mut remaining = n;
        while remaining > 0 {
            let mut chunk = self.chunks.pop_front().expect("length invariant");
            if chunk.len() <= remaining {
                remaining -= chunk.len();
                out.extend_from_slice(&chunk);
            } else {
                out.extend_from_slice(&chunk.split_to(remaining));
                remaining = 0;
                self.chunks.push_front(chunk);
            }
        }
        out.freeze()
    }
}
