use std::iter::FusedIterator;
use std::num::NonZeroUsize;

/// One ordered slice of an encoded document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunk<'a> {
    /// 1-based position of the chunk in the upload.
    pub sequence_index: usize,
    pub start_offset: usize,
    pub payload: &'a str,
    /// Set when `start_offset + threshold` reaches the total length.
    pub is_last: bool,
}

/// Iterator producing the chunks of a document on demand.
///
/// Chunks are contiguous, non-overlapping and start at offset 0.
#[derive(Debug, Clone)]
pub struct ChunkPlan<'a> {
    text: &'a str,
    threshold: usize,
    next_offset: usize,
    next_index: usize,
}

impl<'a> ChunkPlan<'a> {
    pub(crate) fn new(text: &'a str, threshold: NonZeroUsize) -> Self {
        Self {
            text,
            threshold: threshold.get(),
            next_offset: 0,
            next_index: 1,
        }
    }

    /// Total number of chunks for the whole document, `ceil(len / threshold)`.
    pub fn chunk_count(&self) -> usize {
        self.text.len().div_ceil(self.threshold)
    }

    pub fn threshold(&self) -> usize {
        self.threshold
    }
}

impl<'a> Iterator for ChunkPlan<'a> {
    type Item = Chunk<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let total = self.text.len();
        if self.next_offset >= total {
            return None;
        }

        let start = self.next_offset;
        let reach = start.saturating_add(self.threshold);
        let end = reach.min(total);
        let chunk = Chunk {
            sequence_index: self.next_index,
            start_offset: start,
            payload: &self.text[start..end],
            is_last: reach >= total,
        };

        self.next_offset = end;
        self.next_index += 1;
        Some(chunk)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.text.len() - self.next_offset).div_ceil(self.threshold);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for ChunkPlan<'_> {}

impl FusedIterator for ChunkPlan<'_> {}
