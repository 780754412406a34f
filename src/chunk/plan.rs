//! Byte range planning.
//!
//! A file is split into parts only when it is larger than the split
//! threshold. Every part but the last has the same length; the last one
//! absorbs the remainder of the division.
//!
//! # Examples
//!
//! ```rust
//! use chunkfetch::chunk::ChunkPlanner;
//!
//! let ranges = ChunkPlanner::new(4).split_threshold(10).plan(103);
//! assert_eq!(ranges.len(), 4);
//! assert_eq!(ranges[0].header_value().as_deref(), Some("bytes=0-24"));
//! assert_eq!(ranges[3].header_value().as_deref(), Some("bytes=75-102"));
//! ```

/// Size at or below which a file is fetched with a single request.
pub const DEFAULT_SPLIT_THRESHOLD: u64 = 10 * 1024 * 1024;

/// A contiguous slice of a remote file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    /// Position of the range within its plan.
    pub index: usize,
    /// First byte offset (inclusive).
    pub start: u64,
    /// Number of bytes covered.
    pub len: u64,
}

impl ByteRange {
    /// Last byte offset (inclusive), or `None` for an empty range.
    pub fn end(&self) -> Option<u64> {
        if self.len == 0 {
            None
        } else {
            Some(self.start + self.len - 1)
        }
    }

    /// Returns `true` if the range covers no bytes.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// HTTP `Range` header value: `bytes=<start>-<end>`.
    pub fn header_value(&self) -> Option<String> {
        self.end().map(|end| format!("bytes={}-{}", self.start, end))
    }
}

/// Computes the byte ranges of a download.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkPlanner {
    parts: usize,
    split_threshold: u64,
}

impl ChunkPlanner {
    /// Creates a planner targeting `parts` ranges for large files.
    ///
    /// A part count of zero is treated as one.
    pub fn new(parts: usize) -> Self {
        Self {
            parts: parts.max(1),
            split_threshold: DEFAULT_SPLIT_THRESHOLD,
        }
    }

    /// Sets the size at or below which a file is not split.
    pub fn split_threshold(mut self, threshold: u64) -> Self {
        self.split_threshold = threshold;
        self
    }

    /// Plans the ranges for a file of `content_length` bytes.
    ///
    /// The returned ranges are ordered by index and by offset, and cover
    /// `[0, content_length)` exactly once.
    pub fn plan(&self, content_length: u64) -> Vec<ByteRange> {
        if content_length <= self.split_threshold || self.parts == 1 {
            return vec![ByteRange {
                index: 0,
                start: 0,
                len: content_length,
            }];
        }

        // Never plan more parts than bytes.
        let parts = (self.parts as u64).min(content_length);
        let base = content_length / parts;
        let remainder = content_length % parts;

        (0..parts)
            .map(|i| {
                let len = if i == parts - 1 { base + remainder } else { base };
                ByteRange {
                    index: i as usize,
                    start: i * base,
                    len,
                }
            })
            .collect()
    }
}
