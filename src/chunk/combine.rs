//! Temporary chunk storage and reassembly.
//!
//! Each planned [`ByteRange`] gets its own named temporary file. The fetchers
//! write into those files in any order; [`combine_chunks`] then appends them
//! to the output file strictly by index.

use super::plan::ByteRange;
use crate::error::{Error, Result};

use std::io::{self, SeekFrom};
use std::path::Path;
use tempfile::NamedTempFile;
use tokio::fs::File;
use tokio::io::{AsyncSeekExt, AsyncWriteExt};
use tracing::debug;

/// One byte range and the temporary file receiving its bytes.
///
/// The temporary file is deleted when the chunk is dropped.
#[derive(Debug)]
pub struct Chunk {
    range: ByteRange,
    file: NamedTempFile,
}

impl Chunk {
    /// Allocates the temporary file for `range` inside `dir`.
    ///
    /// The file name is `<filename>.<random>.part`, with `filename` cut to
    /// [`PART_PREFIX_MAX`] bytes.
    pub fn create(range: ByteRange, filename: &str, dir: &Path) -> io::Result<Self> {
        let file = tempfile::Builder::new()
            .prefix(&format!("{}.", part_prefix(filename)))
            .suffix(".part")
            .tempfile_in(dir)?;
        Ok(Self { range, file })
    }

    /// Get the chunk's byte range.
    pub fn range(&self) -> &ByteRange {
        &self.range
    }

    /// Get the path of the chunk's temporary file.
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Opens a fresh handle on the temporary file, positioned at its start.
    pub fn open(&self) -> io::Result<File> {
        Ok(File::from_std(self.file.reopen()?))
    }
}

/// Longest file name prefix kept in part file names.
pub const PART_PREFIX_MAX: usize = 64;

/// Cuts `filename` to at most [`PART_PREFIX_MAX`] bytes on a char boundary.
fn part_prefix(filename: &str) -> &str {
    if filename.len() <= PART_PREFIX_MAX {
        return filename;
    }
    let mut end = PART_PREFIX_MAX;
    while !filename.is_char_boundary(end) {
        end -= 1;
    }
    &filename[..end]
}

/// Appends every chunk to `output`, in index order, and returns the number of
/// bytes written.
///
/// The chunks are consumed: their temporary files are removed whether the
/// combination succeeds or not. On failure, `output` is left partially
/// written.
pub async fn combine_chunks(chunks: Vec<Chunk>, output: &mut File, path: &Path) -> Result<u64> {
    let combine_err = |source: io::Error| Error::Combine {
        path: path.to_path_buf(),
        source,
    };

    let mut written: u64 = 0;
    for (expected, chunk) in chunks.iter().enumerate() {
        if chunk.range.index != expected {
            return Err(Error::Internal(format!(
                "chunk {} found at position {}",
                chunk.range.index, expected
            )));
        }

        let mut part = chunk.open().map_err(combine_err)?;
        // Fetchers leave the cursor at the end of what they wrote.
        part.seek(SeekFrom::Start(0)).await.map_err(combine_err)?;
        written += tokio::io::copy(&mut part, output)
            .await
            .map_err(combine_err)?;
    }
    output.flush().await.map_err(combine_err)?;

    debug!("Wrote {} bytes to {:?}", written, path);
    Ok(written)
}
