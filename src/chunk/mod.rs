//! Chunk module containing range planning and reassembly.
//!
//! - `plan` - [`ChunkPlanner`] and [`ByteRange`], the partition arithmetic
//! - `combine` - [`Chunk`] temporary storage and [`combine_chunks`]

pub mod combine;
pub mod plan;

pub use combine::{combine_chunks, Chunk};
pub use plan::{ByteRange, ChunkPlanner, DEFAULT_SPLIT_THRESHOLD};
