//! Traits describing the process whose memory the world is read from.
//!
//! The decoder never touches an emulator or process directly; it goes through
//! the [`MemoryOracle`] seam so the same decoding logic runs against a live
//! game, a snapshot, or a synthetic image in tests.
mod memory;

pub use memory::{MemoryError, MemoryOracle};
