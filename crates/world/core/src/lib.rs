//! Traversable world model decoded from a running game's map memory.
//!
//! `world-core` turns the raw in-memory map records of the game into a typed
//! world: maps of tiles, the directed walk graph stitched across map borders,
//! and shortest-path search over that graph. Everything here is pure — the
//! only external dependency is the [`env::MemoryOracle`] supplying bytes, so
//! results are deterministic for a fixed memory image. Issuing inputs and
//! observing the player live in the `pilot` crate.
pub mod env;
pub mod graph;
pub mod map;

pub use env::{MemoryError, MemoryOracle};
pub use graph::{
    Move, RouteError, SearchRecord, Vertex, VertexId, WorldGraph, route_moves,
};
pub use map::{
    Connections, DecodeError, Direction, MAP_GROUP_COUNT, MapData, MapHandle, MapId, Tile,
    TileRef, WorldDecoder, WorldSet,
};
