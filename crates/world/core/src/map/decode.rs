//! Decoding of map headers, layouts, and connection records from memory.
//!
//! The game keeps a two-level header table: a per-group pointer array under
//! the `gMapGroups` symbol, each entry pointing at an array of map-header
//! pointers. A header points at a layout record (dimensions plus the packed
//! tile grid) and optionally at a connection header listing the maps
//! adjacent across each border.

use crate::env::{MemoryError, MemoryOracle};
use crate::map::{Connections, Direction, MapData, MapHandle, MapId, Tile, WorldSet};

/// Number of entries in the game's map-group pointer table.
pub const MAP_GROUP_COUNT: usize = 34;

const MAP_GROUPS_SYMBOL: &str = "gMapGroups";

// Fixed offsets within the header and layout records.
const HEADER_CONNECTIONS_OFFSET: u32 = 0xC;
const LAYOUT_HEIGHT_OFFSET: u32 = 0x4;
const LAYOUT_DATA_OFFSET: u32 = 0xC;

// A connection header is a record count followed by a pointer to the record
// list. Each 12-byte record carries the direction code and, at +0x8, the
// target map's group and number bytes.
const CONNECTION_LIST_OFFSET: u32 = 0x4;
const CONNECTION_TARGET_OFFSET: u32 = 0x8;
const CONNECTION_RECORD_SIZE: u32 = 12;

/// Errors raised while decoding map records.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("map {id} is not present in the header table")]
    UnknownMap { id: MapId },

    #[error("connection record {index} carries unknown direction code {code}")]
    InvalidDirection { index: u32, code: u32 },

    #[error(transparent)]
    Memory(#[from] MemoryError),
}

/// Decoder instance holding the resolved map-group table.
///
/// The group table is read once at construction; [`reload`](Self::reload)
/// re-resolves it after the underlying memory image has been replaced
/// (for example when a different save or ROM is loaded).
#[derive(Clone, Debug)]
pub struct WorldDecoder {
    groups: Vec<u8>,
}

impl WorldDecoder {
    /// Resolves the map-group table from the given memory image.
    pub fn new(memory: &dyn MemoryOracle) -> Result<Self, DecodeError> {
        let groups = memory.read_symbol(MAP_GROUPS_SYMBOL, MAP_GROUP_COUNT * 4)?;
        Ok(Self { groups })
    }

    /// Re-reads the map-group table from a (possibly reloaded) image.
    pub fn reload(&mut self, memory: &dyn MemoryOracle) -> Result<(), DecodeError> {
        self.groups = memory.read_symbol(MAP_GROUPS_SYMBOL, MAP_GROUP_COUNT * 4)?;
        Ok(())
    }

    /// Absolute address of the map's header record.
    pub fn header_addr(&self, memory: &dyn MemoryOracle, id: MapId) -> Result<u32, DecodeError> {
        let entry = id.group as usize * 4;
        let table = self
            .groups
            .get(entry..entry + 4)
            .ok_or(DecodeError::UnknownMap { id })?;
        let table = u32::from_le_bytes([table[0], table[1], table[2], table[3]]);
        Ok(memory.read_u32(table + u32::from(id.number) * 4)?)
    }

    /// Decodes the full map record: layout dimensions, the packed tile
    /// grid, and the border connections.
    ///
    /// `handle` is the arena slot the map will occupy; use
    /// [`WorldSet::try_insert_with`] to obtain it.
    pub fn decode_map(
        &self,
        memory: &dyn MemoryOracle,
        id: MapId,
        handle: MapHandle,
    ) -> Result<MapData, DecodeError> {
        let header = self.header_addr(memory, id)?;
        let layout = memory.read_u32(header)?;
        let width = memory.read_u32(layout)?;
        let height = memory.read_u32(layout + LAYOUT_HEIGHT_OFFSET)?;
        let data = memory.read_u32(layout + LAYOUT_DATA_OFFSET)?;
        let connections = self.decode_connections(memory, header)?;

        let cells = (width as usize) * (height as usize);
        let raw = memory.read_bytes(data, cells * 2)?;
        let mut tiles = Vec::with_capacity(cells);
        for (index, word) in raw.chunks_exact(2).enumerate() {
            let word = u16::from_le_bytes([word[0], word[1]]);
            let x = (index as u32) % width.max(1);
            let y = (index as u32) / width.max(1);
            tiles.push(Tile::from_raw(word, x, y, handle));
        }

        Ok(MapData::new(id, width, height, connections, tiles))
    }

    /// Decodes the connection header reachable from a map header. A zero
    /// connection pointer means the map declares no connections.
    fn decode_connections(
        &self,
        memory: &dyn MemoryOracle,
        header: u32,
    ) -> Result<Connections, DecodeError> {
        let mut connections = Connections::default();
        let Some((count, list)) = read_connection_header(memory, header)? else {
            return Ok(connections);
        };

        for index in 0..count {
            let record = list + index * CONNECTION_RECORD_SIZE;
            let code = memory.read_u32(record)?;
            let direction = Direction::from_code(code)
                .ok_or(DecodeError::InvalidDirection { index, code })?;
            let group = memory.read_u8(record + CONNECTION_TARGET_OFFSET)?;
            let number = memory.read_u8(record + CONNECTION_TARGET_OFFSET + 1)?;
            connections.set(direction, MapId::new(group, number));
        }

        Ok(connections)
    }

    /// Identifiers of every map reachable from `origin` within `depth`
    /// border connections, origin first, each map listed once.
    ///
    /// Only headers and connection records are read, so expanding widely is
    /// cheap; full tile grids are decoded by [`decode_world`](Self::decode_world).
    /// Expansion follows every record including the vertical transitions,
    /// matching the raw adjacency declared in memory.
    pub fn connected_maps(
        &self,
        memory: &dyn MemoryOracle,
        origin: MapId,
        depth: u32,
    ) -> Result<Vec<MapId>, DecodeError> {
        let mut seen = vec![origin];
        let mut frontier = vec![origin];

        for _ in 0..depth {
            let mut next = Vec::new();
            for id in frontier {
                let header = self.header_addr(memory, id)?;
                let Some((count, list)) = read_connection_header(memory, header)? else {
                    continue;
                };
                for index in 0..count {
                    let record = list + index * CONNECTION_RECORD_SIZE;
                    let group = memory.read_u8(record + CONNECTION_TARGET_OFFSET)?;
                    let number = memory.read_u8(record + CONNECTION_TARGET_OFFSET + 1)?;
                    let target = MapId::new(group, number);
                    if !seen.contains(&target) {
                        seen.push(target);
                        next.push(target);
                    }
                }
            }
            if next.is_empty() {
                break;
            }
            frontier = next;
        }

        Ok(seen)
    }

    /// Expands `depth` connections out from `origin` and decodes every map
    /// found into one [`WorldSet`].
    pub fn decode_world(
        &self,
        memory: &dyn MemoryOracle,
        origin: MapId,
        depth: u32,
    ) -> Result<WorldSet, DecodeError> {
        let ids = self.connected_maps(memory, origin, depth)?;
        let mut world = WorldSet::with_capacity(ids.len());
        for id in ids {
            world.try_insert_with(|handle| self.decode_map(memory, id, handle))?;
        }
        Ok(world)
    }
}

fn read_connection_header(
    memory: &dyn MemoryOracle,
    header: u32,
) -> Result<Option<(u32, u32)>, MemoryError> {
    let connection_ptr = memory.read_u32(header + HEADER_CONNECTIONS_OFFSET)?;
    if connection_ptr == 0 {
        return Ok(None);
    }
    let count = memory.read_u32(connection_ptr)?;
    let list = memory.read_u32(connection_ptr + CONNECTION_LIST_OFFSET)?;
    Ok(Some((count, list)))
}
