//! Typed map data decoded from the game's layout records.
//!
//! Maps and their tiles live in a [`WorldSet`] arena owned by one routing
//! session. Tiles point back at their owning map through a [`MapHandle`]
//! index, so the self-referencing layout of the original records needs no
//! ownership cycle. Nothing in here is mutated after decoding.
mod decode;
mod direction;

use std::fmt;

pub use decode::{DecodeError, MAP_GROUP_COUNT, WorldDecoder};
pub use direction::Direction;

/// Two-level map identity: header-table group, then entry within the group.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MapId {
    pub group: u8,
    pub number: u8,
}

impl MapId {
    pub const fn new(group: u8, number: u8) -> Self {
        Self { group, number }
    }
}

impl fmt::Display for MapId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.group, self.number)
    }
}

/// Index of a map within its owning [`WorldSet`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MapHandle(pub usize);

/// Address of one tile: owning map plus map-local coordinates.
///
/// Unique per `(map, x, y)` within a [`WorldSet`], which makes it the key
/// type for the walk graph. Two loaded maps never share a `TileRef` even
/// when their coordinates coincide.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TileRef {
    pub map: MapHandle,
    pub x: u32,
    pub y: u32,
}

// Layout of one 16-bit map-grid word: a 10-bit metatile id, a 2-bit
// collision value, and a 4-bit elevation value.
const METATILE_MASK: u16 = 0x03FF;
const COLLISION_MASK: u16 = 0x0C00;
const ELEVATION_MASK: u16 = 0xF000;
const COLLISION_SHIFT: u16 = 10;
const ELEVATION_SHIFT: u16 = 12;

/// One grid cell of a map.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tile {
    pub metatile: u16,
    pub collision: u8,
    pub elevation: u8,
    pub x: u32,
    pub y: u32,
    pub map: MapHandle,
}

impl Tile {
    /// Unpacks a raw map-grid word into its three bit fields.
    pub fn from_raw(word: u16, x: u32, y: u32, map: MapHandle) -> Self {
        Self {
            metatile: word & METATILE_MASK,
            collision: ((word & COLLISION_MASK) >> COLLISION_SHIFT) as u8,
            elevation: ((word & ELEVATION_MASK) >> ELEVATION_SHIFT) as u8,
            x,
            y,
            map,
        }
    }

    /// Collision class zero is the sole walkability predicate.
    pub fn is_walkable(&self) -> bool {
        self.collision == 0
    }

    /// Address of this tile within its world set.
    pub fn reference(&self) -> TileRef {
        TileRef {
            map: self.map,
            x: self.x,
            y: self.y,
        }
    }
}

/// Per-border map adjacency: one optional target map per cardinal direction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Connections {
    down: Option<MapId>,
    up: Option<MapId>,
    left: Option<MapId>,
    right: Option<MapId>,
}

impl Connections {
    /// Target map declared on the given border, if any. Always `None` for
    /// the vertical transitions, which are not border adjacencies.
    pub fn get(&self, direction: Direction) -> Option<MapId> {
        match direction {
            Direction::Down => self.down,
            Direction::Up => self.up,
            Direction::Left => self.left,
            Direction::Right => self.right,
            Direction::Dive | Direction::Emerge => None,
        }
    }

    /// Records a connection. Non-cardinal directions are dropped; the
    /// original records can carry them but nothing ever reads them back.
    pub fn set(&mut self, direction: Direction, target: MapId) {
        match direction {
            Direction::Down => self.down = Some(target),
            Direction::Up => self.up = Some(target),
            Direction::Left => self.left = Some(target),
            Direction::Right => self.right = Some(target),
            Direction::Dive | Direction::Emerge => {}
        }
    }

    /// Declared connections as `(direction, target)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Direction, MapId)> + '_ {
        Direction::CARDINALS
            .into_iter()
            .filter_map(|direction| self.get(direction).map(|target| (direction, target)))
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}

/// A rectangular grid of tiles with its border connections.
///
/// Tiles are stored row-major; every tile coordinate lies in
/// `[0, width) x [0, height)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MapData {
    id: MapId,
    width: u32,
    height: u32,
    connections: Connections,
    tiles: Vec<Tile>,
}

impl MapData {
    /// Assembles a decoded map. `tiles` must be row-major with
    /// `width * height` entries; constructed by the decoder and by tests.
    pub fn new(
        id: MapId,
        width: u32,
        height: u32,
        connections: Connections,
        tiles: Vec<Tile>,
    ) -> Self {
        debug_assert_eq!(tiles.len(), (width as usize) * (height as usize));
        Self {
            id,
            width,
            height,
            connections,
            tiles,
        }
    }

    pub fn id(&self) -> MapId {
        self.id
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn connections(&self) -> &Connections {
        &self.connections
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// The tile at map-local `(x, y)`, if in bounds.
    pub fn tile_at(&self, x: u32, y: u32) -> Option<&Tile> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.tiles
            .get((y as usize) * (self.width as usize) + (x as usize))
    }

    /// Collision class at `(x, y)`, if in bounds.
    pub fn collision_at(&self, x: u32, y: u32) -> Option<u8> {
        self.tile_at(x, y).map(|tile| tile.collision)
    }

    /// Collision matrix rendered one row per line, for debugging map data.
    pub fn collision_grid(&self) -> CollisionGrid<'_> {
        CollisionGrid(self)
    }
}

/// `Display` adapter over a map's collision values.
pub struct CollisionGrid<'a>(&'a MapData);

impl fmt::Display for CollisionGrid<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.0.height {
            for x in 0..self.0.width {
                if x > 0 {
                    f.write_str(" ")?;
                }
                write!(f, "{}", self.0.collision_at(x, y).unwrap_or_default())?;
            }
            f.write_str("\n")?;
        }
        Ok(())
    }
}

/// Arena of the maps loaded for one routing session.
#[derive(Clone, Debug, Default)]
pub struct WorldSet {
    maps: Vec<MapData>,
}

impl WorldSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            maps: Vec::with_capacity(capacity),
        }
    }

    /// Inserts the map produced by `build`, which receives the handle the
    /// map will live under so its tiles can point back at it.
    pub fn insert_with(&mut self, build: impl FnOnce(MapHandle) -> MapData) -> MapHandle {
        let handle = MapHandle(self.maps.len());
        self.maps.push(build(handle));
        handle
    }

    /// Fallible variant of [`insert_with`](Self::insert_with); nothing is
    /// inserted when `build` fails.
    pub fn try_insert_with<E>(
        &mut self,
        build: impl FnOnce(MapHandle) -> Result<MapData, E>,
    ) -> Result<MapHandle, E> {
        let handle = MapHandle(self.maps.len());
        self.maps.push(build(handle)?);
        Ok(handle)
    }

    pub fn get(&self, handle: MapHandle) -> Option<&MapData> {
        self.maps.get(handle.0)
    }

    /// Handle of the map with the given identity, if loaded.
    pub fn lookup(&self, id: MapId) -> Option<MapHandle> {
        self.maps
            .iter()
            .position(|map| map.id == id)
            .map(MapHandle)
    }

    pub fn contains(&self, id: MapId) -> bool {
        self.lookup(id).is_some()
    }

    /// The tile addressed by `tile`, if its map is loaded and in bounds.
    pub fn tile(&self, tile: TileRef) -> Option<&Tile> {
        self.get(tile.map)?.tile_at(tile.x, tile.y)
    }

    pub fn iter(&self) -> impl Iterator<Item = (MapHandle, &MapData)> {
        self.maps
            .iter()
            .enumerate()
            .map(|(index, map)| (MapHandle(index), map))
    }

    pub fn len(&self) -> usize {
        self.maps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.maps.is_empty()
    }
}
