//! Directed walk graph stitched across every loaded map.
//!
//! One vertex per tile. Edges follow the four cardinal moves: inside a map
//! they lead to in-bounds walkable neighbors, and on map borders they cross
//! into the connected map at the mirrored coordinate. Edges are directed;
//! a step from A to B does not imply the reverse step exists.
mod route;
mod search;

use std::collections::HashMap;

use arrayvec::ArrayVec;

use crate::map::{Direction, MapData, Tile, TileRef, WorldSet};

pub use route::{RouteError, route_moves};
pub use search::SearchRecord;

/// One grid step: a cardinal direction plus the run-modifier flag.
///
/// This is the edge label of the walk graph and the unit the route
/// translator emits; the pollable action built from it lives in the pilot
/// layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    pub direction: Direction,
    pub run: bool,
}

impl Move {
    pub fn new(direction: Direction, run: bool) -> Self {
        Self { direction, run }
    }
}

/// Index of a vertex within its [`WorldGraph`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexId(pub usize);

/// Graph node wrapping exactly one tile.
#[derive(Clone, Debug)]
pub struct Vertex {
    tile: TileRef,
    // One outgoing edge per cardinal direction at most: a direction either
    // stays inside the map or crosses its border, never both.
    edges: ArrayVec<(VertexId, Move), 4>,
}

impl Vertex {
    pub fn tile(&self) -> TileRef {
        self.tile
    }

    pub fn edges(&self) -> &[(VertexId, Move)] {
        &self.edges
    }
}

/// The union of all loaded maps' tiles as a directed graph.
///
/// Built once per routing request. The builder trusts the caller's choice
/// of loaded maps: a border connection pointing at a map that is not in the
/// set simply produces no edge.
#[derive(Clone, Debug, Default)]
pub struct WorldGraph {
    vertices: Vec<Vertex>,
    index: HashMap<TileRef, VertexId>,
}

impl WorldGraph {
    /// Builds the graph covering every tile of every map in `world`.
    pub fn build(world: &WorldSet) -> Self {
        let mut graph = Self::default();

        for (_, map) in world.iter() {
            for tile in map.tiles() {
                let id = VertexId(graph.vertices.len());
                let reference = tile.reference();
                graph.vertices.push(Vertex {
                    tile: reference,
                    edges: ArrayVec::new(),
                });
                graph.index.insert(reference, id);
            }
        }

        for (_, map) in world.iter() {
            for tile in map.tiles() {
                graph.add_step_edges(map, tile);
                graph.add_border_edges(world, map, tile);
            }
        }

        graph
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.vertices.get(id.0)
    }

    /// The vertex wrapping the given tile, if that tile is in the graph.
    pub fn vertex_at(&self, tile: TileRef) -> Option<VertexId> {
        self.index.get(&tile).copied()
    }

    /// Edges to in-bounds walkable neighbors within the tile's own map.
    ///
    /// The tile's own collision value is deliberately not consulted: a
    /// blocked tile can still be stepped off of.
    fn add_step_edges(&mut self, map: &MapData, tile: &Tile) {
        for direction in Direction::CARDINALS {
            let Some((dx, dy)) = direction.delta() else {
                continue;
            };
            let x = i64::from(tile.x) + i64::from(dx);
            let y = i64::from(tile.y) + i64::from(dy);
            if x < 0 || y < 0 || x >= i64::from(map.width()) || y >= i64::from(map.height()) {
                continue;
            }
            let (x, y) = (x as u32, y as u32);
            if map.collision_at(x, y) != Some(0) {
                continue;
            }
            self.connect(
                tile.reference(),
                TileRef {
                    map: tile.map,
                    x,
                    y,
                },
                direction,
            );
        }
    }

    /// Edges crossing from a walkable border tile into the connected map.
    fn add_border_edges(&mut self, world: &WorldSet, map: &MapData, tile: &Tile) {
        if !tile.is_walkable() {
            return;
        }
        if tile.x == 0 {
            self.connect_across(world, map, tile, Direction::Left);
        }
        if tile.x + 1 == map.width() {
            self.connect_across(world, map, tile, Direction::Right);
        }
        if tile.y == 0 {
            self.connect_across(world, map, tile, Direction::Up);
        }
        if tile.y + 1 == map.height() {
            self.connect_across(world, map, tile, Direction::Down);
        }
    }

    /// Mirrors the border tile onto the opposite edge of the connected map:
    /// same transverse coordinate, opposite border. The destination tile's
    /// collision value is not checked, matching the game's border walk
    /// behavior; only the transverse bound is validated.
    fn connect_across(
        &mut self,
        world: &WorldSet,
        map: &MapData,
        tile: &Tile,
        direction: Direction,
    ) {
        let Some(target) = map.connections().get(direction) else {
            return;
        };
        let Some(handle) = world.lookup(target) else {
            return;
        };
        let Some(other) = world.get(handle) else {
            return;
        };
        if other.width() == 0 || other.height() == 0 {
            return;
        }

        let mirrored = match direction {
            Direction::Left => (tile.y < other.height()).then(|| (other.width() - 1, tile.y)),
            Direction::Right => (tile.y < other.height()).then_some((0, tile.y)),
            Direction::Up => (tile.x < other.width()).then(|| (tile.x, other.height() - 1)),
            Direction::Down => (tile.x < other.width()).then_some((tile.x, 0)),
            Direction::Dive | Direction::Emerge => None,
        };
        let Some((x, y)) = mirrored else {
            return;
        };

        self.connect(tile.reference(), TileRef { map: handle, x, y }, direction);
    }

    fn connect(&mut self, from: TileRef, to: TileRef, direction: Direction) {
        let Some(&from_id) = self.index.get(&from) else {
            return;
        };
        let Some(&to_id) = self.index.get(&to) else {
            return;
        };
        if let Some(vertex) = self.vertices.get_mut(from_id.0) {
            vertex.edges.push((to_id, Move::new(direction, true)));
        }
    }
}

#[cfg(test)]
pub(crate) mod testutil {
    use crate::map::{Connections, MapData, MapHandle, MapId, Tile, WorldSet};

    pub(crate) const COLLISION_SHIFT: u16 = 10;

    /// Builds a map whose collision values come from a row-major byte grid.
    pub(crate) fn collision_map(
        id: MapId,
        handle: MapHandle,
        width: u32,
        height: u32,
        collision: &[u8],
        connections: Connections,
    ) -> MapData {
        assert_eq!(collision.len(), (width * height) as usize);
        let tiles = collision
            .iter()
            .enumerate()
            .map(|(index, &value)| {
                let x = index as u32 % width;
                let y = index as u32 / width;
                Tile::from_raw(u16::from(value) << COLLISION_SHIFT, x, y, handle)
            })
            .collect();
        MapData::new(id, width, height, connections, tiles)
    }

    /// Builds a world of fully walkable maps plus their connection records.
    pub(crate) fn open_world(
        maps: &[(MapId, u32, u32, Connections)],
    ) -> (WorldSet, Vec<MapHandle>) {
        let mut world = WorldSet::new();
        let mut handles = Vec::new();
        for &(id, width, height, connections) in maps {
            let collision = vec![0; (width * height) as usize];
            handles.push(world.insert_with(|handle| {
                collision_map(id, handle, width, height, &collision, connections)
            }));
        }
        (world, handles)
    }
}
