//! One routing session: from two world coordinates to a pollable runner.

use std::fmt;

use tracing::debug;

use world_core::{
    DecodeError, MapId, MemoryOracle, Move, RouteError, TileRef, VertexId, WorldDecoder,
    WorldGraph, WorldSet, route_moves,
};

use crate::action::{ActionRunner, PathAction, WalkAction};

/// Errors raised while planning a route.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PlanError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// The coordinate does not name a tile of any loaded map; either it is
    /// out of bounds or its map was not reached by the connection
    /// expansion.
    #[error("no loaded tile at {point}")]
    MissingTile { point: WorldPoint },

    #[error("no path between {from} and {to}")]
    NoPath { from: WorldPoint, to: WorldPoint },

    #[error(transparent)]
    Route(#[from] RouteError),
}

/// A tile coordinate qualified by its map.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WorldPoint {
    pub map: MapId,
    pub x: u32,
    pub y: u32,
}

impl WorldPoint {
    pub fn new(map: MapId, x: u32, y: u32) -> Self {
        Self { map, x, y }
    }
}

impl fmt::Display for WorldPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "map {} ({}, {})", self.map, self.x, self.y)
    }
}

/// Tuning for the planner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlannerConfig {
    /// How many border connections out from the starting map to load.
    pub connection_depth: u32,
    /// Whether issued walk steps hold the run modifier.
    pub run: bool,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            connection_depth: 7,
            run: true,
        }
    }
}

/// Plans walking routes against a live memory image.
///
/// Owns the header-table decoder; everything else (world set, graph,
/// search record, runner) is rebuilt per [`plan`](Self::plan) call from the
/// image as it is right then, and owned by that one routing session.
#[derive(Debug)]
pub struct RoutePlanner {
    decoder: WorldDecoder,
    config: PlannerConfig,
}

impl RoutePlanner {
    pub fn new(memory: &dyn MemoryOracle, config: PlannerConfig) -> Result<Self, PlanError> {
        Ok(Self {
            decoder: WorldDecoder::new(memory)?,
            config,
        })
    }

    /// Re-resolves the header table after the memory image was reloaded.
    pub fn reload(&mut self, memory: &dyn MemoryOracle) -> Result<(), PlanError> {
        self.decoder.reload(memory)?;
        Ok(())
    }

    /// Computes the shortest walking route from `from` to `to` and wraps it
    /// in a ready-to-poll [`ActionRunner`].
    ///
    /// Maps are loaded by expanding the configured connection depth out
    /// from `from`'s map; widening that depth is the caller's remedy when a
    /// reachable-looking destination reports [`PlanError::NoPath`].
    pub fn plan(
        &self,
        memory: &dyn MemoryOracle,
        from: WorldPoint,
        to: WorldPoint,
    ) -> Result<ActionRunner, PlanError> {
        let world = self
            .decoder
            .decode_world(memory, from.map, self.config.connection_depth)?;
        let graph = WorldGraph::build(&world);
        debug!(
            maps = world.len(),
            vertices = graph.len(),
            %from,
            %to,
            "world graph built"
        );

        let src = vertex_at(&world, &graph, from)?;
        let dst = vertex_at(&world, &graph, to)?;

        let record = graph
            .shortest_path(src, dst)
            .ok_or(PlanError::NoPath { from, to })?;
        let moves = route_moves(&record, src, dst)?;
        debug!(steps = moves.len(), "route planned");

        let actions = moves
            .into_iter()
            .map(|step| {
                PathAction::Walk(WalkAction::new(Move {
                    run: self.config.run,
                    ..step
                }))
            })
            .collect();
        Ok(ActionRunner::new(actions))
    }
}

fn vertex_at(
    world: &WorldSet,
    graph: &WorldGraph,
    point: WorldPoint,
) -> Result<VertexId, PlanError> {
    let map = world
        .lookup(point.map)
        .ok_or(PlanError::MissingTile { point })?;
    let tile = TileRef {
        map,
        x: point.x,
        y: point.y,
    };
    world
        .tile(tile)
        .and_then(|_| graph.vertex_at(tile))
        .ok_or(PlanError::MissingTile { point })
}
