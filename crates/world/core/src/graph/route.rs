//! Turning a search record into an ordered list of grid steps.

use crate::graph::{Move, SearchRecord, VertexId};

/// Errors raised while reconstructing a route from a search record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    #[error("destination was never reached by the search")]
    Unreachable,
}

/// Reconstructs the source-to-destination step sequence from a search
/// record, by walking the predecessor chain backward from `dst` until it
/// meets `src`.
///
/// The returned sequence has exactly the destination's recorded hop
/// distance. A destination without a predecessor entry (and distinct from
/// the source) was never reached, which is reported rather than returned as
/// an empty route. Pure: identical inputs give identical sequences.
pub fn route_moves(
    record: &SearchRecord,
    src: VertexId,
    dst: VertexId,
) -> Result<Vec<Move>, RouteError> {
    if src == dst {
        return Ok(Vec::new());
    }

    let mut moves = Vec::new();
    let mut current = dst;
    loop {
        let (previous, step) = record.predecessor(current).ok_or(RouteError::Unreachable)?;
        moves.push(step);
        if previous == src {
            break;
        }
        current = previous;
    }
    moves.reverse();
    Ok(moves)
}
