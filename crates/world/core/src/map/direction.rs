//! Movement directions as encoded in the game's connection and input records.

/// One of the six movement directions the game understands.
///
/// Discriminants are the wire codes used by connection records, so decoding
/// is a plain repr lookup. `Down`/`Up`/`Left`/`Right` are the cardinal grid
/// moves; `Dive` and `Emerge` are the vertical water transitions and never
/// label a walk-graph edge.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::FromRepr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[repr(u8)]
pub enum Direction {
    Down = 1,
    Up = 2,
    Left = 3,
    Right = 4,
    Dive = 5,
    Emerge = 6,
}

impl Direction {
    /// The four cardinal directions, in wire-code order.
    pub const CARDINALS: [Direction; 4] = [
        Direction::Down,
        Direction::Up,
        Direction::Left,
        Direction::Right,
    ];

    /// Decodes a connection-record direction code.
    pub fn from_code(code: u32) -> Option<Self> {
        u8::try_from(code).ok().and_then(Self::from_repr)
    }

    /// Grid offset of one step, with y growing downward. `None` for the
    /// vertical transitions, which do not move on the grid.
    pub fn delta(self) -> Option<(i32, i32)> {
        match self {
            Direction::Down => Some((0, 1)),
            Direction::Up => Some((0, -1)),
            Direction::Left => Some((-1, 0)),
            Direction::Right => Some((1, 0)),
            Direction::Dive | Direction::Emerge => None,
        }
    }

    /// True for the four grid directions.
    pub fn is_cardinal(self) -> bool {
        self.delta().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_codes_round_trip() {
        for code in 1..=6 {
            let direction = Direction::from_code(code).unwrap();
            assert_eq!(direction as u32, code);
        }
        assert_eq!(Direction::from_code(0), None);
        assert_eq!(Direction::from_code(7), None);
        assert_eq!(Direction::from_code(0x100 + 1), None);
    }

    #[test]
    fn only_cardinals_move_on_the_grid() {
        assert_eq!(Direction::Right.delta(), Some((1, 0)));
        assert_eq!(Direction::Down.delta(), Some((0, 1)));
        assert!(Direction::Dive.delta().is_none());
        assert!(!Direction::Emerge.is_cardinal());
    }
}
