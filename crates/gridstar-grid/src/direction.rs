use enumset::{enum_set, EnumSet, EnumSetType};

/// Compass direction of a single-cell move. North is towards row 0.
#[derive(EnumSetType, Debug, Hash)]
pub enum Direction {
    North,
    East,
    South,
    West,
    NorthWest,
    SouthEast,
    SouthWest,
    NorthEast,
}

impl Direction {
    pub const CARDINAL: EnumSet<Direction> =
        enum_set!(Direction::North | Direction::East | Direction::South | Direction::West);

    pub const DIAGONAL: EnumSet<Direction> = enum_set!(
        Direction::NorthWest | Direction::SouthEast | Direction::SouthWest | Direction::NorthEast
    );

    /// Row and column offset of the move.
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Direction::North => (-1, 0),
            Direction::East => (0, 1),
            Direction::South => (1, 0),
            Direction::West => (0, -1),
            Direction::NorthWest => (-1, -1),
            Direction::SouthEast => (1, 1),
            Direction::SouthWest => (1, -1),
            Direction::NorthEast => (-1, 1),
        }
    }

    pub fn is_diagonal(self) -> bool {
        Direction::DIAGONAL.contains(self)
    }

    pub const fn backwards(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
            Direction::NorthWest => Direction::SouthEast,
            Direction::SouthEast => Direction::NorthWest,
            Direction::SouthWest => Direction::NorthEast,
            Direction::NorthEast => Direction::SouthWest,
        }
    }
}

#[test]
fn backwards_undoes_offset() {
    for dir in EnumSet::<Direction>::all() {
        let (r, c) = dir.offset();
        let (br, bc) = dir.backwards().offset();
        assert_eq!((r + br, c + bc), (0, 0));
        assert_eq!(dir.is_diagonal(), r != 0 && c != 0);
    }
    assert_eq!(Direction::CARDINAL | Direction::DIAGONAL, EnumSet::all());
}
