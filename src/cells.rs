use smallvec::SmallVec;
use std::convert::From;

use crate::units::{ColumnIndex, RowIndex, Width};

#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct Cartesian2DCoordinate {
    pub x: u32,
    pub y: u32,
}

pub type CoordinateSmallVec = SmallVec<[Cartesian2DCoordinate; 4]>;

impl Cartesian2DCoordinate {
    pub fn new(x: u32, y: u32) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate { x, y }
    }

    #[inline]
    pub fn from_row_major_index(index: usize, width: Width) -> Cartesian2DCoordinate {
        let Width(w) = width;
        Cartesian2DCoordinate::new((index % w) as u32, (index / w) as u32)
    }

    #[inline]
    pub fn from_row_column_indices(col_index: ColumnIndex, row_index: RowIndex) -> Self {
        let (ColumnIndex(col), RowIndex(row)) = (col_index, row_index);
        Cartesian2DCoordinate::new(col as u32, row as u32)
    }

    /// Steps needed to walk from `self` to `other` ignoring walls.
    #[inline]
    pub fn manhattan_distance(&self, other: Cartesian2DCoordinate) -> u32 {
        let dx = if self.x > other.x { self.x - other.x } else { other.x - self.x };
        let dy = if self.y > other.y { self.y - other.y } else { other.y - self.y };
        dx + dy
    }

    /// Creates a new coordinate offset 1 cell away in the given direction.
    /// Returns None if the coordinate would go negative or overflow; the upper grid
    /// bounds are not known here.
    pub fn offset(&self, dir: CompassPrimary) -> Option<Cartesian2DCoordinate> {
        let (x, y) = (self.x, self.y);
        match dir {
            CompassPrimary::North => y.checked_sub(1).map(|y| Cartesian2DCoordinate { x, y }),
            CompassPrimary::South => y.checked_add(1).map(|y| Cartesian2DCoordinate { x, y }),
            CompassPrimary::West => x.checked_sub(1).map(|x| Cartesian2DCoordinate { x, y }),
            CompassPrimary::East => x.checked_add(1).map(|x| Cartesian2DCoordinate { x, y }),
        }
    }
}

impl From<(u32, u32)> for Cartesian2DCoordinate {
    fn from(x_y_pair: (u32, u32)) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate::new(x_y_pair.0, x_y_pair.1)
    }
}

/// The four ways out of a square cell. North is up the screen (towards row 0).
#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub enum CompassPrimary {
    North,
    South,
    West,
    East,
}

impl CompassPrimary {
    /// Up, down, left, right. Both the generator's pre-shuffle order and the solver's
    /// neighbour expansion order depend on this ordering.
    pub const ALL: [CompassPrimary; 4] = [CompassPrimary::North,
                                          CompassPrimary::South,
                                          CompassPrimary::West,
                                          CompassPrimary::East];

    pub fn opposite(self) -> CompassPrimary {
        match self {
            CompassPrimary::North => CompassPrimary::South,
            CompassPrimary::South => CompassPrimary::North,
            CompassPrimary::West => CompassPrimary::East,
            CompassPrimary::East => CompassPrimary::West,
        }
    }

    /// Which way to step to get from `a` to the adjacent `b`, if they are adjacent at all.
    pub fn between(a: Cartesian2DCoordinate, b: Cartesian2DCoordinate) -> Option<CompassPrimary> {
        match (i64::from(b.x) - i64::from(a.x), i64::from(b.y) - i64::from(a.y)) {
            (0, -1) => Some(CompassPrimary::North),
            (0, 1) => Some(CompassPrimary::South),
            (-1, 0) => Some(CompassPrimary::West),
            (1, 0) => Some(CompassPrimary::East),
            _ => None,
        }
    }

    #[inline]
    fn wall_index(self) -> usize {
        match self {
            CompassPrimary::North => 0,
            CompassPrimary::South => 1,
            CompassPrimary::West => 2,
            CompassPrimary::East => 3,
        }
    }
}

/// Wall presence on each side of a cell, true meaning the wall is standing.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub struct Walls([bool; 4]);

impl Walls {
    pub fn all_standing() -> Walls {
        Walls([true; 4])
    }

    #[inline]
    pub fn has_wall(&self, dir: CompassPrimary) -> bool {
        self.0[dir.wall_index()]
    }

    #[inline]
    pub(crate) fn remove(&mut self, dir: CompassPrimary) {
        self.0[dir.wall_index()] = false;
    }
}

/// One grid position: the maze walls plus the generation and search bookkeeping.
#[derive(Clone, Debug)]
pub struct SquareCell {
    pub(crate) walls: Walls,
    pub(crate) visited: bool,
    pub(crate) g: Option<u32>, // None is an infinite cost
    pub(crate) h: u32,
    pub(crate) parent: Option<Cartesian2DCoordinate>,
    pub(crate) explored: bool,
    pub(crate) on_shortest_path: bool,
}

impl SquareCell {
    pub(crate) fn new(h: u32) -> SquareCell {
        SquareCell {
            walls: Walls::all_standing(),
            visited: false,
            g: None,
            h,
            parent: None,
            explored: false,
            on_shortest_path: false,
        }
    }

    #[inline]
    pub fn walls(&self) -> Walls {
        self.walls
    }

    #[inline]
    pub fn has_wall(&self, dir: CompassPrimary) -> bool {
        self.walls.has_wall(dir)
    }

    #[inline]
    pub fn is_visited(&self) -> bool {
        self.visited
    }

    /// Cost from the solver's start cell, None until the solver reaches the cell.
    #[inline]
    pub fn g(&self) -> Option<u32> {
        self.g
    }

    /// Manhattan distance to the goal cell.
    #[inline]
    pub fn h(&self) -> u32 {
        self.h
    }

    #[inline]
    pub fn f(&self) -> Option<u32> {
        self.g.map(|g| g + self.h)
    }

    #[inline]
    pub fn parent(&self) -> Option<Cartesian2DCoordinate> {
        self.parent
    }

    #[inline]
    pub fn explored(&self) -> bool {
        self.explored
    }

    #[inline]
    pub fn on_shortest_path(&self) -> bool {
        self.on_shortest_path
    }

    pub(crate) fn reset_search_state(&mut self) {
        self.g = None;
        self.parent = None;
        self.explored = false;
        self.on_shortest_path = false;
    }
}
