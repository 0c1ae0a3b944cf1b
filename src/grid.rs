use std::error::Error;
use std::fmt;

use crate::cells::{Cartesian2DCoordinate, CompassPrimary, CoordinateSmallVec, SquareCell};
use crate::grid_iterators::{CellIter, LinksIter, RowIter};
use crate::units::{EdgesCount, Height, NodesCount, Width};

/// A rectangular maze: every cell's walls plus the generation and search bookkeeping.
///
/// The grid is the one mutable structure in a maze's life. The generator carves it,
/// then the solver annotates it; callers read it through `cell` and the iterators.
#[derive(Clone)]
pub struct Grid {
    cells: Vec<SquareCell>,
    width: Width,
    height: Height,
}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum GridError {
    ZeroDimension,
    /// Coordinates are stored as u32, so neither side may exceed u32::MAX cells.
    TooLarge,
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            GridError::ZeroDimension => write!(f, "grid width and height must both be positive"),
            GridError::TooLarge => write!(f, "grid dimensions do not fit 32 bit coordinates"),
        }
    }
}

impl Error for GridError {}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum CellLinkError {
    InvalidGridCoordinate,
    SelfLink,
    NotAdjacent,
}

impl fmt::Display for CellLinkError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            CellLinkError::InvalidGridCoordinate => write!(f, "coordinate is outside the grid"),
            CellLinkError::SelfLink => write!(f, "a cell cannot be linked to itself"),
            CellLinkError::NotAdjacent => write!(f, "only adjacent cells can be linked"),
        }
    }
}

impl Error for CellLinkError {}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Grid :: width: {:?}, height: {:?}, links: {:?}",
               self.width.0, self.height.0, self.links_count())
    }
}

impl Grid {
    /// A fully walled in grid with every cell unvisited and the heuristic towards the
    /// bottom right goal cell precomputed.
    pub fn new(width: Width, height: Height) -> Result<Grid, GridError> {
        let (Width(w), Height(h)) = (width, height);
        if w == 0 || h == 0 {
            return Err(GridError::ZeroDimension);
        }
        if w > u32::MAX as usize || h > u32::MAX as usize {
            return Err(GridError::TooLarge);
        }

        let goal = Cartesian2DCoordinate::new((w - 1) as u32, (h - 1) as u32);
        let cells = CellIter::new(width, height)
            .map(|coord| SquareCell::new(coord.manhattan_distance(goal)))
            .collect();

        Ok(Grid { cells, width, height })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width.0
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height.0
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.cells.len()
    }

    /// The solver's entrance, top left.
    #[inline]
    pub fn start(&self) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate::new(0, 0)
    }

    /// The solver's exit, bottom right.
    #[inline]
    pub fn goal(&self) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate::new((self.width.0 - 1) as u32, (self.height.0 - 1) as u32)
    }

    /// Number of carved passages between adjacent cells.
    pub fn links_count(&self) -> usize {
        self.iter_links().count()
    }

    /// Cells and passages viewed as an undirected graph.
    pub fn graph_size(&self) -> (NodesCount, EdgesCount) {
        (NodesCount(self.size()), EdgesCount(self.links_count()))
    }

    #[inline]
    pub fn cell(&self, coord: Cartesian2DCoordinate) -> Option<&SquareCell> {
        let index = self.grid_coordinate_to_index(coord)?;
        Some(&self.cells[index])
    }

    #[inline]
    pub(crate) fn cell_mut(&mut self, coord: Cartesian2DCoordinate) -> Option<&mut SquareCell> {
        let index = self.grid_coordinate_to_index(coord)?;
        Some(&mut self.cells[index])
    }

    /// Remove the wall between two adjacent cells, on both sides.
    /// Linking cells that are already linked is fine.
    pub fn link(&mut self,
                a: Cartesian2DCoordinate,
                b: Cartesian2DCoordinate)
                -> Result<(), CellLinkError> {
        if a == b {
            return Err(CellLinkError::SelfLink);
        }
        match (self.grid_coordinate_to_index(a), self.grid_coordinate_to_index(b)) {
            (Some(a_index), Some(b_index)) => {
                let dir = CompassPrimary::between(a, b).ok_or(CellLinkError::NotAdjacent)?;
                self.cells[a_index].walls.remove(dir);
                self.cells[b_index].walls.remove(dir.opposite());
                Ok(())
            }
            _ => Err(CellLinkError::InvalidGridCoordinate),
        }
    }

    /// Are two cells in the grid linked?
    pub fn is_linked(&self, a: Cartesian2DCoordinate, b: Cartesian2DCoordinate) -> bool {
        match (self.cell(a), self.is_valid_coordinate(b), CompassPrimary::between(a, b)) {
            (Some(cell), true, Some(dir)) => !cell.has_wall(dir),
            _ => false,
        }
    }

    pub fn is_neighbour_linked(&self, coord: Cartesian2DCoordinate, direction: CompassPrimary) -> bool {
        self.linked_neighbour(coord, direction).is_some()
    }

    /// The neighbour in `direction` if there is no wall in the way.
    pub fn linked_neighbour(&self,
                            coord: Cartesian2DCoordinate,
                            direction: CompassPrimary)
                            -> Option<Cartesian2DCoordinate> {
        let cell = self.cell(coord)?;
        if cell.has_wall(direction) {
            None
        } else {
            self.neighbour_at_direction(coord, direction)
        }
    }

    /// Cells that are linked to a particular cell by a passage.
    pub fn links(&self, coord: Cartesian2DCoordinate) -> Option<CoordinateSmallVec> {
        if !self.is_valid_coordinate(coord) {
            return None;
        }
        Some(CompassPrimary::ALL
            .iter()
            .filter_map(|dir| self.linked_neighbour(coord, *dir))
            .collect())
    }

    pub fn neighbour_at_direction(&self,
                                  coord: Cartesian2DCoordinate,
                                  direction: CompassPrimary)
                                  -> Option<Cartesian2DCoordinate> {
        coord.offset(direction)
             .filter(|neighbour_coord| self.is_valid_coordinate(*neighbour_coord))
    }

    /// Clear everything a previous solve wrote so the grid can be solved again.
    pub fn reset_search_state(&mut self) {
        for cell in &mut self.cells {
            cell.reset_search_state();
        }
    }

    /// The path the solver marked, start first, rebuilt from the goal's parent links.
    /// None if the grid has not been solved successfully.
    pub fn shortest_path(&self) -> Option<Vec<Cartesian2DCoordinate>> {
        let mut current = self.goal();
        let mut path = vec![];
        loop {
            let cell = self.cell(current)?;
            if !cell.on_shortest_path() {
                return None;
            }
            path.push(current);
            if current == self.start() {
                break;
            }
            current = cell.parent()?;
        }
        path.reverse();
        Some(path)
    }

    /// Convert a grid coordinate to a one dimensional index in the range 0..grid.size().
    /// Returns None if the grid coordinate is invalid.
    #[inline]
    pub fn grid_coordinate_to_index(&self, coord: Cartesian2DCoordinate) -> Option<usize> {
        if self.is_valid_coordinate(coord) {
            Some(coord.y as usize * self.width.0 + coord.x as usize)
        } else {
            None
        }
    }

    /// Is the grid coordinate valid for this grid - within the grid's dimensions
    #[inline]
    pub fn is_valid_coordinate(&self, coord: Cartesian2DCoordinate) -> bool {
        (coord.x as usize) < self.width.0 && (coord.y as usize) < self.height.0
    }

    #[inline]
    pub fn iter(&self) -> CellIter {
        CellIter::new(self.width, self.height)
    }

    #[inline]
    pub fn iter_row(&self) -> RowIter {
        RowIter::new(self.width, self.height)
    }

    pub fn iter_links(&self) -> LinksIter {
        LinksIter::new(self)
    }
}

#[cfg(test)]
mod tests {

    use itertools::Itertools; // a trait
    use smallvec::SmallVec;

    use super::*;
    use crate::cells::Walls;

    fn small_grid(w: usize, h: usize) -> Grid {
        Grid::new(Width(w), Height(h)).expect("grid dimensions are valid")
    }

    // Compare a smallvec to e.g. a vec! or &[T].
    macro_rules! assert_smallvec_eq {
        ($x:expr, $y:expr) => (assert_eq!(&*$x, &*$y))
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        assert_eq!(Grid::new(Width(0), Height(3)).err(), Some(GridError::ZeroDimension));
        assert_eq!(Grid::new(Width(3), Height(0)).err(), Some(GridError::ZeroDimension));
        assert_eq!(Grid::new(Width(0), Height(0)).err(), Some(GridError::ZeroDimension));
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn oversized_dimensions_are_rejected() {
        let too_big = u32::MAX as usize + 1;
        assert_eq!(Grid::new(Width(too_big), Height(1)).err(), Some(GridError::TooLarge));
        assert_eq!(Grid::new(Width(1), Height(too_big)).err(), Some(GridError::TooLarge));
    }

    #[test]
    fn fresh_grid_state() {
        let g = small_grid(4, 3);
        assert_eq!(g.size(), 12);
        assert_eq!(g.width(), 4);
        assert_eq!(g.height(), 3);
        assert_eq!(g.links_count(), 0);
        assert_eq!(g.goal(), Cartesian2DCoordinate::new(3, 2));
        for coord in g.iter() {
            let cell = g.cell(coord).unwrap();
            assert!(!cell.is_visited());
            assert_eq!(cell.walls(), Walls::all_standing());
            assert_eq!(cell.g(), None);
            assert_eq!(cell.parent(), None);
            assert_eq!(cell.h(), coord.manhattan_distance(g.goal()));
        }
        assert_eq!(g.cell(Cartesian2DCoordinate::new(0, 0)).unwrap().h(), 5);
        assert_eq!(g.cell(Cartesian2DCoordinate::new(3, 2)).unwrap().h(), 0);
    }

    #[test]
    fn neighbour_cells() {
        let g = small_grid(10, 10);

        let check_expected_neighbours = |coord: Cartesian2DCoordinate,
                                         expected_neighbours: &[Cartesian2DCoordinate]| {
            let node_indices: Vec<Cartesian2DCoordinate> = CompassPrimary::ALL.iter()
                .filter_map(|dir| g.neighbour_at_direction(coord, *dir))
                .sorted()
                .collect();
            let expected_indices: Vec<Cartesian2DCoordinate> = expected_neighbours.iter()
                .cloned()
                .sorted()
                .collect();
            assert_eq!(node_indices, expected_indices);
        };
        let gc = |x, y| Cartesian2DCoordinate::new(x, y);

        // corners
        check_expected_neighbours(gc(0, 0), &[gc(1, 0), gc(0, 1)]);
        check_expected_neighbours(gc(9, 0), &[gc(8, 0), gc(9, 1)]);
        check_expected_neighbours(gc(0, 9), &[gc(0, 8), gc(1, 9)]);
        check_expected_neighbours(gc(9, 9), &[gc(9, 8), gc(8, 9)]);

        // side element examples
        check_expected_neighbours(gc(1, 0), &[gc(0, 0), gc(1, 1), gc(2, 0)]);
        check_expected_neighbours(gc(0, 1), &[gc(0, 0), gc(0, 2), gc(1, 1)]);
        check_expected_neighbours(gc(9, 8), &[gc(9, 7), gc(9, 9), gc(8, 8)]);

        // Some place with 4 neighbours inside the grid
        check_expected_neighbours(gc(1, 1), &[gc(0, 1), gc(1, 0), gc(2, 1), gc(1, 2)]);
    }

    #[test]
    fn neighbour_at_each_direction() {
        let g = small_grid(2, 2);
        let gc = |x, y| Cartesian2DCoordinate::new(x, y);

        assert_eq!(g.neighbour_at_direction(gc(0, 0), CompassPrimary::West), None);
        assert_eq!(g.neighbour_at_direction(gc(0, 0), CompassPrimary::North), None);
        assert_eq!(g.neighbour_at_direction(gc(0, 0), CompassPrimary::East), Some(gc(1, 0)));
        assert_eq!(g.neighbour_at_direction(gc(0, 0), CompassPrimary::South), Some(gc(0, 1)));
        assert_eq!(g.neighbour_at_direction(gc(1, 1), CompassPrimary::South), None);
        assert_eq!(g.neighbour_at_direction(gc(1, 1), CompassPrimary::East), None);
        assert_eq!(g.neighbour_at_direction(gc(1, 1), CompassPrimary::West), Some(gc(0, 1)));
        assert_eq!(g.neighbour_at_direction(gc(1, 1), CompassPrimary::North), Some(gc(1, 0)));
    }

    #[test]
    fn grid_coordinate_as_index() {
        let g = small_grid(3, 3);
        let gc = |x, y| Cartesian2DCoordinate::new(x, y);
        let coords = &[gc(0, 0), gc(1, 0), gc(2, 0), gc(0, 1), gc(1, 1), gc(2, 1), gc(0, 2),
                       gc(1, 2), gc(2, 2)];
        let indices: Vec<Option<usize>> = coords.iter()
            .map(|coord| g.grid_coordinate_to_index(*coord))
            .collect();
        let expected = (0..9).map(Some).collect::<Vec<Option<usize>>>();
        assert_eq!(expected, indices);

        assert_eq!(g.grid_coordinate_to_index(gc(2, 3)), None);
        assert_eq!(g.grid_coordinate_to_index(gc(3, 2)), None);
        assert_eq!(g.grid_coordinate_to_index(gc(u32::MAX, u32::MAX)), None);
    }

    #[test]
    fn linking_cells() {
        let mut g = small_grid(4, 4);
        let a = Cartesian2DCoordinate::new(0, 1);
        let b = Cartesian2DCoordinate::new(0, 2);
        let c = Cartesian2DCoordinate::new(0, 3);

        let sorted_links = |grid: &Grid, coord| -> Vec<Cartesian2DCoordinate> {
            grid.links(coord).expect("coordinate is invalid").iter().cloned().sorted().collect()
        };

        // Testing that the order of the arguments to `is_linked` does not matter
        macro_rules! bi_check_linked {
            ($x:expr, $y:expr) => (g.is_linked($x, $y) && g.is_linked($y, $x))
        }

        let directional_links_check = |grid: &Grid,
                                       coord: Cartesian2DCoordinate,
                                       expected_dirs_linked: &[CompassPrimary]| {
            let expected_complement: SmallVec<[CompassPrimary; 4]> = CompassPrimary::ALL.iter()
                .cloned()
                .filter(|dir: &CompassPrimary| !expected_dirs_linked.contains(dir))
                .collect();
            for exp_dir in expected_dirs_linked {
                assert!(grid.is_neighbour_linked(coord, *exp_dir));
            }
            for not_exp_dir in expected_complement.iter() {
                assert!(!grid.is_neighbour_linked(coord, *not_exp_dir));
            }
        };

        assert!(!bi_check_linked!(a, b));
        assert!(!bi_check_linked!(b, c));
        assert!(sorted_links(&g, a).is_empty());
        directional_links_check(&g, a, &[]);

        g.link(a, b).expect("link failed");
        assert!(bi_check_linked!(a, b));
        assert_eq!(sorted_links(&g, a), vec![b]);
        assert_eq!(sorted_links(&g, b), vec![a]);
        directional_links_check(&g, a, &[CompassPrimary::South]);
        directional_links_check(&g, b, &[CompassPrimary::North]);
        directional_links_check(&g, c, &[]);

        g.link(c, b).expect("link failed");
        assert!(bi_check_linked!(a, b));
        assert!(bi_check_linked!(b, c));
        assert!(!bi_check_linked!(a, c));
        assert_eq!(sorted_links(&g, b), vec![a, c]);
        directional_links_check(&g, b, &[CompassPrimary::North, CompassPrimary::South]);
        directional_links_check(&g, c, &[CompassPrimary::North]);
        assert_eq!(g.links_count(), 2);
    }

    #[test]
    fn link_removes_both_sides_of_the_wall() {
        let mut g = small_grid(2, 1);
        let west = Cartesian2DCoordinate::new(0, 0);
        let east = Cartesian2DCoordinate::new(1, 0);
        g.link(east, west).expect("link failed");
        assert!(!g.cell(west).unwrap().has_wall(CompassPrimary::East));
        assert!(!g.cell(east).unwrap().has_wall(CompassPrimary::West));
        assert!(g.cell(west).unwrap().has_wall(CompassPrimary::West));
        assert!(g.cell(east).unwrap().has_wall(CompassPrimary::East));
    }

    #[test]
    fn no_self_linked_cycles() {
        let mut g = small_grid(4, 4);
        let a = Cartesian2DCoordinate::new(0, 0);
        assert_eq!(g.link(a, a), Err(CellLinkError::SelfLink));
    }

    #[test]
    fn no_links_to_invalid_coordinates() {
        let mut g = small_grid(4, 4);
        let good_coord = Cartesian2DCoordinate::new(3, 3);
        let invalid_coord = Cartesian2DCoordinate::new(4, 3);
        assert_eq!(g.link(good_coord, invalid_coord),
                   Err(CellLinkError::InvalidGridCoordinate));
        assert!(g.cell(good_coord).unwrap().has_wall(CompassPrimary::East));
    }

    #[test]
    fn no_links_between_distant_cells() {
        let mut g = small_grid(4, 4);
        let a = Cartesian2DCoordinate::new(0, 0);
        let b = Cartesian2DCoordinate::new(1, 1);
        assert_eq!(g.link(a, b), Err(CellLinkError::NotAdjacent));
        assert_eq!(g.links_count(), 0);
    }

    #[test]
    fn duplicate_links_are_idempotent() {
        let mut g = small_grid(4, 4);
        let a = Cartesian2DCoordinate::new(0, 0);
        let b = Cartesian2DCoordinate::new(0, 1);
        g.link(a, b).expect("link failed");
        g.link(a, b).expect("link failed");
        assert_smallvec_eq!(g.links(a).unwrap(), &[b]);
        assert_smallvec_eq!(g.links(b).unwrap(), &[a]);
        assert_eq!(g.links_count(), 1);
    }

    #[test]
    fn unsolved_grid_has_no_shortest_path() {
        let g = small_grid(3, 3);
        assert_eq!(g.shortest_path(), None);
    }
}
