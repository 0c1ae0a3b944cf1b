use std::cmp::Ordering;
use std::collections::BinaryHeap;

use bit_set::BitSet;
use log::{debug, trace, warn};
use smallvec::SmallVec;

use crate::cells::{Cartesian2DCoordinate, CompassPrimary};
use crate::grid::Grid;
use crate::utils;
use crate::utils::FnvHashMap;

/// A frontier entry. Ordered so the std max-heap pops the lowest `f`, and among equal `f`
/// the cell that joined the open set first.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
struct OpenEntry {
    f: u32,
    seq: u64,
    index: usize,
    coord: Cartesian2DCoordinate,
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &OpenEntry) -> Ordering {
        other.f.cmp(&self.f).then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &OpenEntry) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// The A* open set.
///
/// A cell keeps the sequence number it was given when it first joined, even if its cost
/// later improves, which is what makes the tie-break "first inserted wins". Improving a
/// cell pushes a fresh heap entry; the superseded one is skipped when it surfaces.
struct Frontier {
    heap: BinaryHeap<OpenEntry>,
    members: Vec<Option<(u64, u32)>>, // (seq, f) of each cell currently open
    next_seq: u64,
}

impl Frontier {
    fn with_capacity(cells_count: usize) -> Frontier {
        Frontier {
            heap: BinaryHeap::with_capacity(cells_count),
            members: vec![None; cells_count],
            next_seq: 0,
        }
    }

    fn upsert(&mut self, index: usize, coord: Cartesian2DCoordinate, f: u32) {
        let seq = match self.members[index] {
            Some((seq, _)) => seq,
            None => {
                let seq = self.next_seq;
                self.next_seq += 1;
                seq
            }
        };
        self.members[index] = Some((seq, f));
        self.heap.push(OpenEntry { f, seq, index, coord });
    }

    fn pop(&mut self) -> Option<(usize, Cartesian2DCoordinate)> {
        while let Some(entry) = self.heap.pop() {
            if self.members[entry.index] == Some((entry.seq, entry.f)) {
                self.members[entry.index] = None;
                return Some((entry.index, entry.coord));
            }
        }
        None
    }
}

/// Find the shortest route from the top left cell to the bottom right cell with A*.
///
/// Any state left by a previous solve is cleared first. Every cell taken off the open set
/// is flagged `explored`; on success every cell of the route, both ends included, is
/// flagged `on_shortest_path` and the route is returned start first.
///
/// Moves cost 1 and may only pass through carved passages. The precomputed Manhattan
/// distance is the heuristic, so the route found is a shortest one. When several frontier
/// cells share the lowest `f = g + h` the one that joined the frontier earliest is expanded,
/// and neighbours are considered North, South, West, East, so the explored set is fully
/// determined by the maze.
///
/// Returns None when the goal cannot be reached.
pub fn solve(grid: &mut Grid) -> Option<Vec<Cartesian2DCoordinate>> {
    grid.reset_search_state();

    let start = grid.start();
    let goal = grid.goal();
    let cells_count = grid.size();
    let mut frontier = Frontier::with_capacity(cells_count);
    let mut closed = BitSet::with_capacity(cells_count);

    {
        let start_cell = grid.cell_mut(start)?;
        start_cell.g = Some(0);
        let f = start_cell.h;
        frontier.upsert(0, start, f);
    }

    let mut expanded = 0;
    while let Some((index, current)) = frontier.pop() {

        closed.insert(index);
        expanded += 1;
        let current_g = {
            let cell = grid.cell_mut(current)?;
            cell.explored = true;
            trace!("expanding {:?} g: {:?} h: {}", current, cell.g, cell.h);
            cell.g?
        };

        if current == goal {
            let path = mark_path_from(grid, goal);
            debug!("solved {}x{} grid: path of {} cells, {} cells explored",
                   grid.width(), grid.height(), path.len(), expanded);
            return Some(path);
        }

        for dir in CompassPrimary::ALL.iter() {
            // out of bounds and walled off exits both come back as None
            let neighbour = match grid.linked_neighbour(current, *dir) {
                Some(coord) => coord,
                None => continue,
            };
            let neighbour_index = grid.grid_coordinate_to_index(neighbour)?;
            if closed.contains(neighbour_index) {
                continue;
            }

            let new_g = current_g + 1;
            let cell = grid.cell_mut(neighbour)?;
            if cell.g.map_or(true, |g| new_g < g) {
                cell.g = Some(new_g);
                cell.parent = Some(current);
                frontier.upsert(neighbour_index, neighbour, new_g + cell.h);
            }
        }
    }

    warn!("no route from {:?} to {:?}, {} cells explored", start, goal, expanded);
    None
}

/// Walk the parent links back from `end`, flagging each cell as on the shortest path.
fn mark_path_from(grid: &mut Grid, end: Cartesian2DCoordinate) -> Vec<Cartesian2DCoordinate> {
    let start = grid.start();
    let mut path = vec![];
    let mut current = Some(end);
    while let Some(coord) = current {
        let cell = match grid.cell_mut(coord) {
            Some(cell) => cell,
            None => break,
        };
        cell.on_shortest_path = true;
        path.push(coord);
        current = if coord == start { None } else { cell.parent };
    }
    path.reverse();
    path
}

/// Breadth first step counts from one cell to every cell reachable through passages.
///
/// Every move costs the same, so the first time a cell is reached is by a shortest route
/// and the frontier never needs revisiting.
#[derive(Debug, Clone)]
pub struct Distances {
    start_coordinate: Cartesian2DCoordinate,
    distances: FnvHashMap<Cartesian2DCoordinate, u32>,
    max_distance: u32,
}

impl Distances {
    pub fn new(grid: &Grid, start_coordinate: Cartesian2DCoordinate) -> Option<Distances> {

        if !grid.is_valid_coordinate(start_coordinate) {
            return None;
        }

        let mut max = 0;
        let mut distances = utils::fnv_hashmap(grid.size());
        distances.insert(start_coordinate, 0);

        let mut frontier = vec![start_coordinate];
        while !frontier.is_empty() {

            let mut new_frontier = vec![];
            for cell_coord in &frontier {

                let distance_to_cell = distances[cell_coord];
                if distance_to_cell > max {
                    max = distance_to_cell;
                }

                for link_coordinate in grid.links(*cell_coord)?.iter() {
                    if !distances.contains_key(link_coordinate) {
                        distances.insert(*link_coordinate, distance_to_cell + 1);
                        new_frontier.push(*link_coordinate);
                    }
                }
            }
            frontier = new_frontier;
        }

        Some(Distances {
            start_coordinate,
            distances,
            max_distance: max,
        })
    }

    #[inline(always)]
    pub fn start(&self) -> Cartesian2DCoordinate {
        self.start_coordinate
    }

    #[inline(always)]
    pub fn max(&self) -> u32 {
        self.max_distance
    }

    /// None for cells that cannot be reached, or are not on the grid.
    #[inline(always)]
    pub fn distance_from_start_to(&self, coord: Cartesian2DCoordinate) -> Option<u32> {
        self.distances.get(&coord).cloned()
    }

    pub fn furthest_points_on_grid(&self) -> SmallVec<[Cartesian2DCoordinate; 8]> {
        let furthest_distance = self.max();
        let mut furthest = self.distances
            .iter()
            .filter(|&(_, distance)| *distance == furthest_distance)
            .map(|(coord, _)| *coord)
            .collect::<SmallVec<[Cartesian2DCoordinate; 8]>>();
        furthest.sort();
        furthest
    }
}
