use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::cells::{Cartesian2DCoordinate, CompassPrimary};
use crate::grid::{CellLinkError, Grid};

/// One suspended step of the depth first walk: the cell, its shuffled exits and how many
/// of them have been tried so far.
#[derive(Debug)]
struct Frame {
    coord: Cartesian2DCoordinate,
    directions: [CompassPrimary; 4],
    next_direction: usize,
}

impl Frame {
    fn enter<R: Rng + ?Sized>(coord: Cartesian2DCoordinate, rng: &mut R) -> Frame {
        let mut directions = CompassPrimary::ALL;
        directions.shuffle(rng);
        Frame {
            coord,
            directions,
            next_direction: 0,
        }
    }
}

/// Apply the recursive backtracker maze generation algorithm to a fresh grid, starting at
/// `start`.
///
/// Each cell entered is marked visited and its four exits are tried in a random order.
/// The first exit leading to an unvisited cell gets its wall knocked down and the walk
/// carries on from that neighbour, only coming back to try the remaining exits once
/// everything beyond it is carved. Every cell is entered exactly once so the passages form
/// a spanning tree: a perfect maze.
///
/// The walk keeps its own stack of frames instead of recursing, a long snaking corridor
/// goes as deep as the grid has cells. The rng is consumed exactly as the recursive
/// version would consume it, so a seeded rng always yields the same maze.
///
/// Returns an error, leaving the grid untouched, if `start` is not on the grid.
pub fn carve<R: Rng + ?Sized>(grid: &mut Grid,
                              start: Cartesian2DCoordinate,
                              rng: &mut R)
                              -> Result<(), CellLinkError> {

    grid.cell_mut(start).ok_or(CellLinkError::InvalidGridCoordinate)?.visited = true;

    let mut passages = 0;
    let mut stack = vec![Frame::enter(start, rng)];
    while let Some(frame) = stack.last_mut() {

        if frame.next_direction == frame.directions.len() {
            stack.pop();
            continue;
        }
        let current = frame.coord;
        let direction = frame.directions[frame.next_direction];
        frame.next_direction += 1;

        let unvisited_neighbour = grid.neighbour_at_direction(current, direction)
            .filter(|coord| grid.cell(*coord).map_or(false, |cell| !cell.is_visited()));

        if let Some(next) = unvisited_neighbour {
            grid.link(current, next)?;
            passages += 1;
            if let Some(cell) = grid.cell_mut(next) {
                cell.visited = true;
            }
            stack.push(Frame::enter(next, rng));
        }
    }

    debug!("carved {} passages into a {}x{} grid from {:?}",
           passages, grid.width(), grid.height(), start);
    Ok(())
}
