//! **maze_solver** carves perfect mazes with a randomized depth first walk and finds the
//! shortest route through them with A*.

pub mod cells;
pub mod generators;
pub mod grid;
pub mod grid_displays;
pub mod grid_iterators;
pub mod pathing;
pub mod units;
mod utils;
