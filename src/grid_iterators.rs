use std::fmt;

use crate::cells::{Cartesian2DCoordinate, CompassPrimary};
use crate::grid::Grid;
use crate::units::{ColumnIndex, Height, RowIndex, Width};

/// Row major iteration over every coordinate of a grid.
#[derive(Copy, Clone)]
pub struct CellIter {
    width: Width,
    current_cell_number: usize,
    cells_count: usize,
}

impl CellIter {
    pub(crate) fn new(width: Width, height: Height) -> CellIter {
        CellIter {
            width,
            current_cell_number: 0,
            cells_count: width.0 * height.0,
        }
    }
}

impl fmt::Debug for CellIter {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f,
               "CellIter :: current_cell_number: {:?}, cells_count: {:?}",
               self.current_cell_number,
               self.cells_count)
    }
}

impl ExactSizeIterator for CellIter {} // default impl using size_hint()
impl Iterator for CellIter {
    type Item = Cartesian2DCoordinate;
    fn next(&mut self) -> Option<Self::Item> {
        if self.current_cell_number < self.cells_count {
            let coord = Cartesian2DCoordinate::from_row_major_index(self.current_cell_number,
                                                                    self.width);
            self.current_cell_number += 1;
            Some(coord)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.cells_count - self.current_cell_number;
        (remaining, Some(remaining))
    }
}

/// Iterates the grid one row at a time, top row first.
#[derive(Debug, Copy, Clone)]
pub struct RowIter {
    width: Width,
    height: Height,
    current_index: usize,
}

impl RowIter {
    pub(crate) fn new(width: Width, height: Height) -> RowIter {
        RowIter {
            width,
            height,
            current_index: 0,
        }
    }
}

impl ExactSizeIterator for RowIter {}
impl Iterator for RowIter {
    type Item = Vec<Cartesian2DCoordinate>;
    fn next(&mut self) -> Option<Self::Item> {
        let Height(rows_count) = self.height;
        if self.current_index < rows_count {
            let Width(length) = self.width;
            let coords = (0..length)
                .map(|i: usize| {
                    Cartesian2DCoordinate::from_row_column_indices(ColumnIndex(i),
                                                                   RowIndex(self.current_index))
                })
                .collect();
            self.current_index += 1;
            Some(coords)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.height.0 - self.current_index;
        (remaining, Some(remaining))
    }
}

/// Every carved passage exactly once, as (cell, neighbour to its south or east).
pub struct LinksIter<'a> {
    grid: &'a Grid,
    cells: CellIter,
    pending_south: Option<Cartesian2DCoordinate>,
}

impl<'a> LinksIter<'a> {
    pub(crate) fn new(grid: &'a Grid) -> LinksIter<'a> {
        LinksIter {
            grid,
            cells: grid.iter(),
            pending_south: None,
        }
    }
}

impl<'a> fmt::Debug for LinksIter<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "LinksIter :: cells iter : {:?}", self.cells)
    }
}

impl<'a> Iterator for LinksIter<'a> {
    type Item = (Cartesian2DCoordinate, Cartesian2DCoordinate);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(coord) = self.pending_south.take() {
                if let Some(south) = self.grid.linked_neighbour(coord, CompassPrimary::South) {
                    return Some((coord, south));
                }
            }

            let coord = self.cells.next()?;
            self.pending_south = Some(coord);
            if let Some(east) = self.grid.linked_neighbour(coord, CompassPrimary::East) {
                return Some((coord, east));
            }
        }
    }
}
