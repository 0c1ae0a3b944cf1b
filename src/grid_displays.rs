use std::fmt;

use crate::cells::{Cartesian2DCoordinate, CompassPrimary};
use crate::grid::Grid;
use crate::pathing::Distances;

pub trait GridDisplay {
    /// Render the contents of a grid cell as text.
    /// The String should be 3 glyphs long, padded if required.
    fn render_cell_body(&self, _: &Grid, _: Cartesian2DCoordinate) -> String {
        String::from("   ")
    }
}

/// Marks every cell the solver expanded.
#[derive(Debug, Copy, Clone)]
pub struct ExploredDisplay;

impl GridDisplay for ExploredDisplay {
    fn render_cell_body(&self, grid: &Grid, coord: Cartesian2DCoordinate) -> String {
        match grid.cell(coord) {
            Some(cell) if cell.explored() => String::from(" ░ "),
            _ => String::from("   "),
        }
    }
}

/// Marks the solver's shortest route, with the entrance and exit labelled.
#[derive(Debug, Copy, Clone)]
pub struct PathDisplay;

impl GridDisplay for PathDisplay {
    fn render_cell_body(&self, grid: &Grid, coord: Cartesian2DCoordinate) -> String {
        let on_path = grid.cell(coord).map_or(false, |cell| cell.on_shortest_path());
        if !on_path {
            String::from("   ")
        } else if coord == grid.start() {
            String::from(" S ")
        } else if coord == grid.goal() {
            String::from(" E ")
        } else {
            String::from(" . ")
        }
    }
}

impl GridDisplay for Distances {
    fn render_cell_body(&self, _: &Grid, coord: Cartesian2DCoordinate) -> String {
        if let Some(d) = self.distance_from_start_to(coord) {
            // centre align, padding 3, lowercase hexadecimal
            format!("{:^3x}", d)
        } else {
            String::from("   ")
        }
    }
}

/// A grid drawn with box drawing characters, optionally filling each cell's body from a
/// `GridDisplay`.
pub struct Rendered<'a> {
    grid: &'a Grid,
    display: Option<&'a dyn GridDisplay>,
}

impl<'a> Rendered<'a> {
    pub fn new(grid: &'a Grid, display: Option<&'a dyn GridDisplay>) -> Rendered<'a> {
        Rendered { grid, display }
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&Rendered::new(self, None), f)
    }
}

impl<'a> fmt::Display for Rendered<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        const WALL_L: &str = "╴";
        const WALL_R: &str = "╶";
        const WALL_U: &str = "╵";
        const WALL_D: &str = "╷";
        const WALL_LR_3: &str = "───";
        const WALL_LR: &str = "─";
        const WALL_UD: &str = "│";
        const WALL_LD: &str = "┐";
        const WALL_RU: &str = "└";
        const WALL_LU: &str = "┘";
        const WALL_RD: &str = "┌";
        const WALL_LRU: &str = "┴";
        const WALL_LRD: &str = "┬";
        const WALL_LRUD: &str = "┼";
        const WALL_RUD: &str = "├";
        const WALL_LUD: &str = "┤";
        let default_cell_body = String::from("   ");

        let grid = self.grid;
        let columns_count = grid.width();
        let rows_count = grid.height();

        // Start by special case rendering the text for the north most boundary
        let mut output = String::from(WALL_RD);
        if let Some(first_grid_row) = grid.iter_row().next() {
            for (index, coord) in first_grid_row.iter().enumerate() {
                output.push_str(WALL_LR_3);
                let is_east_open = grid.is_neighbour_linked(*coord, CompassPrimary::East);
                if is_east_open {
                    output.push_str(WALL_LR);
                } else if index == (columns_count - 1) {
                    output.push_str(WALL_LD);
                } else {
                    output.push_str(WALL_LRD);
                }
            }
        }
        output.push('\n');

        for (index_row, row) in grid.iter_row().enumerate() {

            let is_last_row = index_row == (rows_count - 1);

            // Starts of by special case rendering the west most boundary of the row
            // The top section of the cell is done by the previous row.
            let mut row_middle_section_render = String::from(WALL_UD);
            let mut row_bottom_section_render = String::new();

            for (index_column, cell_coord) in row.into_iter().enumerate() {

                let is_first_column = index_column == 0;
                let is_last_column = index_column == (columns_count - 1);
                let east_open = grid.is_neighbour_linked(cell_coord, CompassPrimary::East);
                let south_open = grid.is_neighbour_linked(cell_coord, CompassPrimary::South);

                // Each cell will simply use the southern wall of the cell above
                // it as its own northern wall, so we only need to worry about the cell’s body (room space),
                // its eastern boundary ('|'), and its southern boundary ('---+') minus the south west corner.
                let east_boundary = if east_open { " " } else { WALL_UD };

                // Cell Body
                if let Some(displayer) = self.display {
                    row_middle_section_render.push_str(&displayer.render_cell_body(grid, cell_coord));
                } else {
                    row_middle_section_render.push_str(&default_cell_body);
                }

                row_middle_section_render.push_str(east_boundary);

                if is_first_column {
                    row_bottom_section_render = if is_last_row {
                        String::from(WALL_RU)
                    } else if south_open {
                        String::from(WALL_UD)
                    } else {
                        String::from(WALL_RUD)
                    };
                }
                let south_boundary = if south_open { "   " } else { WALL_LR_3 };
                row_bottom_section_render.push_str(south_boundary);

                let corner = match (is_last_row, is_last_column) {
                    (true, true) => WALL_LU,
                    (true, false) => if east_open { WALL_LR } else { WALL_LRU },
                    (false, true) => if south_open { WALL_UD } else { WALL_LUD },
                    (false, false) => {
                        let access_se_from_east =
                            grid.neighbour_at_direction(cell_coord, CompassPrimary::East)
                                .map_or(false,
                                        |c| grid.is_neighbour_linked(c, CompassPrimary::South));
                        let access_se_from_south =
                            grid.neighbour_at_direction(cell_coord, CompassPrimary::South)
                                .map_or(false,
                                        |c| grid.is_neighbour_linked(c, CompassPrimary::East));
                        let show_right_section = !access_se_from_east;
                        let show_down_section = !access_se_from_south;
                        let show_up_section = !east_open;
                        let show_left_section = !south_open;

                        match (show_left_section,
                               show_right_section,
                               show_up_section,
                               show_down_section) {
                            (true, true, true, true) => WALL_LRUD,
                            (true, true, true, false) => WALL_LRU,
                            (true, true, false, true) => WALL_LRD,
                            (true, false, true, true) => WALL_LUD,
                            (false, true, true, true) => WALL_RUD,
                            (true, true, false, false) => WALL_LR,
                            (false, false, true, true) => WALL_UD,
                            (false, true, true, false) => WALL_RU,
                            (true, false, false, true) => WALL_LD,
                            (true, false, true, false) => WALL_LU,
                            (false, true, false, true) => WALL_RD,
                            (true, false, false, false) => WALL_L,
                            (false, true, false, false) => WALL_R,
                            (false, false, true, false) => WALL_U,
                            (false, false, false, true) => WALL_D,
                            _ => " ",
                        }
                    }
                };

                row_bottom_section_render.push_str(corner);
            }

            output.push_str(&row_middle_section_render);
            output.push('\n');
            output.push_str(&row_bottom_section_render);
            output.push('\n');
        }

        write!(f, "{}", output)
    }
}

/// The plain `+---+` layout used for text file exports.
///
/// Each row draws its north walls then its west walls; the east edge of a row comes from
/// the last cell's east wall and the south edge of the maze is always closed.
pub fn plain_text_layout(grid: &Grid) -> String {
    let mut output = String::from("Generated Maze:\n");

    for row in grid.iter_row() {
        for coord in &row {
            output.push('+');
            let north_wall = grid.cell(*coord).map_or(true, |c| c.has_wall(CompassPrimary::North));
            output.push_str(if north_wall { "---" } else { "   " });
        }
        output.push_str("+\n");

        for coord in &row {
            let west_wall = grid.cell(*coord).map_or(true, |c| c.has_wall(CompassPrimary::West));
            output.push(if west_wall { '|' } else { ' ' });
            output.push_str("   ");
        }
        let east_edge = row.last()
            .and_then(|coord| grid.cell(*coord))
            .map_or(true, |c| c.has_wall(CompassPrimary::East));
        if east_edge {
            output.push('|');
        }
        output.push('\n');
    }

    for _ in 0..grid.width() {
        output.push_str("+---");
    }
    output.push_str("+\n");
    output
}
