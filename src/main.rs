use docopt::Docopt;
use flexi_logger::Logger;
use log::info;
use maze_solver::{
    cells::Cartesian2DCoordinate,
    generators,
    grid::Grid,
    grid_displays::{plain_text_layout, ExploredDisplay, GridDisplay, PathDisplay, Rendered},
    pathing,
    units::{EdgesCount, Height, NodesCount, Width},
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_derive::Deserialize;
use std::{
    io,
    io::prelude::*,
    fs::File,
};

const USAGE: &str = "Maze Solver

Usage:
    maze_driver -h | --help
    maze_driver [(--grid-size=<n>|[--grid-width=<w> --grid-height=<h>])] [--seed=<s>] [--show=<overlay>] [--text-out=<path>] [--plain-out=<path>] [--save-edges=<path>]

Options:
    -h --help              Show this screen.
    --grid-size=<n>        The grid size is n * n.
    --grid-width=<w>       The grid width in a w*h grid [default: 20].
    --grid-height=<h>      The grid height in a w*h grid [default: 20].
    --seed=<s>             Seed for the maze carving random number generator. A random seed is picked and logged if not given.
    --show=<overlay>       What to draw inside the cells: blank, explored, path or distances [default: path].
    --text-out=<path>      Output file path for the box drawing rendering of the maze instead of standard output.
    --plain-out=<path>     Output file path for the walls in the plain +---+ text layout.
    --save-edges=<path>    Serialize the maze to a text file: each line is a pair of numbers. Line 1: n(#vertices) m(#edges). Line 2+ edge between vertices. Uses 1-based vertex indices.

The log level is read from RUST_LOG and defaults to info.
";

#[derive(Debug, Deserialize)]
struct MazeArgs {
    flag_grid_size: Option<usize>,
    flag_grid_width: usize,
    flag_grid_height: usize,
    flag_seed: Option<u64>,
    flag_show: Overlay,
    flag_text_out: String,
    flag_plain_out: String,
    flag_save_edges: String,
}

#[derive(Debug, Copy, Clone, Deserialize)]
enum Overlay {
    Blank,
    Explored,
    Path,
    Distances,
}

mod errors {
    use error_chain::*;
    error_chain! {

        foreign_links {
            DocOptFailure(::docopt::Error);
            Io(::std::io::Error);
            LoggerSetup(::flexi_logger::FlexiLoggerError);
            InvalidGrid(::maze_solver::grid::GridError);
            CarveFailure(::maze_solver::grid::CellLinkError);
        }
    }
}
use crate::errors::*;

fn main() -> Result<()> {

    let args: MazeArgs = Docopt::new(USAGE)
        .and_then(|d| d.deserialize())
        .unwrap_or_else(|e| e.exit());

    let _logger = Logger::try_with_env_or_str("info")?.start()?;

    let (width, height) = if let Some(square_grid_size) = args.flag_grid_size {
        (square_grid_size, square_grid_size)
    } else {
        (args.flag_grid_width, args.flag_grid_height)
    };
    let seed = args.flag_seed.unwrap_or_else(rand::random);

    let mut maze_grid = Grid::new(Width(width), Height(height))?;
    info!("carving a {}x{} maze with seed {}", width, height, seed);
    let mut rng = StdRng::seed_from_u64(seed);
    generators::carve(&mut maze_grid, Cartesian2DCoordinate::new(0, 0), &mut rng)?;

    if !args.flag_save_edges.is_empty() {
        save_maze_graph(&maze_grid, &args.flag_save_edges)?;
    }

    if !args.flag_plain_out.is_empty() {
        write_text_to_file(&plain_text_layout(&maze_grid), &args.flag_plain_out)
            .chain_err(|| format!("Failed to write maze layout to text file {}", args.flag_plain_out))?;
        info!("maze layout saved to {}", args.flag_plain_out);
    }

    let path = pathing::solve(&mut maze_grid)
        .ok_or("The carved maze has no route from the entrance to the exit.")?;
    info!("shortest route takes {} steps", path.len() - 1);

    let distances;
    let display: Option<&dyn GridDisplay> = match args.flag_show {
        Overlay::Blank => None,
        Overlay::Explored => Some(&ExploredDisplay),
        Overlay::Path => Some(&PathDisplay),
        Overlay::Distances => {
            distances = pathing::Distances::new(&maze_grid, maze_grid.start())
                .ok_or("Invalid start coordinate from which to show path distances.")?;
            Some(&distances)
        }
    };
    let rendered = Rendered::new(&maze_grid, display).to_string();

    if args.flag_text_out.is_empty() {
        print!("{}", rendered);
    } else {
        write_text_to_file(&rendered, &args.flag_text_out)
            .chain_err(|| format!("Failed to write maze to text file {}", args.flag_text_out))?;
    }

    Ok(())
}

fn write_text_to_file(data: &str, file_name: &str) -> io::Result<()> {
    let mut f = File::create(file_name)?;
    f.write_all(data.as_bytes())?;
    Ok(())
}

fn save_maze_graph(maze_grid: &Grid, file_path: &str) -> Result<()> {

    let (NodesCount(vertices_count), EdgesCount(edges_count)) = maze_grid.graph_size();
    let mut graph_data = format!("{} {}\n", vertices_count, edges_count);

    for (src, dst) in maze_grid.iter_links() {
        let index_a = maze_grid
            .grid_coordinate_to_index(src)
            .ok_or("Links iter gave a coordinate outside the grid")?;
        let index_b = maze_grid
            .grid_coordinate_to_index(dst)
            .ok_or("Links iter gave a coordinate outside the grid")?;

        graph_data.push_str(&format!("{} {}\n", index_a + 1, index_b + 1));
    }

    write_text_to_file(&graph_data, file_path)
        .chain_err(|| format!("Failed to write maze graph to text file {}", file_path))?;

    Ok(())
}
