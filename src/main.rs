use docopt::Docopt;
use labyrinth::{
    cells::{Cartesian2DCoordinate, CellWall},
    generators,
    grid_displays::{PathDisplay, StartEndPointsDisplay},
    grid_traits::GridDisplay,
    grids::{large_rect_grid, LargeRectangularGrid},
    masks::{BinaryMask2D, MaskRectangle},
    pathing,
    units::{ColumnLength, RowLength},
};
use rand::{Rng, SeedableRng};
use rand_xorshift::XorShiftRng;
use serde::Deserialize;
use std::{
    fs::File,
    io,
    io::prelude::*,
    path::Path,
};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "Labyrinth

Usage:
    labyrinth_driver -h | --help
    labyrinth_driver [(--grid-size=<n>|[--grid-width=<w> --grid-height=<h>])] [--seed=<s>] [--start-point-x=<x> --start-point-y=<y>] [--reserve=<rect>...] [--reserve-centre=<n>] [--mask-file=<path>] [--open-wall=<gate>...] [(--markers|--show-path|--show-distances|--mark-start-end)] [--text-out=<path>] [--save-edges=<path>]

Options:
    -h --help              Show this screen.
    --grid-size=<n>        The grid size is n * n.
    --grid-width=<w>       The grid width in a w*h grid [default: 20].
    --grid-height=<h>      The grid height in a w*h grid [default: 20].
    --seed=<s>             Seed for the random number generator. Chosen at random if not given.
    --start-point-x=<x>    x coordinate (column) of the cell the maze grows from.
    --start-point-y=<y>    y coordinate (row) of the cell the maze grows from.
    --reserve=<rect>       Keep the rectangle x,y,w,h out of the maze. Can be repeated.
    --reserve-centre=<n>   Keep an n * n block in the centre of the grid out of the maze.
    --mask-file=<path>     Path to a mask data image file (e.g. grayscale), where each dark pixel keeps the grid cell at the same position out of the maze.
    --open-wall=<gate>     Open the wall x,y,dir after generation, dir one of N, S, E, W. Can be repeated, e.g. to cut entrances in the outer boundary.
    --markers              Render each cell as its open walls, e.g. [N  W], one line per grid row.
    --show-path            Show the longest path through the maze.
    --show-distances       Show the distance from the start point to all other reachable cells, in hexadecimal.
    --mark-start-end       Draw an 'S' (start) and 'E' (end) at the ends of the longest path.
    --text-out=<path>      Output file path for the text rendering of the maze. Standard output if not given.
    --save-edges=<path>    Serialize the maze to a text file: each line is a pair of numbers. Line 1: n(#vertices) m(#edges). Line 2+ edge between vertices. Uses 1-based vertex indices.
";
#[derive(Debug, Deserialize)]
struct MazeArgs {
    flag_grid_size: Option<usize>,
    flag_grid_width: usize,
    flag_grid_height: usize,
    flag_seed: Option<u64>,
    flag_start_point_x: Option<u32>,
    flag_start_point_y: Option<u32>,
    flag_reserve: Vec<String>,
    flag_reserve_centre: Option<u32>,
    flag_mask_file: String,
    flag_open_wall: Vec<String>,
    flag_markers: bool,
    flag_show_path: bool,
    flag_show_distances: bool,
    flag_mark_start_end: bool,
    flag_text_out: String,
    flag_save_edges: String,
}

mod errors {
    #![allow(deprecated)]
    use error_chain::*;
    error_chain! {

        links {
            Maze(::labyrinth::errors::Error, ::labyrinth::errors::ErrorKind);
        }

        foreign_links {
            DocOptFailure(::docopt::Error);
            ImageLoadError(::image::ImageError);
            Io(::std::io::Error);
        }

        errors {
            InvalidArgument(text: String) {
                description("invalid argument")
                display("invalid argument: {}", text)
            }
        }
    }
}
use crate::errors::*;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    if let Err(ref e) = run() {
        // docopt prints its own usage and help text
        if let ErrorKind::DocOptFailure(ref docopt_error) = *e.kind() {
            docopt_error.exit();
        }

        eprintln!("error: {}", e);
        for cause in e.iter().skip(1) {
            eprintln!("caused by: {}", cause);
        }
        std::process::exit(1);
    }
}

fn run() -> Result<()> {

    let args: MazeArgs = Docopt::new(USAGE).and_then(|d| d.deserialize())?;

    let (width, height) = if let Some(square_grid_size) = args.flag_grid_size {
        (square_grid_size, square_grid_size)
    } else {
        (args.flag_grid_width, args.flag_grid_height)
    };

    let mut maze_grid = large_rect_grid(RowLength(width), ColumnLength(height))?;

    let seed = args.flag_seed.unwrap_or_else(|| rand::thread_rng().gen());
    info!(seed, width, height, "generating maze");
    let mut rng = XorShiftRng::seed_from_u64(seed);

    let mask = reserved_cells_mask(&maze_grid, &args)?;
    maze_grid.apply_mask(&mask);

    let start = start_point(&mask, &args)?;
    generators::random_frontier(&mut maze_grid, start, &mut rng)?;

    for gate_text in &args.flag_open_wall {
        let gate = gate_text.parse::<CellWall>()?;
        maze_grid.remove_wall(gate.coordinate, gate.direction)?;
        debug!(?gate, "opened wall");
    }

    let text = if args.flag_markers {
        maze_grid.wall_markers().to_string()
    } else {
        let cell_display = maze_cell_display(&maze_grid, &args, start)?;
        maze_grid.render(cell_display.as_deref()).to_string()
    };

    if args.flag_text_out.is_empty() {
        print!("{}", text);
    } else {
        write_text_to_file(&text, &args.flag_text_out)
            .chain_err(|| format!("Failed to write maze to text file {}", args.flag_text_out))?;
    }

    if !args.flag_save_edges.is_empty() {
        save_edges(&maze_grid, &args.flag_save_edges)
            .chain_err(|| format!("Failed to save maze edges to {}", args.flag_save_edges))?;
    }

    Ok(())
}

/// Every cell reserved on the command line, in one mask the size of the grid.
fn reserved_cells_mask(maze_grid: &LargeRectangularGrid, maze_args: &MazeArgs) -> Result<BinaryMask2D> {

    let (grid_width, grid_height) = (maze_grid.width() as u32, maze_grid.height() as u32);
    let mut mask = BinaryMask2D::new(grid_width, grid_height);

    for rect_text in &maze_args.flag_reserve {
        mask.mask_area(rect_text.parse::<MaskRectangle>()?);
    }

    if let Some(block_size) = maze_args.flag_reserve_centre {
        mask.merge(&BinaryMask2D::centred_rectangle(grid_width, grid_height, block_size, block_size));
    }

    if !maze_args.flag_mask_file.is_empty() {
        let mask_image = image::open(&maze_args.flag_mask_file)?;
        let image_mask = BinaryMask2D::from_image(&mask_image);
        if (image_mask.width, image_mask.height) != (grid_width, grid_height) {
            warn!(mask_width = image_mask.width,
                  mask_height = image_mask.height,
                  grid_width,
                  grid_height,
                  "mask image and grid dimensions differ");
        }
        mask.merge(&image_mask);
    }

    Ok(mask)
}

/// The start given on the command line, else the north west corner or, if that was masked, the
/// first unmasked cell in row major order.
fn start_point(mask: &BinaryMask2D, maze_args: &MazeArgs) -> Result<Cartesian2DCoordinate> {

    match (maze_args.flag_start_point_x, maze_args.flag_start_point_y) {
        (Some(x), Some(y)) => Ok(Cartesian2DCoordinate::new(x, y)),
        _ if !mask.is_masked(generators::DEFAULT_START) => Ok(generators::DEFAULT_START),
        _ => {
            mask.first_unmasked_coordinate()
                .ok_or_else(|| ErrorKind::InvalidArgument("every grid cell is masked".into()).into())
        }
    }
}

/// Decide how the grid should have cells displayed as text
/// - Nothing in the cells
/// - Distances from the start cell to all other cells
/// - The longest path through the maze
/// - Start and End point markers at the ends of the longest path
fn maze_cell_display(maze_grid: &LargeRectangularGrid,
                     maze_args: &MazeArgs,
                     start: Cartesian2DCoordinate)
                     -> Result<Option<Box<dyn GridDisplay>>> {

    let display: Option<Box<dyn GridDisplay>> = if maze_args.flag_show_distances {

        let distances = pathing::Distances::new(maze_grid, start)
            .ok_or_else(|| ErrorKind::InvalidArgument("start point is not on the grid".into()))?;
        Some(Box::new(distances))

    } else if maze_args.flag_show_path || maze_args.flag_mark_start_end {

        let path = pathing::longest_path(maze_grid, start).unwrap_or_else(Vec::new);
        if maze_args.flag_show_path {
            Some(Box::new(PathDisplay::new(&path)))
        } else {
            let starts = path.first().cloned().into_iter().collect::<Vec<_>>();
            let ends = path.last().cloned().into_iter().collect::<Vec<_>>();
            Some(Box::new(StartEndPointsDisplay::new(&starts, &ends)))
        }

    } else {
        None
    };

    Ok(display)
}

fn write_text_to_file(data: &str, file_name: &str) -> io::Result<()> {
    let path = Path::new(file_name);
    let mut file = File::create(&path)?;
    file.write_all(data.as_bytes())?;
    Ok(())
}

fn save_edges(maze_grid: &LargeRectangularGrid, file_name: &str) -> io::Result<()> {
    let mut file = io::BufWriter::new(File::create(Path::new(file_name))?);

    writeln!(file, "{} {}", maze_grid.size(), maze_grid.links_count())?;
    for (src, dst) in maze_grid.iter_links() {
        let src_index = maze_grid.grid_coordinate_to_index(src).unwrap_or(0) + 1;
        let dst_index = maze_grid.grid_coordinate_to_index(dst).unwrap_or(0) + 1;
        writeln!(file, "{} {}", src_index, dst_index)?;
    }

    file.flush()
}
