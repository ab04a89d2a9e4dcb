use bit_set::BitSet;
use error_chain::bail;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::cells::Cartesian2DCoordinate;
use crate::errors::*;
use crate::grid::{CoordinateSmallVec, Grid, IndexType};

/// Where generation starts unless told otherwise: the north west corner.
pub const DEFAULT_START: Cartesian2DCoordinate = Cartesian2DCoordinate { x: 0, y: 0 };

/// `random_frontier` from the north west corner of the grid.
pub fn generate<GridIndexType, R>(grid: &mut Grid<GridIndexType>, rng: &mut R) -> Result<()>
    where GridIndexType: IndexType,
          R: Rng
{
    random_frontier(grid, DEFAULT_START, rng)
}

/// Carve a perfect maze into the grid by growing a spanning tree out from `start`.
///
/// The tree starts as just the `start` cell, with its live (not disconnected) neighbours as the
/// frontier. Each step picks a frontier cell uniformly at random, joins it to the tree, then
/// picks uniformly at random which of its neighbours already in the tree to carve a passage
/// to. The picked cell's live neighbours join the frontier.
///
/// Choosing the frontier cell first and its connection second, rather than choosing a random
/// frontier edge as Prim's algorithm does, gives longer more winding corridors.
///
/// Every cell reachable from `start` through live neighbours ends up in the maze with exactly
/// one path to every other. Disconnected cells, and any cells cut off by them, keep all their
/// walls.
///
/// A start with no neighbours at all (a 1x1 grid) is a valid, single cell maze. A start that
/// is itself disconnected, or that has neighbours but all of them disconnected, is an
/// `UnreachableStart` error.
pub fn random_frontier<GridIndexType, R>(grid: &mut Grid<GridIndexType>,
                                         start: Cartesian2DCoordinate,
                                         rng: &mut R)
                                         -> Result<()>
    where GridIndexType: IndexType,
          R: Rng
{
    let start_index = match grid.grid_coordinate_to_index(start) {
        Some(index) => index,
        None => bail!(ErrorKind::StartOutOfBounds(start.x, start.y)),
    };

    let start_adjacents = grid.adjacent_cells(start);
    if grid.is_disconnected(start) ||
       (start_adjacents.is_empty() && !grid.neighbours(start).is_empty()) {
        bail!(ErrorKind::UnreachableStart(start.x, start.y));
    }

    let cells_count = grid.size();
    let mut in_maze = BitSet::with_capacity(cells_count);
    let _ = in_maze.insert(start_index);

    // The frontier never holds cells already in the maze, so sampling it uniformly is the same
    // as sampling (frontier - in_maze). The bitset mirrors the vec for membership tests.
    let mut frontier: Vec<Cartesian2DCoordinate> = Vec::with_capacity(cells_count);
    let mut in_frontier = BitSet::with_capacity(cells_count);
    push_frontier(grid, &start_adjacents, &in_maze, &mut frontier, &mut in_frontier);

    while !frontier.is_empty() {

        let pick = frontier.swap_remove(rng.gen_range(0..frontier.len()));
        let pick_index = grid.grid_coordinate_to_index(pick)
            .expect("frontier cells are inside the grid");
        let _ = in_frontier.remove(pick_index);
        let _ = in_maze.insert(pick_index);

        let pick_adjacents = grid.adjacent_cells(pick);
        let connectors = pick_adjacents.iter()
            .cloned()
            .filter(|coord| is_in(grid, &in_maze, *coord))
            .collect::<CoordinateSmallVec>();

        // `pick` only joined the frontier as a live neighbour of a cell in the maze, and cells
        // in the maze are never disconnected, so there is always a connector.
        let connector = *connectors.choose(rng)
            .expect("a frontier cell borders at least one maze cell");
        let direction = grid.adjacent_direction(pick, connector)
            .expect("connector is a grid neighbour of the picked cell");
        grid.remove_wall(pick, direction)?;

        push_frontier(grid, &pick_adjacents, &in_maze, &mut frontier, &mut in_frontier);
    }

    debug!(?start,
           cells = in_maze.len(),
           passages = grid.links_count(),
           "generated random frontier maze");

    Ok(())
}

fn push_frontier<GridIndexType: IndexType>(grid: &Grid<GridIndexType>,
                                           candidates: &[Cartesian2DCoordinate],
                                           in_maze: &BitSet,
                                           frontier: &mut Vec<Cartesian2DCoordinate>,
                                           in_frontier: &mut BitSet) {
    for coord in candidates {
        if let Some(index) = grid.grid_coordinate_to_index(*coord) {
            if !in_maze.contains(index) && in_frontier.insert(index) {
                frontier.push(*coord);
            }
        }
    }
}

#[inline]
fn is_in<GridIndexType: IndexType>(grid: &Grid<GridIndexType>,
                                   cells: &BitSet,
                                   coord: Cartesian2DCoordinate)
                                   -> bool {
    grid.grid_coordinate_to_index(coord)
        .map_or(false, |index| cells.contains(index))
}
