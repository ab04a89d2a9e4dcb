// Path analysis over the passages of a carved grid.
//
// Distances is a flood fill from one start cell. It does not keep a reference to the grid it
// was built from, so removing more walls afterwards silently invalidates it.

use smallvec::SmallVec;

use crate::cells::Cartesian2DCoordinate;
use crate::grid::{Grid, IndexType};
use crate::grid_traits::GridDisplay;
use crate::utils;
use crate::utils::FnvHashMap;


#[derive(Debug, Clone)]
pub struct Distances {
    start_coordinate: Cartesian2DCoordinate,
    distances: FnvHashMap<Cartesian2DCoordinate, u32>,
    max_distance: u32,
}

impl Distances {
    /// Steps through open passages from `start_coordinate` to every cell reachable from it.
    /// None if the start is not on the grid.
    pub fn new<GridIndexType>(grid: &Grid<GridIndexType>,
                              start_coordinate: Cartesian2DCoordinate)
                              -> Option<Distances>
        where GridIndexType: IndexType
    {
        if !grid.is_valid_coordinate(start_coordinate) {
            return None;
        }

        let mut max = 0;
        let mut distances = utils::fnv_hashmap(grid.size());
        distances.insert(start_coordinate, 0);

        // Every link is one step, so the first time a cell is reached is by a shortest route and
        // the distances map doubles as the visited set.
        let mut frontier = vec![start_coordinate];
        while !frontier.is_empty() {

            let mut new_frontier = vec![];
            for cell_coord in &frontier {

                let distance_to_cell = distances[cell_coord];
                if distance_to_cell > max {
                    max = distance_to_cell;
                }

                let links = grid.links(*cell_coord)
                    .expect("Source cell has an invalid cell coordinate.");
                for link_coordinate in links.iter() {
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

    /// Number of cells reachable from the start, the start included.
    #[inline]
    pub fn reachable_count(&self) -> usize {
        self.distances.len()
    }

    #[inline(always)]
    pub fn distance_from_start_to(&self, coord: Cartesian2DCoordinate) -> Option<u32> {
        self.distances.get(&coord).cloned()
    }

    /// All cells at the maximum distance from the start, in row major order.
    pub fn furthest_points_on_grid(&self) -> SmallVec<[Cartesian2DCoordinate; 8]> {
        let furthest_distance = self.max();
        let mut furthest = self.distances
            .iter()
            .filter(|&(_, distance)| *distance == furthest_distance)
            .map(|(coord, _)| *coord)
            .collect::<SmallVec<[Cartesian2DCoordinate; 8]>>();
        furthest.sort_by_key(|coord| (coord.y, coord.x));
        furthest
    }
}

impl GridDisplay for Distances {
    fn render_cell_body(&self, coord: Cartesian2DCoordinate) -> String {
        if let Some(d) = self.distances.get(&coord) {
            // centre align, padding 3, lowercase hexadecimal
            format!("{:^3x}", d)
        } else {
            String::from("   ")
        }
    }
}

/// The path from the start of `distances_from_start` to `end_point`, both ends included.
/// None if the end is unreachable from the start.
pub fn shortest_path<GridIndexType>(grid: &Grid<GridIndexType>,
                                    distances_from_start: &Distances,
                                    end_point: Cartesian2DCoordinate)
                                    -> Option<Vec<Cartesian2DCoordinate>>
    where GridIndexType: IndexType
{
    // The end point is not reachable from start.
    let mut current_distance = distances_from_start.distance_from_start_to(end_point)?;

    let mut path = vec![end_point];
    let start = distances_from_start.start();
    let mut current_coord = end_point;

    while current_coord != start {

        let closer = grid.links(current_coord)?
            .iter()
            .cloned()
            .find(|coord| {
                distances_from_start.distance_from_start_to(*coord)
                    .map_or(false, |d| d + 1 == current_distance)
            });

        match closer {
            Some(closer_coord) => {
                current_coord = closer_coord;
                current_distance -= 1;
                path.push(current_coord);
            }
            // The grid changed since the distances were measured.
            None => return None,
        }
    }

    path.reverse();
    Some(path)
}

/// The longest path in the maze region containing `from`.
///
/// Exact only for a perfect maze: the cell furthest from any cell is one end of a longest
/// path, and the cell furthest from that is the other end.
pub fn longest_path<GridIndexType>(grid: &Grid<GridIndexType>,
                                   from: Cartesian2DCoordinate)
                                   -> Option<Vec<Cartesian2DCoordinate>>
    where GridIndexType: IndexType
{
    let first_distances = Distances::new(grid, from)?;
    let long_path_start_coordinate = first_distances.furthest_points_on_grid()[0];

    let distances_from_start = Distances::new(grid, long_path_start_coordinate)?;
    let end_point = distances_from_start.furthest_points_on_grid()[0];

    shortest_path(grid, &distances_from_start, end_point)
}
