use std::fmt;

use smallvec::SmallVec;

use crate::cells::{Cartesian2DCoordinate, CompassPrimary};
use crate::grid::{Grid, IndexType};
use crate::grid_traits::GridDisplay;
use crate::utils::FnvHashSet;


#[derive(Debug)]
pub struct PathDisplay {
    on_path_coordinates: FnvHashSet<Cartesian2DCoordinate>,
}
impl PathDisplay {
    pub fn new(path: &[Cartesian2DCoordinate]) -> Self {
        PathDisplay { on_path_coordinates: path.iter().cloned().collect() }
    }
}
impl GridDisplay for PathDisplay {
    fn render_cell_body(&self, coord: Cartesian2DCoordinate) -> String {
        if self.on_path_coordinates.contains(&coord) {
            String::from(" . ")
        } else {
            String::from("   ")
        }
    }
}


#[derive(Debug)]
pub struct StartEndPointsDisplay {
    start_coordinates: SmallVec<[Cartesian2DCoordinate; 4]>,
    end_coordinates: SmallVec<[Cartesian2DCoordinate; 4]>,
}
impl StartEndPointsDisplay {
    pub fn new(starts: &[Cartesian2DCoordinate],
               ends: &[Cartesian2DCoordinate])
               -> StartEndPointsDisplay {
        StartEndPointsDisplay {
            start_coordinates: starts.iter().cloned().collect(),
            end_coordinates: ends.iter().cloned().collect(),
        }
    }
}
impl GridDisplay for StartEndPointsDisplay {
    fn render_cell_body(&self, coord: Cartesian2DCoordinate) -> String {

        if self.start_coordinates.contains(&coord) {
            String::from(" S ")

        } else if self.end_coordinates.contains(&coord) {
            String::from(" E ")

        } else {
            String::from("   ")
        }
    }
}


/// Per cell wall markers, one line per grid row, see `WallState`'s `Display`.
pub struct WallMarkers<'a, GridIndexType: IndexType> {
    grid: &'a Grid<GridIndexType>,
}

impl<'a, GridIndexType: IndexType> fmt::Display for WallMarkers<'a, GridIndexType> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in self.grid.iter_row() {
            for coord in row {
                let walls = self.grid
                    .wall_state(coord)
                    .expect("row iterator yields valid coordinates");
                write!(f, "{}", walls)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Box drawing rendering of a grid, cell bodies filled in by an optional `GridDisplay`.
pub struct GridRender<'a, GridIndexType: IndexType> {
    grid: &'a Grid<GridIndexType>,
    cell_display: Option<&'a dyn GridDisplay>,
}

impl<GridIndexType: IndexType> Grid<GridIndexType> {
    pub fn wall_markers(&self) -> WallMarkers<'_, GridIndexType> {
        WallMarkers { grid: self }
    }

    pub fn render<'a>(&'a self,
                      cell_display: Option<&'a dyn GridDisplay>)
                      -> GridRender<'a, GridIndexType> {
        GridRender {
            grid: self,
            cell_display,
        }
    }
}


/// The box drawing glyph joining whichever wall segments meet at a corner.
fn junction(left: bool, right: bool, up: bool, down: bool) -> &'static str {
    const JUNCTIONS: [&str; 16] = [" ", "╷", "╵", "│", "╶", "┌", "└", "├",
                                   "╴", "┐", "┘", "┤", "─", "┬", "┴", "┼"];
    let index = (left as usize) << 3 | (right as usize) << 2 | (up as usize) << 1 | down as usize;
    JUNCTIONS[index]
}

impl<GridIndexType: IndexType> fmt::Display for Grid<GridIndexType> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.render(None))
    }
}

impl<'a, GridIndexType: IndexType> fmt::Display for GridRender<'a, GridIndexType> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        const WALL_LR_3: &str = "───";
        const GAP_3: &str = "   ";
        const WALL_UD: &str = "│";

        let grid = self.grid;
        let wall = |coord: Option<Cartesian2DCoordinate>, direction: CompassPrimary| {
            coord.map_or(false, |c| !grid.is_wall_open(c, direction))
        };
        let east_of = |coord: Cartesian2DCoordinate| grid.neighbour_at_direction(coord, CompassPrimary::East);
        let south_of = |coord: Cartesian2DCoordinate| grid.neighbour_at_direction(coord, CompassPrimary::South);

        let mut output = String::new();
        for (index_row, row) in grid.iter_row().enumerate() {
            let first = row.first().cloned();

            // Rows after the first reuse the south walls of the row above as their north walls.
            if index_row == 0 {
                output.push_str(junction(false,
                                         wall(first, CompassPrimary::North),
                                         false,
                                         wall(first, CompassPrimary::West)));
                for &coord in &row {
                    let north = wall(Some(coord), CompassPrimary::North);
                    output.push_str(if north { WALL_LR_3 } else { GAP_3 });
                    output.push_str(junction(north,
                                             wall(east_of(coord), CompassPrimary::North),
                                             false,
                                             wall(Some(coord), CompassPrimary::East)));
                }
                output.push('\n');
            }

            output.push_str(if wall(first, CompassPrimary::West) { WALL_UD } else { " " });
            for &coord in &row {
                match self.cell_display {
                    Some(displayer) => output.push_str(&displayer.render_cell_body(coord)),
                    None => output.push_str(GAP_3),
                }
                output.push_str(if wall(Some(coord), CompassPrimary::East) { WALL_UD } else { " " });
            }
            output.push('\n');

            output.push_str(junction(false,
                                     wall(first, CompassPrimary::South),
                                     wall(first, CompassPrimary::West),
                                     wall(first.and_then(south_of), CompassPrimary::West)));
            for &coord in &row {
                let south = wall(Some(coord), CompassPrimary::South);
                output.push_str(if south { WALL_LR_3 } else { GAP_3 });
                output.push_str(junction(south,
                                         wall(east_of(coord), CompassPrimary::South),
                                         wall(Some(coord), CompassPrimary::East),
                                         wall(south_of(coord), CompassPrimary::East)));
            }
            output.push('\n');
        }

        write!(f, "{}", output)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::grids::small_rect_grid;
    use crate::units::{ColumnLength, RowLength};

    fn gc(x: u32, y: u32) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate::new(x, y)
    }

    #[test]
    fn single_closed_cell() {
        let g = small_rect_grid(RowLength(1), ColumnLength(1)).unwrap();
        assert_eq!(g.to_string(), "┌───┐\n│   │\n└───┘\n");
        assert_eq!(g.wall_markers().to_string(), "[    ]\n");
    }

    #[test]
    fn horizontal_passage() {
        let mut g = small_rect_grid(RowLength(2), ColumnLength(1)).unwrap();
        g.remove_wall(gc(0, 0), CompassPrimary::East).unwrap();
        assert_eq!(g.to_string(), "┌───────┐\n│       │\n└───────┘\n");
        assert_eq!(g.wall_markers().to_string(), "[  E ][   W]\n");
    }

    #[test]
    fn vertical_passage_with_boundary_gates() {
        let mut g = small_rect_grid(RowLength(1), ColumnLength(2)).unwrap();
        g.remove_wall(gc(0, 0), CompassPrimary::South).unwrap();
        g.remove_wall(gc(0, 0), CompassPrimary::North).unwrap();
        g.remove_wall(gc(0, 1), CompassPrimary::West).unwrap();
        assert_eq!(g.to_string(), "╷   ╷\n│   │\n╵   │\n    │\n╶───┘\n");
        assert_eq!(g.wall_markers().to_string(), "[NS  ]\n[N  W]\n");
    }

    #[test]
    fn markers_are_row_major() {
        let mut g = small_rect_grid(RowLength(2), ColumnLength(2)).unwrap();
        g.remove_wall(gc(0, 0), CompassPrimary::East).unwrap();
        g.remove_wall(gc(1, 0), CompassPrimary::South).unwrap();
        g.remove_wall(gc(1, 1), CompassPrimary::West).unwrap();
        assert_eq!(g.wall_markers().to_string(), "[  E ][ S W]\n[  E ][N  W]\n");
    }

    #[test]
    fn cell_bodies_come_from_the_grid_display() {
        let mut g = small_rect_grid(RowLength(2), ColumnLength(1)).unwrap();
        g.remove_wall(gc(0, 0), CompassPrimary::East).unwrap();
        let start_end = StartEndPointsDisplay::new(&[gc(0, 0)], &[gc(1, 0)]);
        assert_eq!(g.render(Some(&start_end)).to_string(), "┌───────┐\n│ S   E │\n└───────┘\n");

        let path = PathDisplay::new(&[gc(1, 0)]);
        assert_eq!(g.render(Some(&path)).to_string(), "┌───────┐\n│     . │\n└───────┘\n");
        assert_eq!(g.render(None).to_string(), g.to_string());
    }
}
