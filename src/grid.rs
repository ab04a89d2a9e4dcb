use std::fmt;
use std::slice;

use bit_set::BitSet;
use error_chain::bail;
use petgraph::graph;
pub use petgraph::graph::IndexType;
use petgraph::{Graph, Undirected};
use rand::Rng;
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::cells::{Cartesian2DCoordinate, Cell, CompassPrimary, WallState};
use crate::errors::*;
use crate::grid_dimensions::RectGridDimensions;
use crate::grid_iterators::{BatchIter, CellIter};
use crate::masks::BinaryMask2D;
use crate::units::{ColumnLength, ColumnsCount, EdgesCount, NodesCount, RowLength, RowsCount};


pub type CoordinateSmallVec = SmallVec<[Cartesian2DCoordinate; 4]>;

/// A rectangular grid of cells.
///
/// Cells are addressed by coordinate, never by reference. Every open wall between two cells is
/// one undirected edge in the graph, so a passage always reads the same from both sides. Walls
/// on the outer boundary have no neighbour to link to and are tracked separately.
#[derive(Clone)]
pub struct Grid<GridIndexType: IndexType> {
    graph: Graph<(), (), Undirected, GridIndexType>,
    dimensions: RectGridDimensions,
    // cells hidden from their neighbours' adjacency
    disconnected: BitSet,
    // (cell index * 4 + direction index) of opened boundary walls
    boundary_openings: BitSet,
}

impl<GridIndexType: IndexType> fmt::Debug for Grid<GridIndexType> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f,
               "Grid :: graph: {:?}, rows: {:?}, columns: {:?}, disconnected: {:?}",
               self.graph,
               self.rows(),
               self.columns(),
               self.disconnected)
    }
}

impl<GridIndexType: IndexType> Grid<GridIndexType> {
    /// Creates a `row_width` * `column_height` grid with every wall closed.
    ///
    /// Fails if either dimension is zero, or if the grid could hold more cells or passages than
    /// `GridIndexType` can index.
    pub fn new(row_width: RowLength, column_height: ColumnLength) -> Result<Grid<GridIndexType>> {

        let dimensions = RectGridDimensions::new(row_width, column_height)?;
        let (NodesCount(nodes), EdgesCount(max_edges)) = dimensions.graph_size();
        let index_limit = <GridIndexType as IndexType>::max().index();
        if nodes > index_limit || max_edges > index_limit {
            bail!(ErrorKind::GridTooLarge(row_width.0, column_height.0));
        }

        let EdgesCount(edges_hint) = dimensions.edges_hint();
        let mut graph = Graph::with_capacity(nodes, edges_hint);
        for _ in 0..nodes {
            let _ = graph.add_node(());
        }

        Ok(Grid {
            graph,
            dimensions,
            disconnected: BitSet::with_capacity(nodes),
            boundary_openings: BitSet::with_capacity(nodes * 4),
        })
    }

    #[inline]
    pub fn dimensions(&self) -> &RectGridDimensions {
        &self.dimensions
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.dimensions.size().0
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.dimensions.row_length().0
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.dimensions.column_length().0
    }

    /// Number of open passages between pairs of cells. Boundary openings are not counted.
    #[inline]
    pub fn links_count(&self) -> usize {
        self.graph.edge_count()
    }

    #[inline]
    pub fn rows(&self) -> RowsCount {
        self.dimensions.rows()
    }

    #[inline]
    pub fn columns(&self) -> ColumnsCount {
        self.dimensions.columns()
    }

    pub fn random_cell<R: Rng>(&self, rng: &mut R) -> Cartesian2DCoordinate {
        let index = rng.gen_range(0..self.size());
        Cartesian2DCoordinate::from_row_major_index(index, self.dimensions.row_length())
    }

    /// The coordinate at (`col`, `row`), or None if it lies outside the grid.
    pub fn coordinate_at(&self, col: i64, row: i64) -> Option<Cartesian2DCoordinate> {
        if col < 0 || row < 0 || col >= self.width() as i64 || row >= self.height() as i64 {
            None
        } else {
            Some(Cartesian2DCoordinate::new(col as u32, row as u32))
        }
    }

    /// The cell at (`col`, `row`), or None if it lies outside the grid. Never panics.
    pub fn cell_at(&self, col: i64, row: i64) -> Option<Cell> {
        self.coordinate_at(col, row).map(|coord| {
            Cell {
                row: coord.y,
                col: coord.x,
                walls: self.walls_at(coord),
            }
        })
    }

    /// The four walls of a cell, or None for a coordinate outside the grid.
    pub fn wall_state(&self, coord: Cartesian2DCoordinate) -> Option<WallState> {
        if self.is_valid_coordinate(coord) {
            Some(self.walls_at(coord))
        } else {
            None
        }
    }

    /// Is the wall of `coord` facing `direction` open? Boundary walls count as open once removed.
    pub fn is_wall_open(&self, coord: Cartesian2DCoordinate, direction: CompassPrimary) -> bool {
        if let Some(neighbour_coord) = self.neighbour_at_direction(coord, direction) {
            self.is_linked(coord, neighbour_coord)
        } else {
            self.boundary_opening_index(coord, direction)
                .map_or(false, |bit| self.boundary_openings.contains(bit))
        }
    }

    /// Can we step from `coord` to the cell lying in `direction`?
    /// True only if the wall is open and a neighbour exists on the other side.
    pub fn can_traverse(&self, coord: Cartesian2DCoordinate, direction: CompassPrimary) -> bool {
        self.neighbour_at_direction(coord, direction)
            .map_or(false, |neighbour_coord| self.is_linked(coord, neighbour_coord))
    }

    /// Remove the wall of `coord` facing `direction`.
    ///
    /// With a neighbour in that direction this carves one passage, seen from both cells. On
    /// the outer boundary it opens the boundary wall only. Disconnection does not stop a wall
    /// being removed.
    pub fn remove_wall(&mut self, coord: Cartesian2DCoordinate, direction: CompassPrimary) -> Result<()> {

        let a_index = match self.grid_coordinate_to_index(coord) {
            Some(index) => index,
            None => bail!(ErrorKind::CellOutOfBounds(i64::from(coord.x), i64::from(coord.y))),
        };

        match self.neighbour_at_direction(coord, direction) {
            Some(neighbour_coord) => {
                let b_index = self.grid_coordinate_to_index(neighbour_coord)
                    .expect("neighbour coordinates are inside the grid");
                let _ = self.graph.update_edge(graph::NodeIndex::new(a_index),
                                               graph::NodeIndex::new(b_index),
                                               ());
                trace!(?coord, ?neighbour_coord, "carved passage");
            }
            None => {
                let _ = self.boundary_openings.insert(a_index * 4 + direction.index());
                trace!(?coord, ?direction, "opened boundary wall");
            }
        }

        Ok(())
    }

    /// Hide `coord` from all of its neighbours so no neighbour lookup that honours disconnection
    /// (see `adjacent_cells`) finds it any more. The cell still knows its own neighbours.
    pub fn disconnect(&mut self, coord: Cartesian2DCoordinate) -> Result<()> {
        match self.grid_coordinate_to_index(coord) {
            Some(index) => {
                let _ = self.disconnected.insert(index);
                Ok(())
            }
            None => bail!(ErrorKind::CellOutOfBounds(i64::from(coord.x), i64::from(coord.y))),
        }
    }

    #[inline]
    pub fn is_disconnected(&self, coord: Cartesian2DCoordinate) -> bool {
        self.grid_coordinate_to_index(coord)
            .map_or(false, |index| self.disconnected.contains(index))
    }

    pub fn disconnected_count(&self) -> usize {
        self.disconnected.len()
    }

    /// Disconnect every cell the mask covers. Returns how many cells were newly disconnected.
    pub fn apply_mask(&mut self, mask: &BinaryMask2D) -> usize {
        let mut count = 0;
        for coord in self.iter() {
            if mask.is_masked(coord) {
                let index = self.grid_coordinate_to_index(coord)
                    .expect("grid iterator yields valid coordinates");
                if self.disconnected.insert(index) {
                    count += 1;
                }
            }
        }
        debug!(disconnected = count, "applied mask to grid");
        count
    }

    /// Cells reachable through an open wall of `coord`, or None if `coord` is invalid.
    pub fn links(&self, coord: Cartesian2DCoordinate) -> Option<CoordinateSmallVec> {

        self.grid_coordinate_graph_index(coord).map(|graph_node_index| {
            self.graph
                .neighbors(graph_node_index)
                .map(|linked_index| {
                    Cartesian2DCoordinate::from_row_major_index(linked_index.index(),
                                                                self.dimensions.row_length())
                })
                .collect()
        })
    }

    /// Cells to the North, South, East or West of `coord` inside the grid, not necessarily
    /// linked by a passage and regardless of disconnection.
    pub fn neighbours(&self, coord: Cartesian2DCoordinate) -> CoordinateSmallVec {
        CompassPrimary::ALL
            .iter()
            .filter_map(|&dir| self.neighbour_at_direction(coord, dir))
            .collect()
    }

    /// The neighbours of `coord` that have not been disconnected.
    pub fn adjacent_cells(&self, coord: Cartesian2DCoordinate) -> CoordinateSmallVec {
        CompassPrimary::ALL
            .iter()
            .filter_map(|&dir| self.neighbour_at_direction(coord, dir))
            .filter(|&neighbour_coord| !self.is_disconnected(neighbour_coord))
            .collect()
    }

    /// The direction in which `neighbour` lies from `coord`, if they are grid neighbours.
    pub fn adjacent_direction(&self,
                              coord: Cartesian2DCoordinate,
                              neighbour: Cartesian2DCoordinate)
                              -> Option<CompassPrimary> {
        CompassPrimary::ALL
            .iter()
            .cloned()
            .find(|&dir| self.neighbour_at_direction(coord, dir) == Some(neighbour))
    }

    pub fn neighbour_at_direction(&self,
                                  coord: Cartesian2DCoordinate,
                                  direction: CompassPrimary)
                                  -> Option<Cartesian2DCoordinate> {
        if !self.is_valid_coordinate(coord) {
            return None;
        }
        coord.offset(direction)
             .filter(|&neighbour_coord| self.is_valid_coordinate(neighbour_coord))
    }

    /// Are two cells in the grid linked?
    pub fn is_linked(&self, a: Cartesian2DCoordinate, b: Cartesian2DCoordinate) -> bool {
        let a_index_opt = self.grid_coordinate_graph_index(a);
        let b_index_opt = self.grid_coordinate_graph_index(b);
        if let (Some(a_index), Some(b_index)) = (a_index_opt, b_index_opt) {
            self.graph.find_edge(a_index, b_index).is_some()
        } else {
            false
        }
    }

    /// Convert a grid coordinate to a one dimensional index in the range 0...grid.size().
    /// Returns None if the grid coordinate is invalid.
    #[inline]
    pub fn grid_coordinate_to_index(&self, coord: Cartesian2DCoordinate) -> Option<usize> {
        self.dimensions.coordinate_to_index(coord)
    }

    #[inline]
    pub fn iter(&self) -> CellIter {
        CellIter::new(self.dimensions)
    }

    #[inline]
    pub fn iter_row(&self) -> BatchIter {
        BatchIter::rows(self.dimensions)
    }

    #[inline]
    pub fn iter_column(&self) -> BatchIter {
        BatchIter::columns(self.dimensions)
    }

    pub fn iter_links(&self) -> LinksIter<'_, GridIndexType> {
        LinksIter {
            graph_edge_iter: self.graph.raw_edges().iter(),
            row_length: self.dimensions.row_length(),
        }
    }

    /// Is the grid coordinate valid for this grid - within the grid's dimensions
    #[inline]
    pub fn is_valid_coordinate(&self, coord: Cartesian2DCoordinate) -> bool {
        self.dimensions.is_valid_coordinate(coord)
    }

    fn walls_at(&self, coord: Cartesian2DCoordinate) -> WallState {
        let mut walls = WallState::closed();
        for &dir in CompassPrimary::ALL.iter() {
            if self.is_wall_open(coord, dir) {
                walls.set_wall(dir, false);
            }
        }
        walls
    }

    #[inline]
    fn boundary_opening_index(&self,
                              coord: Cartesian2DCoordinate,
                              direction: CompassPrimary)
                              -> Option<usize> {
        self.grid_coordinate_to_index(coord).map(|index| index * 4 + direction.index())
    }

    /// Convert a grid coordinate into petgraph nodeindex
    /// Returns None if the grid coordinate is invalid (out of the grid's dimensions).
    #[inline]
    fn grid_coordinate_graph_index(&self,
                                   coord: Cartesian2DCoordinate)
                                   -> Option<graph::NodeIndex<GridIndexType>> {
        self.grid_coordinate_to_index(coord).map(graph::NodeIndex::<GridIndexType>::new)
    }
}

/// Every passage of the grid as a pair of cell coordinates.
pub struct LinksIter<'a, GridIndexType: IndexType> {
    graph_edge_iter: slice::Iter<'a, graph::Edge<(), GridIndexType>>,
    row_length: RowLength,
}

impl<'a, GridIndexType: IndexType> Iterator for LinksIter<'a, GridIndexType> {
    type Item = (Cartesian2DCoordinate, Cartesian2DCoordinate);

    fn next(&mut self) -> Option<Self::Item> {
        let row_length = self.row_length;
        self.graph_edge_iter.next().map(|edge| {
            let src_cell_coord = Cartesian2DCoordinate::from_row_major_index(edge.source().index(),
                                                                             row_length);
            let dst_cell_coord = Cartesian2DCoordinate::from_row_major_index(edge.target().index(),
                                                                             row_length);
            (src_cell_coord, dst_cell_coord)
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.graph_edge_iter.size_hint()
    }
}
impl<'a, GridIndexType: IndexType> ExactSizeIterator for LinksIter<'a, GridIndexType> {} // default impl using size_hint()

impl<'a, GridIndexType: IndexType> fmt::Debug for LinksIter<'a, GridIndexType> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "LinksIter :: edges remaining : {:?}", self.graph_edge_iter.len())
    }
}
