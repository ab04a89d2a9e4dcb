use std::cmp;

use crate::cells::Cartesian2DCoordinate;
use crate::errors::*;
use error_chain::bail;
use crate::units::{ColumnLength, ColumnsCount, EdgesCount, NodesCount, RowLength, RowsCount};


/// Width and height of a rectangular grid. Always positive once constructed.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct RectGridDimensions {
    row_width: RowLength,
    column_height: ColumnLength,
}

impl RectGridDimensions {
    pub fn new(row_width: RowLength, column_height: ColumnLength) -> Result<RectGridDimensions> {
        let (RowLength(w), ColumnLength(h)) = (row_width, column_height);
        if w == 0 || h == 0 {
            bail!(ErrorKind::InvalidDimensions(w, h));
        }
        if w > u32::MAX as usize || h > u32::MAX as usize || w.checked_mul(h).is_none() {
            bail!(ErrorKind::GridTooLarge(w, h));
        }

        Ok(RectGridDimensions {
            row_width,
            column_height,
        })
    }

    #[inline(always)]
    pub fn size(&self) -> NodesCount {
        NodesCount(self.row_width.0 * self.column_height.0)
    }

    #[inline(always)]
    pub fn rows(&self) -> RowsCount {
        RowsCount(self.column_height.0)
    }

    #[inline(always)]
    pub fn row_length(&self) -> RowLength {
        self.row_width
    }

    #[inline(always)]
    pub fn columns(&self) -> ColumnsCount {
        ColumnsCount(self.row_width.0)
    }

    #[inline(always)]
    pub fn column_length(&self) -> ColumnLength {
        self.column_height
    }

    /// Node count and the number of cell pairs that could ever share a passage.
    pub fn graph_size(&self) -> (NodesCount, EdgesCount) {
        let (w, h) = (self.row_width.0, self.column_height.0);
        let horizontal_walls = (w - 1) * h;
        let vertical_walls = w * (h - 1);
        (self.size(), EdgesCount(horizontal_walls + vertical_walls))
    }

    /// A rough estimate of the edges a perfect maze carves, for preallocation.
    pub fn edges_hint(&self) -> EdgesCount {
        let NodesCount(cells) = self.size();
        EdgesCount(cmp::max(cells, 1) - 1)
    }

    #[inline]
    pub fn is_valid_coordinate(&self, coord: Cartesian2DCoordinate) -> bool {
        (coord.x as usize) < self.row_width.0 && (coord.y as usize) < self.column_height.0
    }

    /// Convert a grid coordinate to a one dimensional index in the range 0..size.
    #[inline]
    pub fn coordinate_to_index(&self, coord: Cartesian2DCoordinate) -> Option<usize> {
        if self.is_valid_coordinate(coord) {
            Some((coord.y as usize * self.row_width.0) + coord.x as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn index_to_coordinate(&self, index: usize) -> Option<Cartesian2DCoordinate> {
        if index < self.size().0 {
            Some(Cartesian2DCoordinate::from_row_major_index(index, self.row_width))
        } else {
            None
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn dims(w: usize, h: usize) -> RectGridDimensions {
        RectGridDimensions::new(RowLength(w), ColumnLength(h)).expect("valid dimensions")
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        for &(w, h) in &[(0, 0), (0, 5), (5, 0)] {
            let err = RectGridDimensions::new(RowLength(w), ColumnLength(h)).unwrap_err();
            match *err.kind() {
                ErrorKind::InvalidDimensions(ew, eh) => assert_eq!((ew, eh), (w, h)),
                ref other => panic!("unexpected error kind {:?}", other),
            }
        }
    }

    #[test]
    fn graph_size_counts_interior_walls() {
        assert_eq!(dims(1, 1).graph_size(), (NodesCount(1), EdgesCount(0)));
        assert_eq!(dims(2, 2).graph_size(), (NodesCount(4), EdgesCount(4)));
        assert_eq!(dims(3, 2).graph_size(), (NodesCount(6), EdgesCount(7)));
        assert_eq!(dims(1, 4).graph_size(), (NodesCount(4), EdgesCount(3)));
    }

    #[test]
    fn index_conversions() {
        let d = dims(3, 2);
        let gc = |x, y| Cartesian2DCoordinate::new(x, y);
        assert_eq!(d.coordinate_to_index(gc(0, 0)), Some(0));
        assert_eq!(d.coordinate_to_index(gc(2, 0)), Some(2));
        assert_eq!(d.coordinate_to_index(gc(0, 1)), Some(3));
        assert_eq!(d.coordinate_to_index(gc(3, 0)), None);
        assert_eq!(d.coordinate_to_index(gc(0, 2)), None);
        assert_eq!(d.index_to_coordinate(5), Some(gc(2, 1)));
        assert_eq!(d.index_to_coordinate(6), None);
    }
}
