use crate::errors::*;
use crate::grid::Grid;
use crate::units::{ColumnLength, RowLength};

/// Up to 255 cells and passages, e.g. an 11x11 maze.
pub type SmallRectangularGrid = Grid<u8>;
pub type MediumRectangularGrid = Grid<u16>;
pub type LargeRectangularGrid = Grid<u32>;

pub fn small_rect_grid(row_width: RowLength,
                       column_height: ColumnLength)
                       -> Result<SmallRectangularGrid> {
    SmallRectangularGrid::new(row_width, column_height)
}

pub fn medium_rect_grid(row_width: RowLength,
                        column_height: ColumnLength)
                        -> Result<MediumRectangularGrid> {
    MediumRectangularGrid::new(row_width, column_height)
}

pub fn large_rect_grid(row_width: RowLength,
                       column_height: ColumnLength)
                       -> Result<LargeRectangularGrid> {
    LargeRectangularGrid::new(row_width, column_height)
}
