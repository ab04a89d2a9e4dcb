use crate::cells::Cartesian2DCoordinate;
use crate::grid_dimensions::RectGridDimensions;
use crate::units::{ColumnIndex, ColumnLength, ColumnsCount, RowIndex, RowLength, RowsCount};


/// Row major iteration over every coordinate of a grid.
#[derive(Debug, Copy, Clone)]
pub struct CellIter {
    dimensions: RectGridDimensions,
    current_cell_number: usize,
    cells_count: usize,
}

impl CellIter {
    pub fn new(dimensions: RectGridDimensions) -> CellIter {
        CellIter {
            dimensions,
            current_cell_number: 0,
            cells_count: dimensions.size().0,
        }
    }
}

impl ExactSizeIterator for CellIter {} // default impl using size_hint()
impl Iterator for CellIter {
    type Item = Cartesian2DCoordinate;
    fn next(&mut self) -> Option<Self::Item> {
        if self.current_cell_number < self.cells_count {
            let coord = Cartesian2DCoordinate::from_row_major_index(self.current_cell_number,
                                                                    self.dimensions.row_length());
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


#[derive(Debug, Copy, Clone)]
enum BatchIterType {
    Row,
    Column,
}

/// Iterates a grid one whole row (north to south) or one whole column (west to east) at a time.
#[derive(Debug, Copy, Clone)]
pub struct BatchIter {
    iter_type: BatchIterType,
    current_index: usize,
    row_length: RowLength,
    rows_size: RowsCount,
    col_length: ColumnLength,
    cols_size: ColumnsCount,
}

impl BatchIter {
    pub fn rows(dimensions: RectGridDimensions) -> BatchIter {
        BatchIter::new(BatchIterType::Row, dimensions)
    }

    pub fn columns(dimensions: RectGridDimensions) -> BatchIter {
        BatchIter::new(BatchIterType::Column, dimensions)
    }

    fn new(iter_type: BatchIterType, dimensions: RectGridDimensions) -> BatchIter {
        BatchIter {
            iter_type,
            current_index: 0,
            row_length: dimensions.row_length(),
            rows_size: dimensions.rows(),
            col_length: dimensions.column_length(),
            cols_size: dimensions.columns(),
        }
    }

    fn batches_count(&self) -> usize {
        match self.iter_type {
            BatchIterType::Row => self.rows_size.0,
            BatchIterType::Column => self.cols_size.0,
        }
    }
}

impl ExactSizeIterator for BatchIter {} // default impl using size_hint()
impl Iterator for BatchIter {
    type Item = Vec<Cartesian2DCoordinate>;
    fn next(&mut self) -> Option<Self::Item> {

        if self.current_index >= self.batches_count() {
            return None;
        }

        let index = self.current_index;
        let coords = match self.iter_type {
            BatchIterType::Row => {
                let RowLength(length) = self.row_length;
                (0..length)
                    .map(|i| {
                        Cartesian2DCoordinate::from_row_column_indices(ColumnIndex(i),
                                                                       RowIndex(index))
                    })
                    .collect()
            }
            BatchIterType::Column => {
                let ColumnLength(length) = self.col_length;
                (0..length)
                    .map(|i| {
                        Cartesian2DCoordinate::from_row_column_indices(ColumnIndex(index),
                                                                       RowIndex(i))
                    })
                    .collect()
            }
        };
        self.current_index += 1;
        Some(coords)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.batches_count() - self.current_index;
        (remaining, Some(remaining))
    }
}
