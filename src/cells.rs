use std::fmt;
use std::str::FromStr;

use itertools::Itertools;

use crate::errors::{Error, ErrorKind, ResultExt};
use crate::units::{ColumnIndex, RowIndex, RowLength};


#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct Cartesian2DCoordinate {
    pub x: u32,
    pub y: u32,
}

impl Cartesian2DCoordinate {
    pub fn new(x: u32, y: u32) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate { x, y }
    }

    #[inline]
    pub fn from_row_major_index(index: usize, row_length: RowLength) -> Cartesian2DCoordinate {
        let RowLength(width) = row_length;
        let x = index % width;
        let y = index / width;

        Cartesian2DCoordinate::new(x as u32, y as u32)
    }

    #[inline]
    pub fn from_row_column_indices(col_index: ColumnIndex, row_index: RowIndex) -> Self {
        let (ColumnIndex(col), RowIndex(row)) = (col_index, row_index);
        Cartesian2DCoordinate::new(col as u32, row as u32)
    }

    /// The coordinate one step away in `direction`, or None if that would step below zero on
    /// either axis. Whether the result lies inside any particular grid is the grid's business.
    pub fn offset(&self, direction: CompassPrimary) -> Option<Cartesian2DCoordinate> {
        let (dx, dy) = direction.offset();
        let x = i64::from(self.x) + dx;
        let y = i64::from(self.y) + dy;
        if x < 0 || y < 0 || x > i64::from(u32::MAX) || y > i64::from(u32::MAX) {
            None
        } else {
            Some(Cartesian2DCoordinate::new(x as u32, y as u32))
        }
    }
}

impl From<(u32, u32)> for Cartesian2DCoordinate {
    fn from(x_y_pair: (u32, u32)) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate::new(x_y_pair.0, x_y_pair.1)
    }
}


#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub enum CompassPrimary {
    North,
    South,
    East,
    West,
}

impl CompassPrimary {
    /// All directions, in the order used for wall markers and neighbour lists.
    pub const ALL: [CompassPrimary; 4] = [CompassPrimary::North,
                                          CompassPrimary::South,
                                          CompassPrimary::East,
                                          CompassPrimary::West];

    pub fn opposite(self) -> CompassPrimary {
        match self {
            CompassPrimary::North => CompassPrimary::South,
            CompassPrimary::South => CompassPrimary::North,
            CompassPrimary::East => CompassPrimary::West,
            CompassPrimary::West => CompassPrimary::East,
        }
    }

    /// (Δcol, Δrow) of one step in this direction. Rows grow southwards.
    pub fn offset(self) -> (i64, i64) {
        match self {
            CompassPrimary::North => (0, -1),
            CompassPrimary::South => (0, 1),
            CompassPrimary::East => (1, 0),
            CompassPrimary::West => (-1, 0),
        }
    }

    #[inline]
    pub fn index(self) -> usize {
        match self {
            CompassPrimary::North => 0,
            CompassPrimary::South => 1,
            CompassPrimary::East => 2,
            CompassPrimary::West => 3,
        }
    }

    pub fn marker(self) -> char {
        match self {
            CompassPrimary::North => 'N',
            CompassPrimary::South => 'S',
            CompassPrimary::East => 'E',
            CompassPrimary::West => 'W',
        }
    }
}

impl FromStr for CompassPrimary {
    type Err = Error;

    fn from_str(s: &str) -> Result<CompassPrimary, Error> {
        match s.trim().to_ascii_lowercase().as_str() {
            "n" | "north" => Ok(CompassPrimary::North),
            "s" | "south" => Ok(CompassPrimary::South),
            "e" | "east" => Ok(CompassPrimary::East),
            "w" | "west" => Ok(CompassPrimary::West),
            _ => Err(ErrorKind::InvalidDirection(s.to_string()).into()),
        }
    }
}


/// One wall of one cell, e.g. a gate to open in the outer boundary.
///
/// Parses from `x,y,dir` text such as `0,3,W` or `4, 0, north`.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct CellWall {
    pub coordinate: Cartesian2DCoordinate,
    pub direction: CompassPrimary,
}

impl FromStr for CellWall {
    type Err = Error;

    fn from_str(s: &str) -> Result<CellWall, Error> {
        const FORM: &str = "x,y,dir";

        let (x_text, y_text, direction_text) = s.split(',')
            .collect_tuple::<(&str, &str, &str)>()
            .ok_or_else(|| Error::from(ErrorKind::MalformedText(s.to_string(), FORM)))?;

        let x = x_text.trim()
            .parse::<u32>()
            .chain_err(|| ErrorKind::MalformedText(s.to_string(), FORM))?;
        let y = y_text.trim()
            .parse::<u32>()
            .chain_err(|| ErrorKind::MalformedText(s.to_string(), FORM))?;

        Ok(CellWall {
            coordinate: Cartesian2DCoordinate::new(x, y),
            direction: direction_text.parse()?,
        })
    }
}


/// Which of the four walls of a cell are still standing. `true` means the wall is present.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub struct WallState {
    pub north: bool,
    pub south: bool,
    pub east: bool,
    pub west: bool,
}

impl WallState {
    pub fn closed() -> WallState {
        WallState {
            north: true,
            south: true,
            east: true,
            west: true,
        }
    }

    #[inline]
    pub fn has_wall(&self, direction: CompassPrimary) -> bool {
        match direction {
            CompassPrimary::North => self.north,
            CompassPrimary::South => self.south,
            CompassPrimary::East => self.east,
            CompassPrimary::West => self.west,
        }
    }

    #[inline]
    pub fn is_open(&self, direction: CompassPrimary) -> bool {
        !self.has_wall(direction)
    }

    pub fn set_wall(&mut self, direction: CompassPrimary, present: bool) {
        match direction {
            CompassPrimary::North => self.north = present,
            CompassPrimary::South => self.south = present,
            CompassPrimary::East => self.east = present,
            CompassPrimary::West => self.west = present,
        }
    }

    pub fn is_fully_closed(&self) -> bool {
        self.north && self.south && self.east && self.west
    }

    pub fn open_count(&self) -> usize {
        CompassPrimary::ALL.iter().filter(|&&dir| self.is_open(dir)).count()
    }
}

impl Default for WallState {
    fn default() -> WallState {
        WallState::closed()
    }
}

/// Renders as `[NSEW]` with a space standing in for each direction that still has a wall,
/// e.g. `[ SE ]` for a cell open to the south and east.
impl fmt::Display for WallState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut marker = String::with_capacity(6);
        marker.push('[');
        for dir in CompassPrimary::ALL.iter() {
            if self.is_open(*dir) {
                marker.push(dir.marker());
            } else {
                marker.push(' ');
            }
        }
        marker.push(']');
        f.write_str(&marker)
    }
}


/// A snapshot of one grid cell: where it is and which walls it has.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct Cell {
    pub row: u32,
    pub col: u32,
    pub walls: WallState,
}

impl Cell {
    #[inline]
    pub fn coordinate(&self) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate::new(self.col, self.row)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_directions() {
        for dir in CompassPrimary::ALL.iter() {
            assert_ne!(dir.opposite(), *dir);
            assert_eq!(dir.opposite().opposite(), *dir);
            let (dx, dy) = dir.offset();
            let (odx, ody) = dir.opposite().offset();
            assert_eq!((dx + odx, dy + ody), (0, 0));
        }
    }

    #[test]
    fn direction_indices_are_distinct() {
        let mut indices = CompassPrimary::ALL.iter().map(|d| d.index()).collect::<Vec<_>>();
        indices.sort();
        assert_eq!(indices, vec![0, 1, 2, 3]);
    }

    #[test]
    fn coordinate_offsets() {
        let gc = |x, y| Cartesian2DCoordinate::new(x, y);
        assert_eq!(gc(0, 0).offset(CompassPrimary::North), None);
        assert_eq!(gc(0, 0).offset(CompassPrimary::West), None);
        assert_eq!(gc(0, 0).offset(CompassPrimary::South), Some(gc(0, 1)));
        assert_eq!(gc(0, 0).offset(CompassPrimary::East), Some(gc(1, 0)));
        assert_eq!(gc(3, 3).offset(CompassPrimary::North), Some(gc(3, 2)));
        assert_eq!(gc(u32::MAX, 0).offset(CompassPrimary::East), None);
    }

    #[test]
    fn row_major_indices() {
        let coord = Cartesian2DCoordinate::from_row_major_index(7, RowLength(3));
        assert_eq!(coord, Cartesian2DCoordinate::new(1, 2));
        let coord = Cartesian2DCoordinate::from_row_column_indices(ColumnIndex(4), RowIndex(1));
        assert_eq!(coord, Cartesian2DCoordinate::new(4, 1));
    }

    #[test]
    fn parse_directions() {
        assert_eq!("N".parse::<CompassPrimary>().unwrap(), CompassPrimary::North);
        assert_eq!("south".parse::<CompassPrimary>().unwrap(), CompassPrimary::South);
        assert_eq!(" e ".parse::<CompassPrimary>().unwrap(), CompassPrimary::East);
        assert_eq!("West".parse::<CompassPrimary>().unwrap(), CompassPrimary::West);

        let err = "up".parse::<CompassPrimary>().unwrap_err();
        match *err.kind() {
            ErrorKind::InvalidDirection(ref text) => assert_eq!(text, "up"),
            ref other => panic!("unexpected error kind {:?}", other),
        }
        let message = err.to_string();
        for name in &["N", "S", "E", "W", "North", "South", "East", "West"] {
            assert!(message.contains(name), "'{}' missing from '{}'", name, message);
        }
    }

    #[test]
    fn parse_cell_walls() {
        let wall = "0,3,W".parse::<CellWall>().unwrap();
        assert_eq!(wall.coordinate, Cartesian2DCoordinate::new(0, 3));
        assert_eq!(wall.direction, CompassPrimary::West);

        let wall = " 4, 0 , north".parse::<CellWall>().unwrap();
        assert_eq!(wall,
                   CellWall {
                       coordinate: Cartesian2DCoordinate::new(4, 0),
                       direction: CompassPrimary::North,
                   });
    }

    #[test]
    fn malformed_cell_walls() {
        for text in &["", "1,2", "1,2,N,4", "a,2,N", "1,-2,N"] {
            let err = text.parse::<CellWall>().unwrap_err();
            match *err.kind() {
                ErrorKind::MalformedText(ref bad, "x,y,dir") => assert_eq!(bad, text),
                ref other => panic!("unexpected error kind {:?} for '{}'", other, text),
            }
        }

        let err = "1,2,up".parse::<CellWall>().unwrap_err();
        match *err.kind() {
            ErrorKind::InvalidDirection(ref text) => assert_eq!(text, "up"),
            ref other => panic!("unexpected error kind {:?}", other),
        }
    }

    #[test]
    fn wall_state_markers() {
        let mut walls = WallState::closed();
        assert_eq!(walls.to_string(), "[    ]");
        assert!(walls.is_fully_closed());

        walls.set_wall(CompassPrimary::South, false);
        walls.set_wall(CompassPrimary::West, false);
        assert_eq!(walls.to_string(), "[ S W]");
        assert_eq!(walls.open_count(), 2);
        assert!(walls.is_open(CompassPrimary::West));
        assert!(walls.has_wall(CompassPrimary::North));
        assert!(!walls.is_fully_closed());
    }
}
