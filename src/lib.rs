//! **labyrinth** generates perfect mazes over rectangular grids.
//!
//! A maze is carved by growing a spanning tree out from a start cell with a randomized frontier.
//! Cells can be disconnected (masked) beforehand to keep them out of the maze.

pub mod cells;
pub mod errors;
pub mod generators;
pub mod grid;
pub mod grid_dimensions;
pub mod grid_displays;
pub mod grid_iterators;
pub mod grid_traits;
pub mod grids;
pub mod masks;
pub mod pathing;
pub mod units;
mod utils;
