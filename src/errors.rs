//! Error types for grid construction, mutation and maze generation.
//!
//! Out of bounds *lookups* are not errors, they return `None` so that the grid edges can be
//! treated the same way as disconnected cells. Only mutations and generation fail.

#![allow(deprecated)] // error_chain still implements `Error::description`

use error_chain::*;

error_chain! {

    errors {
        InvalidDimensions(width: usize, height: usize) {
            description("invalid grid dimensions")
            display("invalid grid dimensions {}x{}: width and height must be positive", width, height)
        }

        GridTooLarge(width: usize, height: usize) {
            description("grid too large for its index type")
            display("a {}x{} grid does not fit the grid's graph index type", width, height)
        }

        CellOutOfBounds(x: i64, y: i64) {
            description("cell coordinate outside of the grid")
            display("cell ({}, {}) is outside of the grid", x, y)
        }

        StartOutOfBounds(x: u32, y: u32) {
            description("maze start outside of the grid")
            display("maze start ({}, {}) is outside of the grid", x, y)
        }

        UnreachableStart(x: u32, y: u32) {
            description("maze start has no live neighbours")
            display("maze start ({}, {}) is disconnected from every neighbouring cell", x, y)
        }

        InvalidDirection(text: String) {
            description("invalid compass direction")
            display("'{}' is not a compass direction, expected one of N, S, E, W or North, South, \
                     East, West in any case", text)
        }

        MalformedText(text: String, expected: &'static str) {
            description("text not in the expected form")
            display("'{}' is not of the form {}", text, expected)
        }
    }
}
