use thiserror::Error;

use crate::types::{CellCount, Coord};

/// Setup-time failures. Play-time commands with invalid input (out-of-bounds
/// coordinates, acting on a revealed cell, acting after the game ended) are
/// silent no-op outcomes, never errors.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("invalid board configuration: {height}x{width} with {mines} mines")]
    InvalidConfiguration {
        height: Coord,
        width: Coord,
        mines: CellCount,
    },
    #[error("mines have already been placed on this board")]
    MinesAlreadyPlaced,
    #[error("mine coordinate ({0}, {1}) is outside the board")]
    MineOutOfBounds(Coord, Coord),
    #[error("mine placement produced {actual} mines, expected {expected}")]
    MineCountMismatch {
        expected: CellCount,
        actual: CellCount,
    },
}

pub type Result<T> = core::result::Result<T, GameError>;
