//! Board and session engine for a single-player mine-clearing game.
//!
//! The crate owns the grid state, mine placement, adjacency counts, the
//! flood-fill reveal and the win/loss state machine. Rendering and input
//! live outside: a presentation layer issues commands ([`GameSession::reveal`],
//! [`GameSession::toggle_flag`], [`GameSession::restart`]) and reads state
//! back through the query surface each frame.

use serde::{Deserialize, Serialize};

pub use board::*;
pub use cell::*;
pub use error::*;
pub use explosion::*;
pub use generator::*;
pub use session::*;
pub use types::*;

mod board;
mod cell;
mod error;
mod explosion;
mod generator;
mod session;
mod types;

/// Board shape and mine count, validated once at construction.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub height: Coord,
    pub width: Coord,
    pub mines: CellCount,
}

impl GameConfig {
    pub fn new(height: Coord, width: Coord, mines: CellCount) -> Result<Self> {
        if height == 0 || width == 0 || mines >= area(height, width) {
            return Err(GameError::InvalidConfiguration {
                height,
                width,
                mines,
            });
        }
        Ok(Self {
            height,
            width,
            mines,
        })
    }

    pub const fn size(&self) -> Coord2 {
        (self.height, self.width)
    }

    pub const fn total_cells(&self) -> CellCount {
        area(self.height, self.width)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells() - self.mines
    }
}

impl Default for GameConfig {
    /// The reference setup: an 18x27 board hiding 100 mines.
    fn default() -> Self {
        Self {
            height: 18,
            width: 27,
            mines: 100,
        }
    }
}
