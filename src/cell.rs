use serde::{Deserialize, Serialize};

/// One grid position. Never both revealed and flagged: flagging is refused
/// on revealed cells and revealing is refused on flagged cells.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub(crate) mine: bool,
    pub(crate) adjacent_mines: u8,
    pub(crate) revealed: bool,
    pub(crate) flagged: bool,
}

impl Cell {
    pub const fn is_mine(self) -> bool {
        self.mine
    }

    /// Mines among the up-to-8 neighbors, in `0..=8`. Meaningful only for
    /// non-mine cells, and fixed once the board setup has run.
    pub const fn adjacent_mines(self) -> u8 {
        self.adjacent_mines
    }

    pub const fn is_revealed(self) -> bool {
        self.revealed
    }

    pub const fn is_flagged(self) -> bool {
        self.flagged
    }

    /// Closed and unflagged, so a reveal command would change it.
    pub const fn is_untouched(self) -> bool {
        !self.revealed && !self.flagged
    }
}
