use chrono::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{
    Board, Coord2, FlagOutcome, GameConfig, MinePlacer, RandomPlacer, Result, RevealOutcome,
};

/// Whether the session still accepts play commands, and how it ended.
///
/// Valid transitions: `InProgress -> Won` and `InProgress -> Lost`. Both end
/// states are terminal; only [`GameSession::restart`] leaves them, by
/// replacing the session state wholesale.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    #[default]
    InProgress,
    Won,
    Lost,
}

impl GameStatus {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// One game from start to finish. Exclusive owner of its [`Board`]; tracks
/// elapsed time and the explosion marker the presentation layer uses to
/// drive the loss animation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameSession {
    board: Board,
    status: GameStatus,
    started_at: DateTime<Utc>,
    ended_at: Option<DateTime<Utc>>,
    explosion_started_at: Option<DateTime<Utc>>,
    hit_mine: Option<Coord2>,
}

impl GameSession {
    /// Starts a session on a randomly mined board. The clock starts now,
    /// not at the first move.
    pub fn new(config: GameConfig) -> Result<Self> {
        Self::with_placer(config, RandomPlacer::from_entropy())
    }

    /// Starts a session with an explicit placement strategy, for seeded
    /// replays and tests.
    pub fn with_placer(config: GameConfig, placer: impl MinePlacer) -> Result<Self> {
        let board = Board::with_mines(config, placer)?;
        log::debug!(
            "new session: {}x{} board, {} mines",
            config.height,
            config.width,
            config.mines
        );
        Ok(Self {
            board,
            status: GameStatus::InProgress,
            started_at: Utc::now(),
            ended_at: None,
            explosion_started_at: None,
            hit_mine: None,
        })
    }

    /// Discards the whole session and starts over: fresh board, fresh
    /// clock, status back to in-progress. Callable from any state; on
    /// error the current session is left untouched.
    pub fn restart(&mut self, config: GameConfig) -> Result<()> {
        *self = Self::new(config)?;
        Ok(())
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Set once on loss; the presentation layer computes ticks elapsed
    /// since this marker from its own clock to pick the explosion frame.
    pub fn explosion_started_at(&self) -> Option<DateTime<Utc>> {
        self.explosion_started_at
    }

    /// The mine that ended the game, if it ended in a loss.
    pub fn hit_mine(&self) -> Option<Coord2> {
        self.hit_mine
    }

    pub fn mines_left(&self) -> i64 {
        self.board.mines_left()
    }

    /// Seconds since the session started, frozen at the moment the game
    /// ended.
    pub fn elapsed_secs(&self) -> u32 {
        (self.ended_at.unwrap_or_else(Utc::now) - self.started_at)
            .num_seconds()
            .max(0) as u32
    }

    /// Reveals a cell, then advances the state machine: a mine hit loses
    /// the game, clearing the last safe cell wins it. No-op once the game
    /// has ended.
    pub fn reveal(&mut self, coords: Coord2) -> RevealOutcome {
        if self.status.is_finished() {
            return RevealOutcome::NoChange;
        }

        let outcome = self.board.reveal(coords);
        match &outcome {
            RevealOutcome::MineHit => {
                let now = Utc::now();
                self.status = GameStatus::Lost;
                self.ended_at = Some(now);
                self.explosion_started_at = Some(now);
                self.hit_mine = Some(coords);
                log::debug!("lost at {:?} after {}s", coords, self.elapsed_secs());
            }
            RevealOutcome::Revealed(_) if self.board.is_fully_cleared() => {
                self.status = GameStatus::Won;
                self.ended_at = Some(Utc::now());
                log::debug!("won after {}s", self.elapsed_secs());
            }
            _ => {}
        }
        outcome
    }

    /// Flags or unflags a cell. No-op once the game has ended.
    pub fn toggle_flag(&mut self, coords: Coord2) -> FlagOutcome {
        if self.status.is_finished() {
            return FlagOutcome::NoChange;
        }
        self.board.toggle_flag(coords)
    }
}
