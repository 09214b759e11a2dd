//! Loss-animation timeline.
//!
//! The engine records only the start marker
//! ([`crate::GameSession::explosion_started_at`]); the presentation layer
//! turns its own clock into a tick count and asks this module which mine
//! frame to draw over every mine cell. That keeps the engine free of
//! frame-rate assumptions.

/// Number of distinct mine animation frames.
pub const EXPLOSION_FRAMES: u32 = 10;

/// Ticks a single frame stays on screen before advancing.
pub const TICKS_PER_FRAME: u32 = 3;

/// Length of the whole explosion window, in ticks.
pub const EXPLOSION_DURATION_TICKS: u32 = 30;

/// Frame index to draw `ticks` after the explosion marker, cycling through
/// the frame set. `None` once the animation window has passed.
pub const fn explosion_frame(ticks: u32) -> Option<u32> {
    if ticks > EXPLOSION_DURATION_TICKS {
        None
    } else {
        Some(ticks / TICKS_PER_FRAME % EXPLOSION_FRAMES)
    }
}
