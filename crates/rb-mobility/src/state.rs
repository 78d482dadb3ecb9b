//! Per-robot movement state.

use rb_core::{Coord, Tick};

/// The movement state for a single robot.
///
/// A robot is either **stationary** at `from` (`in_transit = false`) or
/// **stepping** from `from` into `to`.  A wait is a step with
/// `from == to`: it takes as long as a real step and keeps the robot busy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MovementState {
    pub in_transit: bool,

    /// Cell the robot is leaving (or standing on when stationary).
    pub from: Coord,

    /// Cell being entered.  Equals `from` when stationary.
    pub to: Coord,

    pub departure_tick: Tick,
    pub arrival_tick:   Tick,
}

impl MovementState {
    #[inline]
    pub fn stationary(cell: Coord, tick: Tick) -> Self {
        Self {
            in_transit:     false,
            from:           cell,
            to:             cell,
            departure_tick: tick,
            arrival_tick:   tick,
        }
    }

    /// Fraction of the step completed at `now`, in `[0.0, 1.0]`.
    pub fn progress(&self, now: Tick) -> f32 {
        if !self.in_transit || self.arrival_tick <= self.departure_tick {
            return 1.0;
        }
        let elapsed = now.0.saturating_sub(self.departure_tick.0) as f32;
        let total   = (self.arrival_tick.0 - self.departure_tick.0) as f32;
        (elapsed / total).min(1.0)
    }

    /// `true` if the robot stands on or is entering `cell`.
    #[inline]
    pub fn occupies(&self, cell: Coord) -> bool {
        self.from == cell || (self.in_transit && self.to == cell)
    }
}
