//! Simulation time model.
//!
//! # Design
//!
//! Time is a monotonically increasing `Tick` counter.  Each tick stands for
//! `tick_duration_ms` simulated milliseconds:
//!
//!   elapsed_ms = tick * tick_duration_ms
//!
//! The speed multiplier never touches simulated time.  It only scales the
//! wall-clock interval a real-time driver waits between ticks, so a run
//! produces the same elapsed times at any speed.

use std::fmt;
use std::time::Duration;

use crate::{CoreError, CoreResult};

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── Elapsed ──────────────────────────────────────────────────────────────────

/// Simulated elapsed time, displayed stopwatch-style as `MM:SS:CC`.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Elapsed {
    pub millis: u64,
}

impl Elapsed {
    #[inline]
    pub fn from_millis(millis: u64) -> Self {
        Self { millis }
    }

    /// Break into (minutes, seconds, centiseconds).
    pub fn mmsscc(self) -> (u64, u32, u32) {
        let minutes = self.millis / 60_000;
        let seconds = ((self.millis % 60_000) / 1_000) as u32;
        let centis = ((self.millis % 1_000) / 10) as u32;
        (minutes, seconds, centis)
    }
}

impl fmt::Display for Elapsed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (m, s, c) = self.mmsscc();
        write!(f, "{m:02}:{s:02}:{c:02}")
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Tracks the current tick and converts it to simulated elapsed time.
#[derive(Clone, Debug)]
pub struct SimClock {
    /// Simulated milliseconds represented by one tick.
    pub tick_duration_ms: u32,
    /// The current tick, advanced by [`SimClock::advance`].
    pub current_tick: Tick,
}

impl SimClock {
    pub fn new(tick_duration_ms: u32) -> Self {
        Self {
            tick_duration_ms,
            current_tick: Tick::ZERO,
        }
    }

    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = Tick(self.current_tick.0 + 1);
    }

    /// Back to tick zero.
    #[inline]
    pub fn reset(&mut self) {
        self.current_tick = Tick::ZERO;
    }

    #[inline]
    pub fn elapsed_at(&self, tick: Tick) -> Elapsed {
        Elapsed::from_millis(tick.0 * self.tick_duration_ms as u64)
    }

    /// Elapsed simulated time at the current tick.
    #[inline]
    pub fn elapsed(&self) -> Elapsed {
        self.elapsed_at(self.current_tick)
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.current_tick, self.elapsed())
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
///
/// Loaded from the `[sim]` table of a TOML file by the application; every
/// key is optional and falls back to [`SimConfig::default`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Simulated milliseconds per tick.  Default: 10.
    pub tick_duration_ms: u32,

    /// Ticks a robot needs to cross one cell (or to wait one step in place).
    /// Default: 10.
    pub ticks_per_step: u32,

    /// Pacing factor for real-time drivers.  2.0 runs twice as fast in wall
    /// time; simulated time is unaffected.  Default: 1.0.
    pub speed_multiplier: f32,

    /// Upper bound on ticks processed by `Sim::run`.  A run whose robots
    /// stall never finishes on its own, so the horizon is what stops it.
    pub max_ticks: u64,

    /// Emit an observer snapshot every N ticks.  0 disables snapshots.
    pub output_interval_ticks: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tick_duration_ms:      10,
            ticks_per_step:        10,
            speed_multiplier:      1.0,
            max_ticks:             1_000_000,
            output_interval_ticks: 1,
        }
    }
}

impl SimConfig {
    /// Reject values the tick loop cannot work with.
    pub fn validate(&self) -> CoreResult<()> {
        if self.tick_duration_ms == 0 {
            return Err(CoreError::Config("tick_duration_ms must be positive".into()));
        }
        if self.ticks_per_step == 0 {
            return Err(CoreError::Config("ticks_per_step must be positive".into()));
        }
        if !self.speed_multiplier.is_finite() || self.speed_multiplier <= 0.0 {
            return Err(CoreError::Config(format!(
                "speed_multiplier must be finite and positive, got {}",
                self.speed_multiplier
            )));
        }
        Ok(())
    }

    /// Wall-clock interval between ticks after applying the speed multiplier.
    pub fn tick_interval(&self) -> Duration {
        let nanos = f64::from(self.tick_duration_ms) * 1e6 / f64::from(self.speed_multiplier);
        Duration::from_nanos(nanos.round() as u64)
    }

    /// Construct a `SimClock` pre-configured for this run.
    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.tick_duration_ms)
    }
}
