//! Simulation observer trait for progress reporting and data collection.

use rb_agent::RobotStore;
use rb_core::{Elapsed, SimEvent, Tick};
use rb_mobility::MobilityStore;

/// Callbacks invoked by [`Sim::tick`][crate::Sim::tick] and
/// [`Sim::run`][crate::Sim::run].
///
/// All methods default to no-ops.
///
/// # Example: event printer
///
/// ```rust,ignore
/// struct Printer;
///
/// impl SimObserver for Printer {
///     fn on_event(&mut self, tick: Tick, event: SimEvent) {
///         println!("{tick}: {event}");
///     }
/// }
/// ```
pub trait SimObserver {
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// `moving` is the number of robots mid-step (waits included) after
    /// planning.
    fn on_tick_end(&mut self, _tick: Tick, _moving: usize) {}

    /// Each event as the driver handles it, in raise order.
    fn on_event(&mut self, _tick: Tick, _event: SimEvent) {}

    /// Called every `config.output_interval_ticks` ticks with the robot and
    /// movement state after planning.
    fn on_snapshot(
        &mut self,
        _tick:     Tick,
        _robots:   &RobotStore,
        _mobility: &MobilityStore,
    ) {}

    /// Called once when [`Sim::run`][crate::Sim::run] returns, finished or
    /// not.
    fn on_sim_end(&mut self, _final_tick: Tick, _elapsed: Elapsed) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
