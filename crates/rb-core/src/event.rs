//! Events raised by robots and consumed by the simulation driver.

use std::fmt;

use crate::RobotId;

/// A robot reached a point of interest.
///
/// Each variant fires exactly once per matching position: movement raises
/// it when a robot's path runs out at the relevant cell, and the driver
/// drains the queue once per tick in the order events were raised.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SimEvent {
    /// The robot reached the package it claimed and is now carrying it.
    ArrivedAtPackage(RobotId),
    /// The robot dropped its package at a delivery point.
    ArrivedAtDelivery(RobotId),
    /// The robot is back at its start cell with nothing left to fetch.
    Parked(RobotId),
}

impl SimEvent {
    #[inline]
    pub fn robot(self) -> RobotId {
        match self {
            SimEvent::ArrivedAtPackage(r)
            | SimEvent::ArrivedAtDelivery(r)
            | SimEvent::Parked(r) => r,
        }
    }

    /// Short label, used as a column value by output writers.
    pub fn as_str(self) -> &'static str {
        match self {
            SimEvent::ArrivedAtPackage(_)  => "at_package",
            SimEvent::ArrivedAtDelivery(_) => "at_delivery",
            SimEvent::Parked(_)            => "parked",
        }
    }
}

impl fmt::Display for SimEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.robot(), self.as_str())
    }
}
