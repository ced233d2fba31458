//! Exclusive time-window occupancy: airplanes and crew members are both
//! resources that can serve at most one flight per window.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub departure: DateTime<Utc>,
    pub arrival: DateTime<Utc>,
}

impl TimeWindow {
    pub fn new(departure: DateTime<Utc>, arrival: DateTime<Utc>) -> Self {
        Self { departure, arrival }
    }

    /// Arrival must come strictly after departure.
    pub fn is_ordered(&self) -> bool {
        self.arrival > self.departure
    }

    /// Closed-interval conflict test: `d1 <= a2 && a1 >= d2`.
    ///
    /// Windows that merely touch at an endpoint conflict. That is policy,
    /// not an off-by-one: a landing and a departure at the same instant
    /// cannot share an airplane or a crew member.
    pub fn conflicts_with(&self, other: &TimeWindow) -> bool {
        self.departure <= other.arrival && self.arrival >= other.departure
    }
}
