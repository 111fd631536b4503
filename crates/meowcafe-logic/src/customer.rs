//! Customer patience — countdown, emotion thresholds, timeout.
//!
//! Each visible customer is ticked once per simulation step. Elapsed ticks
//! climb towards `order_end = base_duration × patience`; the emotion sours
//! as quarter, half and three-quarter marks are passed, and when the
//! deadline is reached the customer leaves and the score takes a penalty.

use serde::{Deserialize, Serialize};

use crate::order::Order;

/// Number of serving seats at the counter.
pub const SEAT_COUNT: usize = 3;

/// How a waiting customer feels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Emotion {
    /// Just arrived, within the first quarter of patience.
    #[default]
    Happy,
    /// Past a quarter of the deadline.
    Warning,
    /// Past half of the deadline.
    Frustrated,
    /// Past three quarters of the deadline.
    Angry,
}

impl Emotion {
    /// Emotion for `current` elapsed ticks out of `order_end`.
    ///
    /// Thresholds are strict and use integer division, so with
    /// `order_end = 1000` tick 501 is the first frustrated tick.
    pub fn at(current: u32, order_end: u32) -> Self {
        let three_quarters = (order_end as u64 * 3 / 4) as u32;
        if current > three_quarters {
            Emotion::Angry
        } else if current > order_end / 2 {
            Emotion::Frustrated
        } else if current > order_end / 4 {
            Emotion::Warning
        } else {
            Emotion::Happy
        }
    }
}

/// Deadline in ticks for a customer with the given patience multiplier.
pub fn order_deadline(base_duration: u32, patience: f32) -> u32 {
    (base_duration as f32 * patience.max(0.0)).round() as u32
}

/// What a single tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TickOutcome {
    /// Still waiting; emotion may have changed.
    Waiting { emotion: Emotion },
    /// Deadline reached this tick; the customer left.
    TimedOut,
    /// Not visible; nothing to do.
    Idle,
}

/// A customer in one of the serving seats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    /// Seat index, 1..=3.
    pub seat: u8,
    pub emotion: Emotion,
    pub visible: bool,
    pub order: Order,
    pub patience: f32,
    /// Elapsed ticks.
    pub current_time: u32,
    /// Deadline in ticks.
    pub order_end: u32,
}

impl Customer {
    pub fn new(seat: u8, order: Order, base_duration: u32, patience: f32) -> Self {
        Self {
            seat,
            emotion: Emotion::Happy,
            visible: true,
            order,
            patience,
            current_time: 0,
            order_end: order_deadline(base_duration, patience),
        }
    }

    /// Advance one tick.
    ///
    /// The customer is removed on the tick where `current_time` reaches
    /// `order_end`, and only then; later ticks are idle.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.visible {
            return TickOutcome::Idle;
        }

        if self.current_time < self.order_end {
            self.current_time += 1;
            self.emotion = Emotion::at(self.current_time, self.order_end);
        }

        if self.current_time >= self.order_end {
            self.visible = false;
            return TickOutcome::TimedOut;
        }

        TickOutcome::Waiting {
            emotion: self.emotion,
        }
    }

    /// Leave after being served.
    pub fn dismiss(&mut self) {
        self.visible = false;
    }

    /// Ticks left before the customer walks out.
    pub fn remaining(&self) -> u32 {
        self.order_end.saturating_sub(self.current_time)
    }

    /// Elapsed share of patience, 0.0..=1.0.
    pub fn urgency(&self) -> f32 {
        if self.order_end == 0 {
            return 1.0;
        }
        (self.current_time as f32 / self.order_end as f32).min(1.0)
    }
}
