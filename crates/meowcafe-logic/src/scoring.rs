//! Score accumulator and point distribution.
//!
//! Points are awarded per presented item (+50 each, up to +200), not per
//! matching item. Whether a mismatched cup still earns presence points is a
//! [`ScoringPolicy`] choice; the default keeps the long-standing behaviour
//! where it does.

use serde::{Deserialize, Serialize};

use crate::order::{validate_presented, Order, ORDER_LEN};

/// Points per presented (non-empty) order position.
pub const POINTS_PER_ITEM: i32 = 50;

/// Score lost when a customer's patience runs out.
pub const TIMEOUT_PENALTY: i32 = 50;

/// How a presented cup is scored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringPolicy {
    /// Award presence points for every submission, matched or not.
    #[default]
    Presence,
    /// Award presence points only when the order matches; a mismatch is a
    /// no-op.
    MatchedOnly,
}

/// Points for a presentation: `points_per_item` for every non-empty
/// position, regardless of what it holds.
pub fn distribute_points(presented: &[Option<&str>; ORDER_LEN], points_per_item: i32) -> i32 {
    presented.iter().filter(|p| p.is_some()).count() as i32 * points_per_item
}

/// Outcome of presenting a cup to an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub matched: bool,
    pub points: i32,
}

/// Validate and score one presentation under `policy`.
pub fn judge(
    order: &Order,
    presented: &[Option<&str>; ORDER_LEN],
    policy: ScoringPolicy,
    points_per_item: i32,
) -> Verdict {
    let matched = validate_presented(order, presented);
    let points = match (matched, policy) {
        (true, _) | (false, ScoringPolicy::Presence) => {
            distribute_points(presented, points_per_item)
        }
        // Mismatch handling is not defined yet.
        (false, ScoringPolicy::MatchedOnly) => 0,
    };
    Verdict { matched, points }
}

/// Running score plus the tallies shown on the HUD.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoreboard {
    pub score: i32,
    pub served: u32,
    pub mismatched: u32,
    pub timed_out: u32,
}

impl Scoreboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a judged presentation.
    pub fn record_verdict(&mut self, verdict: Verdict) {
        self.score += verdict.points;
        if verdict.matched {
            self.served += 1;
        } else {
            self.mismatched += 1;
        }
    }

    /// Record a customer leaving unserved.
    pub fn record_timeout(&mut self, penalty: i32) {
        self.score -= penalty;
        self.timed_out += 1;
    }
}
