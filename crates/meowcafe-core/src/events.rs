//! Session events - what happened during a frame, for presentation code
//! (sounds, particles) and for tests.

use meowcafe_logic::cup::IgnoreReason;
use meowcafe_logic::ingredients::Ingredient;
use meowcafe_logic::order::Order;
use serde::{Deserialize, Serialize};

use crate::components::ObjectKind;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SessionEvent {
    StageStarted,
    /// The pointer picked something up.
    Grabbed { object: ObjectKind },
    /// A fresh cup was pulled from the stack.
    CupActivated,
    /// The cup was dropped onto the mat.
    CupSnapped,
    /// The cup went back to the stack and was emptied.
    CupReturned,
    IngredientApplied { ingredient: Ingredient, key: String },
    IngredientIgnored { ingredient: Ingredient, reason: IgnoreReason },
    /// Dropped somewhere other than the cup.
    IngredientMissed { ingredient: Ingredient },
    CustomerArrived { seat: u8, order: Order },
    CustomerTimedOut { seat: u8, penalty: i32 },
    Served { seat: u8, matched: bool, points: i32 },
}
