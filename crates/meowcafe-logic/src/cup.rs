//! Cup composition — the ordered slot machine behind every drink.
//!
//! A cup fills strictly in the order powder → water → creamer → topping →
//! sauce. Each application is checked against the slot before it; anything
//! applied out of order leaves the cup untouched. The filled slots are
//! encoded into a short composition key (`"GPYCMMACA"`, `"EMPTY"`, ...) that
//! selects the cup sprite and identifies the drink.
//!
//! ```
//! use meowcafe_logic::cup::Cup;
//! use meowcafe_logic::ingredients::Ingredient;
//!
//! let mut cup = Cup::new();
//! cup.activate();
//! cup.apply(Ingredient::CocoaPowder);
//! cup.apply(Ingredient::HotWater);
//! assert_eq!(cup.key(), "CPY");
//! ```

use serde::{Deserialize, Serialize};

use crate::ingredients::{Ingredient, SlotKind};

/// Key of a cup with no slot filled.
pub const EMPTY_KEY: &str = "EMPTY";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Powder {
    GreenTea,
    Cocoa,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Creamer {
    CondensedMilk,
    Milk,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Topping {
    Marshmallow,
    WhippedCream,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sauce {
    Caramel,
    Chocolate,
}

impl Powder {
    pub fn ingredient(self) -> Ingredient {
        match self {
            Powder::GreenTea => Ingredient::GreenTeaPowder,
            Powder::Cocoa => Ingredient::CocoaPowder,
        }
    }
}

impl Creamer {
    pub fn ingredient(self) -> Ingredient {
        match self {
            Creamer::CondensedMilk => Ingredient::CondensedMilk,
            Creamer::Milk => Ingredient::Milk,
        }
    }
}

impl Topping {
    pub fn ingredient(self) -> Ingredient {
        match self {
            Topping::Marshmallow => Ingredient::Marshmallow,
            Topping::WhippedCream => Ingredient::WhippedCream,
        }
    }
}

impl Sauce {
    pub fn ingredient(self) -> Ingredient {
        match self {
            Sauce::Caramel => Ingredient::CaramelSauce,
            Sauce::Chocolate => Ingredient::ChocolateSauce,
        }
    }
}

/// The five composition slots. `None` / `false` means empty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CupSlots {
    pub powder: Option<Powder>,
    pub water: bool,
    pub creamer: Option<Creamer>,
    pub topping: Option<Topping>,
    pub sauce: Option<Sauce>,
}

impl CupSlots {
    pub fn is_empty(&self) -> bool {
        *self == CupSlots::default()
    }

    /// Whether `slot` currently holds a value.
    pub fn is_filled(&self, slot: SlotKind) -> bool {
        match slot {
            SlotKind::Powder => self.powder.is_some(),
            SlotKind::Water => self.water,
            SlotKind::Creamer => self.creamer.is_some(),
            SlotKind::Topping => self.topping.is_some(),
            SlotKind::Sauce => self.sauce.is_some(),
        }
    }

    /// Every slot has a value.
    pub fn is_complete(&self) -> bool {
        self.powder.is_some()
            && self.water
            && self.creamer.is_some()
            && self.topping.is_some()
            && self.sauce.is_some()
    }

    /// Slot values respect the fill order: nothing is set unless the slot
    /// before it is set too.
    pub fn is_well_ordered(&self) -> bool {
        (!self.water || self.powder.is_some())
            && (self.creamer.is_none() || self.water)
            && (self.topping.is_none() || self.creamer.is_some())
            && (self.sauce.is_none() || self.topping.is_some())
    }
}

/// Slot that must be filled before `slot` may be set.
fn prerequisite(slot: SlotKind) -> Option<SlotKind> {
    match slot {
        SlotKind::Powder => None,
        SlotKind::Water => Some(SlotKind::Powder),
        SlotKind::Creamer => Some(SlotKind::Water),
        SlotKind::Topping => Some(SlotKind::Creamer),
        SlotKind::Sauce => Some(SlotKind::Topping),
    }
}

/// Canonical composition key for a set of slot values.
///
/// Powder token, then `Y`/`N` for water (only when powder is set), then
/// creamer gated on water, topping gated on creamer, sauce gated on
/// topping. Pure: equal slots always give equal keys.
pub fn composition_key(slots: &CupSlots) -> String {
    let mut key = String::new();

    if let Some(powder) = slots.powder {
        key.push_str(powder.ingredient().key_code().unwrap_or_default());
        key.push(if slots.water { 'Y' } else { 'N' });
    }
    if slots.water {
        if let Some(creamer) = slots.creamer {
            key.push_str(creamer.ingredient().key_code().unwrap_or_default());
            if let Some(topping) = slots.topping {
                key.push_str(topping.ingredient().key_code().unwrap_or_default());
                if let Some(sauce) = slots.sauce {
                    key.push_str(sauce.ingredient().key_code().unwrap_or_default());
                }
            }
        }
    }

    if key.is_empty() {
        EMPTY_KEY.to_string()
    } else {
        key
    }
}

/// Why an application left the cup unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IgnoreReason {
    /// The cup has not been pulled from the stack.
    Inactive,
    /// Powder already chosen; the first powder wins.
    PowderAlreadySet,
    /// The slot before this one is still empty.
    OutOfOrder { missing: SlotKind },
}

/// Result of applying one ingredient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApplyOutcome {
    Applied(SlotKind),
    Ignored(IgnoreReason),
}

impl ApplyOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, ApplyOutcome::Applied(_))
    }
}

/// A cup on the counter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cup {
    slots: CupSlots,
    active: bool,
    key: String,
}

impl Cup {
    /// An inactive, empty cup sitting in the stack.
    pub fn new() -> Self {
        Self {
            slots: CupSlots::default(),
            active: false,
            key: EMPTY_KEY.to_string(),
        }
    }

    pub fn slots(&self) -> &CupSlots {
        &self.slots
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Pull a fresh cup from the stack: clear every slot and activate.
    pub fn activate(&mut self) {
        self.slots = CupSlots::default();
        self.active = true;
        self.recompute_key();
    }

    /// Put the cup back on the stack.
    pub fn reset(&mut self) {
        self.slots = CupSlots::default();
        self.active = false;
        self.recompute_key();
    }

    /// Apply one ingredient, honouring the fill order.
    pub fn apply(&mut self, ingredient: Ingredient) -> ApplyOutcome {
        if !self.active {
            return ApplyOutcome::Ignored(IgnoreReason::Inactive);
        }

        let slot = ingredient.slot();
        if let Some(missing) = prerequisite(slot) {
            if !self.slots.is_filled(missing) {
                return ApplyOutcome::Ignored(IgnoreReason::OutOfOrder { missing });
            }
        }

        match ingredient {
            Ingredient::GreenTeaPowder | Ingredient::CocoaPowder => {
                if self.slots.powder.is_some() {
                    return ApplyOutcome::Ignored(IgnoreReason::PowderAlreadySet);
                }
                self.slots.powder = Some(if ingredient == Ingredient::GreenTeaPowder {
                    Powder::GreenTea
                } else {
                    Powder::Cocoa
                });
            }
            Ingredient::HotWater => self.slots.water = true,
            Ingredient::CondensedMilk => self.slots.creamer = Some(Creamer::CondensedMilk),
            Ingredient::Milk => self.slots.creamer = Some(Creamer::Milk),
            Ingredient::Marshmallow => self.slots.topping = Some(Topping::Marshmallow),
            Ingredient::WhippedCream => self.slots.topping = Some(Topping::WhippedCream),
            Ingredient::CaramelSauce => self.slots.sauce = Some(Sauce::Caramel),
            Ingredient::ChocolateSauce => self.slots.sauce = Some(Sauce::Chocolate),
        }

        self.recompute_key();
        ApplyOutcome::Applied(slot)
    }

    /// Labels handed to the order validator, in order position:
    /// powder, creamer, topping, sauce. Water is implied by the creamer.
    pub fn presented_labels(&self) -> [Option<&'static str>; 4] {
        [
            self.slots.powder.map(|p| p.ingredient().label()),
            self.slots.creamer.map(|c| c.ingredient().label()),
            self.slots.topping.map(|t| t.ingredient().label()),
            self.slots.sauce.map(|s| s.ingredient().label()),
        ]
    }

    fn recompute_key(&mut self) {
        self.key = composition_key(&self.slots);
    }
}

impl Default for Cup {
    fn default() -> Self {
        Self::new()
    }
}
