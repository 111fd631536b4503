//! Ingredient catalogue — identities, the cup slot each one fills, labels.
//!
//! Labels are the strings orders are written in and compared against;
//! codes are the tokens the composition key is built from.

use serde::{Deserialize, Serialize};

/// Every ingredient on the counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ingredient {
    GreenTeaPowder,
    CocoaPowder,
    HotWater,
    CondensedMilk,
    Milk,
    Marshmallow,
    WhippedCream,
    CaramelSauce,
    ChocolateSauce,
}

/// Cup slots in their fixed fill order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SlotKind {
    Powder,
    Water,
    Creamer,
    Topping,
    Sauce,
}

impl Ingredient {
    pub fn all() -> &'static [Ingredient] {
        &[
            Ingredient::GreenTeaPowder,
            Ingredient::CocoaPowder,
            Ingredient::HotWater,
            Ingredient::CondensedMilk,
            Ingredient::Milk,
            Ingredient::Marshmallow,
            Ingredient::WhippedCream,
            Ingredient::CaramelSauce,
            Ingredient::ChocolateSauce,
        ]
    }

    /// The cup slot this ingredient fills.
    pub fn slot(self) -> SlotKind {
        match self {
            Ingredient::GreenTeaPowder | Ingredient::CocoaPowder => SlotKind::Powder,
            Ingredient::HotWater => SlotKind::Water,
            Ingredient::CondensedMilk | Ingredient::Milk => SlotKind::Creamer,
            Ingredient::Marshmallow | Ingredient::WhippedCream => SlotKind::Topping,
            Ingredient::CaramelSauce | Ingredient::ChocolateSauce => SlotKind::Sauce,
        }
    }

    /// Order label, compared with exact string equality.
    pub fn label(self) -> &'static str {
        match self {
            Ingredient::GreenTeaPowder => "green_tea_powder",
            Ingredient::CocoaPowder => "cocoa_powder",
            Ingredient::HotWater => "hot_water",
            Ingredient::CondensedMilk => "condensed_milk",
            Ingredient::Milk => "milk",
            Ingredient::Marshmallow => "marshmallow",
            Ingredient::WhippedCream => "whipped_cream",
            Ingredient::CaramelSauce => "caramel_sauce",
            Ingredient::ChocolateSauce => "chocolate_sauce",
        }
    }

    pub fn from_label(label: &str) -> Option<Ingredient> {
        Ingredient::all().iter().copied().find(|i| i.label() == label)
    }

    /// Composition-key token. Water has none of its own: it is recorded as
    /// `Y`/`N` right after the powder token.
    pub fn key_code(self) -> Option<&'static str> {
        match self {
            Ingredient::GreenTeaPowder => Some("GP"),
            Ingredient::CocoaPowder => Some("CP"),
            Ingredient::HotWater => None,
            Ingredient::CondensedMilk => Some("CM"),
            Ingredient::Milk => Some("MI"),
            Ingredient::Marshmallow => Some("MA"),
            Ingredient::WhippedCream => Some("WC"),
            Ingredient::CaramelSauce => Some("CA"),
            Ingredient::ChocolateSauce => Some("CH"),
        }
    }

    /// Powders are picked up by their tin but poured through a separate
    /// overlay sprite.
    pub fn has_pour_overlay(self) -> bool {
        self.slot() == SlotKind::Powder
    }
}

impl std::fmt::Display for Ingredient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
