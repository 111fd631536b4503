//! Orders and the order validator.
//!
//! An order is the exact sequence of four ingredient labels a customer
//! wants: powder, creamer, topping, sauce. Hot water is implied by any
//! creamer and is not listed.
//!
//! The validator checks all four presented labels with exact string
//! equality. Scoring is separate (see [`crate::scoring`]) and counts
//! presented items, not matching ones.

use serde::{Deserialize, Serialize};

use crate::cup::{composition_key, Creamer, CupSlots, Powder, Sauce, Topping};

/// Number of labels in an order.
pub const ORDER_LEN: usize = 4;

/// Four expected ingredient labels, in order. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Order {
    labels: [String; ORDER_LEN],
}

impl Order {
    pub fn new(first: &str, second: &str, third: &str, fourth: &str) -> Self {
        Self {
            labels: [
                first.to_string(),
                second.to_string(),
                third.to_string(),
                fourth.to_string(),
            ],
        }
    }

    /// Order for a menu recipe.
    pub fn from_recipe(recipe: &Recipe) -> Self {
        Self::new(
            recipe.powder.ingredient().label(),
            recipe.creamer.ingredient().label(),
            recipe.topping.ingredient().label(),
            recipe.sauce.ingredient().label(),
        )
    }

    pub fn labels(&self) -> &[String; ORDER_LEN] {
        &self.labels
    }

    pub fn first(&self) -> &str {
        &self.labels[0]
    }

    pub fn second(&self) -> &str {
        &self.labels[1]
    }

    pub fn third(&self) -> &str {
        &self.labels[2]
    }

    pub fn fourth(&self) -> &str {
        &self.labels[3]
    }

    /// Composition key of the drink that satisfies this order, if the labels
    /// name a menu recipe. Used to draw the order bubble.
    pub fn expected_key(&self) -> Option<String> {
        menu()
            .into_iter()
            .find(|r| Order::from_recipe(r) == *self)
            .map(|r| composition_key(&r.slots()))
    }
}

/// One drink on the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Recipe {
    pub powder: Powder,
    pub creamer: Creamer,
    pub topping: Topping,
    pub sauce: Sauce,
}

impl Recipe {
    /// Slot values of the finished drink.
    pub fn slots(&self) -> CupSlots {
        CupSlots {
            powder: Some(self.powder),
            water: true,
            creamer: Some(self.creamer),
            topping: Some(self.topping),
            sauce: Some(self.sauce),
        }
    }
}

/// Every orderable drink: each powder × creamer × topping × sauce.
pub fn menu() -> Vec<Recipe> {
    let mut recipes = Vec::with_capacity(16);
    for powder in [Powder::GreenTea, Powder::Cocoa] {
        for creamer in [Creamer::CondensedMilk, Creamer::Milk] {
            for topping in [Topping::Marshmallow, Topping::WhippedCream] {
                for sauce in [Sauce::Caramel, Sauce::Chocolate] {
                    recipes.push(Recipe {
                        powder,
                        creamer,
                        topping,
                        sauce,
                    });
                }
            }
        }
    }
    recipes
}

/// Check four presented labels against an order. Every position must be
/// present and equal; an absent label never matches.
pub fn validate(
    order: &Order,
    first: Option<&str>,
    second: Option<&str>,
    third: Option<&str>,
    fourth: Option<&str>,
) -> bool {
    order
        .labels
        .iter()
        .zip([first, second, third, fourth])
        .all(|(expected, presented)| presented == Some(expected.as_str()))
}

/// [`validate`] over an array of presented labels.
pub fn validate_presented(order: &Order, presented: &[Option<&str>; ORDER_LEN]) -> bool {
    validate(order, presented[0], presented[1], presented[2], presented[3])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn latte() -> Order {
        Order::new("green_tea_powder", "condensed_milk", "marshmallow", "caramel_sauce")
    }

    #[test]
    fn test_exact_match() {
        assert!(validate(
            &latte(),
            Some("green_tea_powder"),
            Some("condensed_milk"),
            Some("marshmallow"),
            Some("caramel_sauce"),
        ));
    }

    #[test]
    fn test_single_mismatch_fails() {
        assert!(!validate(
            &latte(),
            Some("green_tea_powder"),
            Some("milk"),
            Some("marshmallow"),
            Some("caramel_sauce"),
        ));
    }

    #[test]
    fn test_missing_label_fails() {
        assert!(!validate(
            &latte(),
            Some("green_tea_powder"),
            Some("condensed_milk"),
            Some("marshmallow"),
            None,
        ));
    }

    #[test]
    fn test_order_is_positional() {
        assert!(!validate(
            &latte(),
            Some("condensed_milk"),
            Some("green_tea_powder"),
            Some("marshmallow"),
            Some("caramel_sauce"),
        ));
    }

    #[test]
    fn test_menu_has_sixteen_distinct_drinks() {
        let recipes = menu();
        assert_eq!(recipes.len(), 16);
        let keys: std::collections::HashSet<String> =
            recipes.iter().map(|r| composition_key(&r.slots())).collect();
        assert_eq!(keys.len(), 16);
    }

    #[test]
    fn test_expected_key() {
        assert_eq!(latte().expected_key().as_deref(), Some("GPYCMMACA"));
        let odd = Order::new("hot_water", "milk", "milk", "milk");
        assert_eq!(odd.expected_key(), None);
    }

    #[test]
    fn test_accessors() {
        let o = latte();
        assert_eq!(o.first(), "green_tea_powder");
        assert_eq!(o.second(), "condensed_milk");
        assert_eq!(o.third(), "marshmallow");
        assert_eq!(o.fourth(), "caramel_sauce");
    }
}
