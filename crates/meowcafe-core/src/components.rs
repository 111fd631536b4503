//! Components attached to counter entities: draggables, ingredients, the
//! cup, and pour overlays.

use hecs::Entity;
use meowcafe_logic::cup::Cup;
use meowcafe_logic::geometry::{Rect, Vec2};
use meowcafe_logic::ingredients::Ingredient;
use serde::{Deserialize, Serialize};

/// Anything the pointer can move: current top-left, resting top-left, size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Draggable {
    pub position: Vec2,
    pub origin: Vec2,
    pub size: Vec2,
}

impl Draggable {
    /// A draggable resting at `origin`.
    pub fn at_rest(origin: Vec2, size: Vec2) -> Self {
        Self {
            position: origin,
            origin,
            size,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::at(self.position, self.size)
    }

    pub fn is_at_origin(&self) -> bool {
        self.position == self.origin
    }

    pub fn return_to_origin(&mut self) {
        self.position = self.origin;
    }
}

/// An ingredient tin, bottle or jar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientItem {
    pub ingredient: Ingredient,
    /// Whether a drop on the cup applies the ingredient.
    pub mutates_cup: bool,
}

/// The player's cup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CupItem {
    pub cup: Cup,
}

/// On a tin: the overlay entity that moves while the tin is dragged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PourOverlay {
    pub overlay: Entity,
}

/// On an overlay: the tin it pours for. Overlays are never hit-tested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayOf {
    pub tin: Entity,
}

/// Hit-test priority; lower is tried first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PickOrder(pub u32);

/// What kind of object a handle refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectKind {
    Cup,
    Ingredient(Ingredient),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draggable_rest_and_return() {
        let mut d = Draggable::at_rest(Vec2::new(10.0, 20.0), Vec2::new(5.0, 5.0));
        assert!(d.is_at_origin());
        d.position = Vec2::new(100.0, 100.0);
        assert_eq!(d.bounds(), Rect::new(100.0, 100.0, 5.0, 5.0));
        assert!(!d.is_at_origin());
        d.return_to_origin();
        assert!(d.is_at_origin());
    }
}
