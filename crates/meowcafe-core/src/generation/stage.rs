//! Counter generation - spawns the cup and every ingredient

use hecs::{Entity, World};
use meowcafe_logic::config::LayoutConfig;
use meowcafe_logic::cup::Cup;
use meowcafe_logic::ingredients::Ingredient;

use crate::components::*;

/// Entities spawned for one stage.
#[derive(Debug, Clone)]
pub struct StageLayout {
    pub cup: Entity,
    /// Tin / bottle entities, in layout order.
    pub ingredients: Vec<(Ingredient, Entity)>,
    /// Pour overlays, keyed by their tin.
    pub overlays: Vec<(Entity, Entity)>,
}

impl StageLayout {
    pub fn ingredient(&self, ingredient: Ingredient) -> Option<Entity> {
        self.ingredients
            .iter()
            .find(|(i, _)| *i == ingredient)
            .map(|(_, e)| *e)
    }

    pub fn overlay_for(&self, tin: Entity) -> Option<Entity> {
        self.overlays
            .iter()
            .find(|(t, _)| *t == tin)
            .map(|(_, o)| *o)
    }
}

/// Spawn the counter: an inactive cup on the stack, then every placed
/// ingredient at its origin. Powders also get a pour overlay.
pub fn spawn_stage(world: &mut World, layout: &LayoutConfig) -> StageLayout {
    let cup = world.spawn((
        Draggable::at_rest(layout.cup_stack, layout.cup_size),
        CupItem { cup: Cup::new() },
        PickOrder(0),
    ));

    let mut ingredients = Vec::with_capacity(layout.ingredients.len());
    let mut overlays = Vec::new();

    for (idx, placement) in layout.ingredients.iter().enumerate() {
        let tin = world.spawn((
            Draggable::at_rest(placement.origin, layout.ingredient_size),
            IngredientItem {
                ingredient: placement.ingredient,
                mutates_cup: placement.mutates_cup,
            },
            PickOrder(idx as u32 + 1),
        ));

        if placement.ingredient.has_pour_overlay() {
            let overlay = world.spawn((
                Draggable::at_rest(
                    placement.origin + layout.overlay_offset,
                    layout.ingredient_size,
                ),
                OverlayOf { tin },
            ));
            let _ = world.insert_one(tin, PourOverlay { overlay });
            overlays.push((tin, overlay));
        }

        ingredients.push((placement.ingredient, tin));
    }

    log::debug!(
        "Spawned stage: {} ingredients, {} pour overlays",
        ingredients.len(),
        overlays.len()
    );

    StageLayout {
        cup,
        ingredients,
        overlays,
    }
}
