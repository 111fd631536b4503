//! Read-only render feed - everything presentation code draws in a frame

use hecs::World;
use meowcafe_logic::customer::Emotion;
use meowcafe_logic::geometry::{Rect, Vec2};
use meowcafe_logic::scoring::Scoreboard;
use serde::{Deserialize, Serialize};

use crate::components::*;
use crate::generation::StageLayout;
use crate::systems::CustomerSlot;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub tick: u64,
    pub scoreboard: Scoreboard,
    pub cup: CupView,
    /// Tins, bottles and pour overlays.
    pub objects: Vec<ObjectView>,
    pub customers: Vec<CustomerView>,
    pub dragging: Option<ObjectKind>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CupView {
    pub position: Vec2,
    pub bounds: Rect,
    pub active: bool,
    /// Composition key; selects the cup sprite.
    pub key: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectView {
    /// Ingredient label; overlays carry their tin's label.
    pub label: String,
    pub overlay: bool,
    pub position: Vec2,
    pub bounds: Rect,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerView {
    pub seat: u8,
    pub visible: bool,
    pub emotion: Emotion,
    pub order: Vec<String>,
    /// Composition key of the ordered drink, for the order bubble.
    pub order_key: Option<String>,
    pub remaining: u32,
    /// Elapsed share of patience, 0.0..=1.0; drives the patience bar.
    pub urgency: f32,
}

/// Capture the current frame.
pub fn capture(
    world: &World,
    stage: &StageLayout,
    seats: &[CustomerSlot],
    scoreboard: &Scoreboard,
    dragging: Option<ObjectKind>,
    tick: u64,
) -> FrameSnapshot {
    let cup_drag = world
        .get::<&Draggable>(stage.cup)
        .map(|d| *d)
        .unwrap_or_else(|_| Draggable::at_rest(Vec2::ZERO, Vec2::ZERO));
    let (active, key) = world
        .get::<&CupItem>(stage.cup)
        .map(|c| (c.cup.is_active(), c.cup.key().to_string()))
        .unwrap_or((false, meowcafe_logic::cup::EMPTY_KEY.to_string()));

    let mut objects = Vec::new();
    for (ingredient, tin) in &stage.ingredients {
        if let Ok(d) = world.get::<&Draggable>(*tin) {
            objects.push(ObjectView {
                label: ingredient.label().to_string(),
                overlay: false,
                position: d.position,
                bounds: d.bounds(),
            });
        }
        if let Some(overlay) = stage.overlay_for(*tin) {
            if let Ok(d) = world.get::<&Draggable>(overlay) {
                objects.push(ObjectView {
                    label: ingredient.label().to_string(),
                    overlay: true,
                    position: d.position,
                    bounds: d.bounds(),
                });
            }
        }
    }

    let customers = seats
        .iter()
        .filter_map(|slot| slot.customer.as_ref())
        .map(|c| CustomerView {
            seat: c.seat,
            visible: c.visible,
            emotion: c.emotion,
            order: c.order.labels().to_vec(),
            order_key: c.order.expected_key(),
            remaining: c.remaining(),
            urgency: c.urgency(),
        })
        .collect();

    FrameSnapshot {
        tick,
        scoreboard: *scoreboard,
        cup: CupView {
            position: cup_drag.position,
            bounds: cup_drag.bounds(),
            active,
            key,
        },
        objects,
        customers,
        dragging,
    }
}
