//! Pointer system - pick up, follow and drop counter objects
//!
//! Every draggable shares one behaviour: grab on press when the pointer is
//! inside it, follow the pointer directly, and on release either land in a
//! drop zone or return to its origin. Ownership is held in a
//! `DragSession<Entity>`, so at most one object moves at a time.
//!
//! Drop zones:
//! - ingredients drop onto the active cup, apply, then go home;
//! - the cup drops onto a waiting customer's seat (serve, after which it
//!   goes back to the stack) or the mat (snap); anywhere else sends it back
//!   to the stack, emptied.

use hecs::{Entity, World};
use meowcafe_logic::config::StageConfig;
use meowcafe_logic::cup::ApplyOutcome;
use meowcafe_logic::drag::{decide_drop, DragSession, DropDecision};
use meowcafe_logic::geometry::{Rect, Vec2};
use meowcafe_logic::scoring::Scoreboard;
use serde::{Deserialize, Serialize};

use crate::components::*;
use crate::events::SessionEvent;
use crate::generation::StageLayout;
use crate::systems::{serve_cup, CustomerSlot, ServeOutcome};

/// Pointer state for one frame, in world coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PointerInput {
    pub position: Vec2,
    /// Button went down this frame.
    pub pressed: bool,
    /// Button went up this frame.
    pub released: bool,
}

impl PointerInput {
    pub fn hover(position: Vec2) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    pub fn press(position: Vec2) -> Self {
        Self {
            position,
            pressed: true,
            released: false,
        }
    }

    pub fn release(position: Vec2) -> Self {
        Self {
            position,
            pressed: false,
            released: true,
        }
    }
}

/// A body let go this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Released {
    /// The grabbed entity (tin, bottle or cup).
    pub handle: Entity,
    /// The entity that moved: the pour overlay for powders, else `handle`.
    pub body: Entity,
    /// Body bounds at release.
    pub bounds: Rect,
}

/// Entity that follows the pointer when `handle` is dragged.
pub fn body_of(world: &World, handle: Entity) -> Entity {
    world
        .get::<&PourOverlay>(handle)
        .map(|p| p.overlay)
        .unwrap_or(handle)
}

fn object_kind(world: &World, entity: Entity) -> Option<ObjectKind> {
    if world.get::<&CupItem>(entity).is_ok() {
        return Some(ObjectKind::Cup);
    }
    world
        .get::<&IngredientItem>(entity)
        .ok()
        .map(|i| ObjectKind::Ingredient(i.ingredient))
}

/// Offer the press to every pickable object in priority order. The first
/// hit takes the drag; later offers are refused by the session. Grabbing
/// an inactive cup pulls a fresh one from the stack.
pub fn begin_grab(
    world: &mut World,
    drag: &mut DragSession<Entity>,
    pointer: Vec2,
    events: &mut Vec<SessionEvent>,
) -> Option<Entity> {
    if drag.is_dragging() {
        return None;
    }

    let mut candidates: Vec<(PickOrder, Entity, Rect)> = world
        .query::<(&Draggable, &PickOrder)>()
        .iter()
        .map(|(entity, (d, order))| (*order, entity, d.bounds()))
        .collect();
    candidates.sort_by_key(|(order, _, _)| *order);

    for (_, entity, hit) in candidates {
        let body = body_of(world, entity);
        let body_top_left = world
            .get::<&Draggable>(body)
            .map(|d| d.position)
            .unwrap_or(hit.top_left());
        drag.begin(entity, hit, body_top_left, pointer);
    }

    let grabbed = drag.current()?;
    if let Some(kind) = object_kind(world, grabbed) {
        log::debug!("Grabbed {:?}", kind);
        events.push(SessionEvent::Grabbed { object: kind });
    }

    if let Ok(mut item) = world.get::<&mut CupItem>(grabbed) {
        if !item.cup.is_active() {
            item.cup.activate();
            events.push(SessionEvent::CupActivated);
        }
    }

    Some(grabbed)
}

/// Move the held body to follow the pointer.
pub fn follow_pointer(world: &mut World, drag: &DragSession<Entity>, pointer: Vec2) {
    let Some((handle, position)) = drag.follow(pointer) else {
        return;
    };
    let body = body_of(world, handle);
    if let Ok(mut d) = world.get::<&mut Draggable>(body) {
        d.position = position;
    }
}

/// Final follow, then let go. `None` when nothing was held.
pub fn release_grab(
    world: &mut World,
    drag: &mut DragSession<Entity>,
    pointer: Vec2,
) -> Option<Released> {
    follow_pointer(world, drag, pointer);
    let handle = drag.end()?;
    let body = body_of(world, handle);
    let bounds = world.get::<&Draggable>(body).ok()?.bounds();
    Some(Released {
        handle,
        body,
        bounds,
    })
}

fn return_home(world: &mut World, entity: Entity) {
    if let Ok(mut d) = world.get::<&mut Draggable>(entity) {
        d.return_to_origin();
    }
}

/// Resolve a release against the drop zones.
pub fn resolve_drop(
    world: &mut World,
    stage: &StageLayout,
    seats: &mut [CustomerSlot],
    scoreboard: &mut Scoreboard,
    config: &StageConfig,
    released: Released,
    events: &mut Vec<SessionEvent>,
) {
    if released.handle == stage.cup {
        drop_cup(world, stage, seats, scoreboard, config, released, events);
    } else {
        drop_ingredient(world, stage, released, events);
    }
}

fn drop_ingredient(
    world: &mut World,
    stage: &StageLayout,
    released: Released,
    events: &mut Vec<SessionEvent>,
) {
    let Ok(item) = world.get::<&IngredientItem>(released.handle).map(|i| *i) else {
        return_home(world, released.body);
        return;
    };

    let cup_zone = world
        .get::<&Draggable>(stage.cup)
        .map(|d| d.bounds())
        .unwrap_or_default();
    let cup_active = world
        .get::<&CupItem>(stage.cup)
        .map(|c| c.cup.is_active())
        .unwrap_or(false);

    let decision = if cup_active {
        decide_drop(released.bounds, cup_zone, item.mutates_cup)
    } else {
        DropDecision::Return
    };

    match decision {
        DropDecision::Accept => {
            if let Ok(mut c) = world.get::<&mut CupItem>(stage.cup) {
                match c.cup.apply(item.ingredient) {
                    ApplyOutcome::Applied(_) => {
                        log::debug!("Applied {} -> {}", item.ingredient, c.cup.key());
                        events.push(SessionEvent::IngredientApplied {
                            ingredient: item.ingredient,
                            key: c.cup.key().to_string(),
                        });
                    }
                    ApplyOutcome::Ignored(reason) => {
                        log::debug!("Ignored {}: {:?}", item.ingredient, reason);
                        events.push(SessionEvent::IngredientIgnored {
                            ingredient: item.ingredient,
                            reason,
                        });
                    }
                }
            }
        }
        DropDecision::Return => {
            events.push(SessionEvent::IngredientMissed {
                ingredient: item.ingredient,
            });
        }
    }

    // Ingredients are never used up.
    return_home(world, released.body);
}

fn drop_cup(
    world: &mut World,
    stage: &StageLayout,
    seats: &mut [CustomerSlot],
    scoreboard: &mut Scoreboard,
    config: &StageConfig,
    released: Released,
    events: &mut Vec<SessionEvent>,
) {
    let layout = &config.layout;

    // Waiting customers first: the seat zones sit above the mat.
    let seat_hit = seats.iter().position(|slot| {
        slot.occupant().is_some()
            && (slot.seat as usize)
                .checked_sub(1)
                .and_then(|i| layout.seat_zones.get(i))
                .map(|zone| decide_drop(released.bounds, *zone, true) == DropDecision::Accept)
                .unwrap_or(false)
    });

    if let Some(idx) = seat_hit {
        let outcome = match world.get::<&mut CupItem>(stage.cup) {
            Ok(mut c) => serve_cup(&mut c.cup, &mut seats[idx], scoreboard, config, events),
            Err(_) => ServeOutcome::CupInactive,
        };
        let position = match outcome {
            ServeOutcome::Judged(_) => None,
            ServeOutcome::NoCustomer | ServeOutcome::CupInactive => Some(layout.cup_on_mat()),
        };
        place_cup(world, stage.cup, position, events);
        return;
    }

    match decide_drop(released.bounds, layout.mat_zone, true) {
        DropDecision::Accept => place_cup(world, stage.cup, Some(layout.cup_on_mat()), events),
        DropDecision::Return => place_cup(world, stage.cup, None, events),
    }
}

/// Snap the cup to `position`, or send it back to the stack (emptied and
/// inactive) when `None`.
pub fn place_cup(
    world: &mut World,
    cup: Entity,
    position: Option<Vec2>,
    events: &mut Vec<SessionEvent>,
) {
    match position {
        Some(position) => {
            if let Ok(mut d) = world.get::<&mut Draggable>(cup) {
                d.position = position;
            }
            log::debug!("Cup snapped to mat");
            events.push(SessionEvent::CupSnapped);
        }
        None => {
            return_home(world, cup);
            if let Ok(mut c) = world.get::<&mut CupItem>(cup) {
                c.cup.reset();
            }
            log::debug!("Cup returned to stack");
            events.push(SessionEvent::CupReturned);
        }
    }
}
