//! Integration tests for a full café stage driven by pointer input.
//!
//! Exercises: press → follow → release → drop zones → cup composition
//! → serving → scoring, plus customer patience and seat refills.
//!
//! Everything runs headless through `MinigameSession::update`.

use meowcafe_core::prelude::*;
use meowcafe_logic::config::StageConfig;
use meowcafe_logic::cup::{IgnoreReason, EMPTY_KEY};
use meowcafe_logic::customer::{Customer, Emotion};
use meowcafe_logic::ingredients::{Ingredient, SlotKind};
use meowcafe_logic::order::Order;

// ── Helpers ────────────────────────────────────────────────────────────

fn seeded(seed: u64) -> MinigameSession {
    MinigameSession::new(StageConfig {
        seed: Some(seed),
        ..Default::default()
    })
}

/// Press at `from`, move to `to`, release there. Returns every event.
fn drag(session: &mut MinigameSession, from: Vec2, to: Vec2) -> Vec<SessionEvent> {
    let mut events = session.update(PointerInput::press(from));
    events.extend(session.update(PointerInput::hover(to)));
    events.extend(session.update(PointerInput::release(to)));
    events
}

/// Drag an ingredient so that the moving body lands centred on the cup.
/// Powders move their pour overlay, which hangs above the tin.
fn pour(session: &mut MinigameSession, ingredient: Ingredient) -> Vec<SessionEvent> {
    let grip = session.ingredient_grip(ingredient).unwrap();
    let lift = if ingredient.has_pour_overlay() {
        Vec2::ZERO - session.config().layout.overlay_offset
    } else {
        Vec2::ZERO
    };
    let target = session.cup_grip() + lift;
    drag(session, grip, target)
}

fn mat_centre(session: &MinigameSession) -> Vec2 {
    let mat = session.config().layout.mat_zone;
    Vec2::new(mat.x + mat.width / 2.0, mat.y + mat.height / 2.0)
}

fn seat_centre(session: &MinigameSession, seat: u8) -> Vec2 {
    let zone = session.config().layout.seat_zones[seat as usize - 1];
    Vec2::new(zone.x + zone.width / 2.0, zone.y + zone.height / 2.0)
}

fn cup_to_mat(session: &mut MinigameSession) -> Vec<SessionEvent> {
    let grip = session.cup_grip();
    let mat = mat_centre(session);
    drag(session, grip, mat)
}

fn cocoa_order() -> Order {
    Order::new("cocoa_powder", "milk", "whipped_cream", "chocolate_sauce")
}

fn make_drink(session: &mut MinigameSession, ingredients: &[Ingredient]) {
    for &i in ingredients {
        pour(session, i);
    }
}

const COCOA_DRINK: [Ingredient; 5] = [
    Ingredient::CocoaPowder,
    Ingredient::HotWater,
    Ingredient::Milk,
    Ingredient::WhippedCream,
    Ingredient::ChocolateSauce,
];

// ── Cup handling ───────────────────────────────────────────────────────

#[test]
fn cup_grab_activates_and_snaps_to_mat() {
    let mut session = seeded(1);
    let events = cup_to_mat(&mut session);

    assert!(events.contains(&SessionEvent::Grabbed { object: ObjectKind::Cup }));
    assert!(events.contains(&SessionEvent::CupActivated));
    assert!(events.contains(&SessionEvent::CupSnapped));
    assert!(session.cup().is_active());
    assert_eq!(session.cup().key(), EMPTY_KEY);
    assert_eq!(session.cup_position(), session.config().layout.cup_on_mat());
    assert_eq!(session.dragging(), None);
}

#[test]
fn cup_dropped_elsewhere_returns_to_stack_empty() {
    let mut session = seeded(1);
    cup_to_mat(&mut session);
    pour(&mut session, Ingredient::CocoaPowder);
    assert_eq!(session.cup().key(), "CPN");

    let grip = session.cup_grip();
    let events = drag(&mut session, grip, Vec2::new(800.0, 400.0));

    assert!(events.contains(&SessionEvent::CupReturned));
    assert!(!session.cup().is_active());
    assert_eq!(session.cup().key(), EMPTY_KEY);
    assert_eq!(session.cup_position(), session.config().layout.cup_stack);
}

// ── Composition ────────────────────────────────────────────────────────

#[test]
fn ingredients_build_the_key_in_order() {
    let mut session = seeded(2);
    cup_to_mat(&mut session);

    let expected = ["CPN", "CPY", "CPYMI", "CPYMIWC", "CPYMIWCCH"];
    for (ingredient, key) in COCOA_DRINK.iter().zip(expected) {
        let events = pour(&mut session, *ingredient);
        assert!(
            events.contains(&SessionEvent::IngredientApplied {
                ingredient: *ingredient,
                key: key.to_string(),
            }),
            "{ingredient} should apply, got {events:?}"
        );
    }
    assert_eq!(Some(session.cup().key().to_string()), cocoa_order().expected_key());
}

#[test]
fn ingredients_return_home_after_every_drop() {
    let mut session = seeded(3);
    cup_to_mat(&mut session);
    for ingredient in Ingredient::all() {
        let before = session.ingredient_grip(*ingredient);
        pour(&mut session, *ingredient);
        assert_eq!(session.ingredient_grip(*ingredient), before);
    }
    let stage = session.stage();
    let tins = stage.ingredients.iter().map(|(_, e)| *e);
    let overlays = stage.overlays.iter().map(|(_, e)| *e);
    for entity in tins.chain(overlays) {
        assert!(session.world.get::<&Draggable>(entity).unwrap().is_at_origin());
    }
}

#[test]
fn out_of_order_ingredient_is_ignored() {
    let mut session = seeded(4);
    cup_to_mat(&mut session);

    let events = pour(&mut session, Ingredient::Milk);
    assert!(events.contains(&SessionEvent::IngredientIgnored {
        ingredient: Ingredient::Milk,
        reason: IgnoreReason::OutOfOrder { missing: SlotKind::Water },
    }));
    assert_eq!(session.cup().key(), EMPTY_KEY);
}

#[test]
fn ingredient_on_inactive_cup_is_missed() {
    let mut session = seeded(5);
    let events = pour(&mut session, Ingredient::HotWater);
    assert!(events.contains(&SessionEvent::IngredientMissed {
        ingredient: Ingredient::HotWater,
    }));
    assert!(!session.cup().is_active());
}

#[test]
fn first_powder_wins() {
    let mut session = seeded(6);
    cup_to_mat(&mut session);
    pour(&mut session, Ingredient::CocoaPowder);
    let events = pour(&mut session, Ingredient::GreenTeaPowder);
    assert!(events.contains(&SessionEvent::IngredientIgnored {
        ingredient: Ingredient::GreenTeaPowder,
        reason: IgnoreReason::PowderAlreadySet,
    }));
    assert_eq!(session.cup().key(), "CPN");
}

// ── Drag ownership ─────────────────────────────────────────────────────

#[test]
fn only_one_object_is_dragged() {
    let mut session = seeded(7);
    let cup_grip = session.cup_grip();
    let milk_grip = session.ingredient_grip(Ingredient::Milk).unwrap();

    session.update(PointerInput::press(cup_grip));
    let cup = session.stage().cup;
    assert_eq!(session.dragging(), Some(cup));

    // A second press while holding is refused.
    let events = session.update(PointerInput::press(milk_grip));
    assert!(events.iter().all(|e| !matches!(e, SessionEvent::Grabbed { .. })));
    assert_eq!(session.dragging(), Some(cup));
    assert_eq!(session.snapshot().dragging, Some(ObjectKind::Cup));
}

#[test]
fn powder_drags_its_pour_overlay() {
    let mut session = seeded(8);
    let tin = session.stage().ingredient(Ingredient::GreenTeaPowder).unwrap();
    let overlay = session.stage().overlay_for(tin).unwrap();
    let grip = session.ingredient_grip(Ingredient::GreenTeaPowder).unwrap();

    session.update(PointerInput::press(grip));
    session.update(PointerInput::hover(grip + Vec2::new(200.0, -100.0)));

    assert!(session.world.get::<&Draggable>(tin).unwrap().is_at_origin());
    assert!(!session.world.get::<&Draggable>(overlay).unwrap().is_at_origin());

    session.update(PointerInput::release(grip + Vec2::new(200.0, -100.0)));
    assert!(session.world.get::<&Draggable>(overlay).unwrap().is_at_origin());
}

// ── Serving ────────────────────────────────────────────────────────────

#[test]
fn matching_drink_served_by_drop() {
    let mut session = seeded(10);
    session.seat_customer(Customer::new(2, cocoa_order(), 1000, 1.0));
    cup_to_mat(&mut session);
    make_drink(&mut session, &COCOA_DRINK);

    let grip = session.cup_grip();
    let seat = seat_centre(&session, 2);
    let events = drag(&mut session, grip, seat);

    assert!(events.contains(&SessionEvent::Served { seat: 2, matched: true, points: 200 }));
    assert!(events.contains(&SessionEvent::CupReturned));
    assert_eq!(session.score(), 200);
    assert_eq!(session.scoreboard().served, 1);
    assert!(session.customer(2).is_none());
    assert!(!session.cup().is_active());
    assert_eq!(session.cup_position(), session.config().layout.cup_stack);
}

#[test]
fn wrong_drink_keeps_customer_waiting() {
    let mut session = seeded(11);
    session.seat_customer(Customer::new(2, cocoa_order(), 1000, 1.0));
    cup_to_mat(&mut session);
    make_drink(
        &mut session,
        &[Ingredient::GreenTeaPowder, Ingredient::HotWater, Ingredient::Milk],
    );

    let grip = session.cup_grip();
    let seat = seat_centre(&session, 2);
    let events = drag(&mut session, grip, seat);

    // Presence scoring: green tea and milk were presented.
    assert!(events.contains(&SessionEvent::Served { seat: 2, matched: false, points: 100 }));
    assert!(events.contains(&SessionEvent::CupReturned));
    assert_eq!(session.score(), 100);
    assert!(session.customer(2).is_some());
    assert!(!session.cup().is_active());
    assert_eq!(session.cup_position(), session.config().layout.cup_stack);
}

#[test]
fn wrong_cup_is_scored_once() {
    let mut session = seeded(15);
    session.seat_customer(Customer::new(2, cocoa_order(), 1000, 1.0));
    cup_to_mat(&mut session);
    pour(&mut session, Ingredient::GreenTeaPowder);
    assert_eq!(session.cup().key(), "GPN");

    let seat = seat_centre(&session, 2);
    let grip = session.cup_grip();
    drag(&mut session, grip, seat);
    assert_eq!(session.score(), 50);

    // Presenting again means dragging a fresh, empty cup from the stack.
    for _ in 0..5 {
        let grip = session.cup_grip();
        let events = drag(&mut session, grip, seat);
        assert!(events.contains(&SessionEvent::Served { seat: 2, matched: false, points: 0 }));
    }
    for _ in 0..5 {
        assert_eq!(session.serve(2).0, ServeOutcome::CupInactive);
    }

    assert_eq!(session.score(), 50);
    assert!(session.customer(2).is_some());
}

#[test]
fn serve_without_dragging() {
    let mut session = seeded(12);
    session.seat_customer(Customer::new(3, cocoa_order(), 1000, 1.0));

    let (outcome, _) = session.serve(3);
    assert_eq!(outcome, ServeOutcome::CupInactive);

    cup_to_mat(&mut session);
    make_drink(&mut session, &COCOA_DRINK);
    let (outcome, events) = session.serve(3);

    assert!(matches!(outcome, ServeOutcome::Judged(v) if v.matched && v.points == 200));
    assert_eq!(
        events,
        vec![
            SessionEvent::Served { seat: 3, matched: true, points: 200 },
            SessionEvent::CupReturned,
        ]
    );
    assert!(session.customer(3).is_none());
    assert_eq!(session.cup_position(), session.config().layout.cup_stack);
    assert_eq!(session.serve(9).0, ServeOutcome::NoCustomer);
}

// ── Customers ──────────────────────────────────────────────────────────

fn fast_config(respawn_delay: u32) -> StageConfig {
    StageConfig {
        base_duration: 10,
        patience_min: 1.0,
        patience_max: 1.0,
        respawn_delay,
        seed: Some(3),
        ..Default::default()
    }
}

#[test]
fn unserved_customers_time_out_with_penalty() {
    let mut session = MinigameSession::new(fast_config(1000));

    // Seats fill on the first update; patience runs from the second.
    for _ in 0..10 {
        session.update(PointerInput::default());
    }
    assert_eq!(session.score(), 0);
    assert!(session.customer(1).is_some());

    let events = session.update(PointerInput::default());
    let timeouts = events
        .iter()
        .filter(|e| matches!(e, SessionEvent::CustomerTimedOut { penalty: 50, .. }))
        .count();
    assert_eq!(timeouts, 3);
    assert_eq!(session.score(), -150);
    assert_eq!(session.scoreboard().timed_out, 3);
    assert!(session.seats().iter().all(|s| s.is_free()));
}

#[test]
fn vacated_seats_refill_after_delay() {
    let mut session = MinigameSession::new(fast_config(5));
    for _ in 0..15 {
        session.update(PointerInput::default());
    }
    assert!(session.customer(1).is_none());

    let events = session.update(PointerInput::default());
    assert!(events.contains(&SessionEvent::CustomerArrived {
        seat: 1,
        order: session.customer(1).unwrap().order.clone(),
    }));
    assert!(session.seats().iter().all(|s| !s.is_free()));
}

#[test]
fn emotion_follows_patience() {
    let mut session = seeded(13);
    session.seat_customer(Customer::new(1, cocoa_order(), 1000, 1.0));
    for _ in 0..501 {
        session.update(PointerInput::default());
    }
    let customer = session.customer(1).unwrap();
    assert_eq!(customer.current_time, 501);
    assert_eq!(customer.emotion, Emotion::Frustrated);

    let view = session.snapshot().customers.into_iter().find(|c| c.seat == 1).unwrap();
    assert_eq!(view.remaining, 499);
    assert!((view.urgency - 0.501).abs() < 1e-4);
}

// ── Determinism and snapshots ──────────────────────────────────────────

#[test]
fn same_seed_same_stage() {
    let script = |session: &mut MinigameSession| {
        for _ in 0..5 {
            session.update(PointerInput::default());
        }
        cup_to_mat(session);
        make_drink(session, &COCOA_DRINK);
        session.snapshot()
    };

    let a = script(&mut seeded(99));
    let b = script(&mut seeded(99));
    assert_eq!(a, b);
    assert_eq!(a.cup.key, "CPYMIWCCH");
    assert_eq!(a.customers.len(), 3);
}

#[test]
fn snapshot_serializes() {
    let mut session = seeded(14);
    session.update(PointerInput::default());
    let snapshot = session.snapshot();

    // Nine ingredients plus two pour overlays.
    assert_eq!(snapshot.objects.len(), 11);
    assert_eq!(snapshot.objects.iter().filter(|o| o.overlay).count(), 2);

    let json = serde_json::to_string(&snapshot).unwrap();
    let back: meowcafe_core::snapshot::FrameSnapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(back, snapshot);
}
