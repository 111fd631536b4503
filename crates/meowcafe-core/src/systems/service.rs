//! Service system - hands the cup to a customer and scores it

use meowcafe_logic::config::StageConfig;
use meowcafe_logic::cup::Cup;
use meowcafe_logic::scoring::{judge, Scoreboard, Verdict};
use serde::{Deserialize, Serialize};

use crate::events::SessionEvent;
use crate::systems::CustomerSlot;

/// Result of presenting the cup at a seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServeOutcome {
    /// Judged and the cup used up; on a match the customer left.
    Judged(Verdict),
    /// Nobody is waiting at that seat.
    NoCustomer,
    /// The cup has not been pulled from the stack.
    CupInactive,
}

/// Present `cup` to the customer in `slot`.
///
/// The cup is used up by any judged presentation. A match dismisses the
/// customer; after a mismatch the customer keeps waiting. Mismatch points
/// follow `config.scoring`.
pub fn serve_cup(
    cup: &mut Cup,
    slot: &mut CustomerSlot,
    scoreboard: &mut Scoreboard,
    config: &StageConfig,
    events: &mut Vec<SessionEvent>,
) -> ServeOutcome {
    if !cup.is_active() {
        return ServeOutcome::CupInactive;
    }
    let seat = slot.seat;
    let Some(customer) = slot.occupant_mut() else {
        return ServeOutcome::NoCustomer;
    };

    let presented = cup.presented_labels();
    let verdict = judge(
        &customer.order,
        &presented,
        config.scoring,
        config.points_per_item,
    );
    scoreboard.record_verdict(verdict);

    if verdict.matched {
        customer.dismiss();
        slot.vacant_for = 0;
        log::info!("Served seat {} ({} points)", seat, verdict.points);
    } else {
        log::info!(
            "Wrong drink for seat {}: {} ({} points)",
            seat,
            cup.key(),
            verdict.points
        );
    }
    // A judged cup is handed over either way; it cannot be scored twice.
    cup.reset();

    events.push(SessionEvent::Served {
        seat,
        matched: verdict.matched,
        points: verdict.points,
    });

    ServeOutcome::Judged(verdict)
}

#[cfg(test)]
mod tests {
    use super::*;
    use meowcafe_logic::customer::Customer;
    use meowcafe_logic::ingredients::Ingredient;
    use meowcafe_logic::order::Order;
    use meowcafe_logic::scoring::ScoringPolicy;

    fn slot_wanting_cocoa() -> CustomerSlot {
        let order = Order::new("cocoa_powder", "milk", "whipped_cream", "chocolate_sauce");
        CustomerSlot {
            seat: 2,
            customer: Some(Customer::new(2, order, 1000, 1.0)),
            vacant_for: 0,
        }
    }

    fn cup_with(ingredients: &[Ingredient]) -> Cup {
        let mut cup = Cup::new();
        cup.activate();
        for &i in ingredients {
            cup.apply(i);
        }
        cup
    }

    fn cocoa_drink() -> Cup {
        cup_with(&[
            Ingredient::CocoaPowder,
            Ingredient::HotWater,
            Ingredient::Milk,
            Ingredient::WhippedCream,
            Ingredient::ChocolateSauce,
        ])
    }

    #[test]
    fn test_matching_cup_serves() {
        let mut cup = cocoa_drink();
        let mut slot = slot_wanting_cocoa();
        let mut board = Scoreboard::new();
        let mut events = Vec::new();

        let outcome = serve_cup(&mut cup, &mut slot, &mut board, &StageConfig::default(), &mut events);

        assert_eq!(outcome, ServeOutcome::Judged(Verdict { matched: true, points: 200 }));
        assert_eq!(board.score, 200);
        assert!(slot.is_free());
        assert!(!cup.is_active());
        assert_eq!(
            events,
            vec![SessionEvent::Served { seat: 2, matched: true, points: 200 }]
        );
    }

    #[test]
    fn test_wrong_cup_keeps_customer() {
        let mut cup = cup_with(&[
            Ingredient::GreenTeaPowder,
            Ingredient::HotWater,
            Ingredient::Milk,
        ]);
        let mut slot = slot_wanting_cocoa();
        let mut board = Scoreboard::new();
        let mut events = Vec::new();

        let outcome = serve_cup(&mut cup, &mut slot, &mut board, &StageConfig::default(), &mut events);

        // Two presented positions under presence scoring.
        assert_eq!(outcome, ServeOutcome::Judged(Verdict { matched: false, points: 100 }));
        assert!(!slot.is_free());
        assert!(!cup.is_active());
        assert_eq!(board.mismatched, 1);

        // The handed-over cup cannot be judged again.
        assert_eq!(
            serve_cup(&mut cup, &mut slot, &mut board, &StageConfig::default(), &mut events),
            ServeOutcome::CupInactive
        );
        assert_eq!(board.score, 100);
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_matched_only_policy() {
        let mut cup = cup_with(&[Ingredient::GreenTeaPowder]);
        let mut slot = slot_wanting_cocoa();
        let mut board = Scoreboard::new();
        let config = StageConfig {
            scoring: ScoringPolicy::MatchedOnly,
            ..Default::default()
        };

        serve_cup(&mut cup, &mut slot, &mut board, &config, &mut Vec::new());
        assert_eq!(board.score, 0);
    }

    #[test]
    fn test_no_customer_or_inactive_cup() {
        let mut board = Scoreboard::new();
        let config = StageConfig::default();

        let mut empty = CustomerSlot::new(1);
        let mut cup = cocoa_drink();
        assert_eq!(
            serve_cup(&mut cup, &mut empty, &mut board, &config, &mut Vec::new()),
            ServeOutcome::NoCustomer
        );

        let mut idle = Cup::new();
        let mut slot = slot_wanting_cocoa();
        assert_eq!(
            serve_cup(&mut idle, &mut slot, &mut board, &config, &mut Vec::new()),
            ServeOutcome::CupInactive
        );
        assert_eq!(board, Scoreboard::new());
    }
}
