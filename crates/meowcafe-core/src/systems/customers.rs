//! Customer system - ticks waiting customers and refills free seats

use meowcafe_logic::config::StageConfig;
use meowcafe_logic::customer::{Customer, TickOutcome, SEAT_COUNT};
use meowcafe_logic::scoring::Scoreboard;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::events::SessionEvent;
use crate::generation::generate_customer;

/// One serving seat and whoever last sat there.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerSlot {
    /// Seat index, 1..=3.
    pub seat: u8,
    /// Current or most recent customer; `None` if never filled this stage.
    pub customer: Option<Customer>,
    /// Ticks since the seat became free.
    pub vacant_for: u32,
}

impl CustomerSlot {
    pub fn new(seat: u8) -> Self {
        Self {
            seat,
            customer: None,
            vacant_for: 0,
        }
    }

    /// The waiting customer, if one is visible.
    pub fn occupant(&self) -> Option<&Customer> {
        self.customer.as_ref().filter(|c| c.visible)
    }

    pub fn occupant_mut(&mut self) -> Option<&mut Customer> {
        self.customer.as_mut().filter(|c| c.visible)
    }

    pub fn is_free(&self) -> bool {
        self.occupant().is_none()
    }
}

/// Seats 1..=3, all empty.
pub fn empty_seats() -> Vec<CustomerSlot> {
    (1..=SEAT_COUNT as u8).map(CustomerSlot::new).collect()
}

/// Tick every visible customer once. Timeouts remove the customer and
/// cost `config.timeout_penalty`; free seats count towards their refill.
pub fn customer_system(
    slots: &mut [CustomerSlot],
    scoreboard: &mut Scoreboard,
    config: &StageConfig,
    events: &mut Vec<SessionEvent>,
) {
    for slot in slots.iter_mut() {
        let seat = slot.seat;
        match slot.occupant_mut().map(|c| c.tick()) {
            Some(TickOutcome::TimedOut) => {
                scoreboard.record_timeout(config.timeout_penalty);
                slot.vacant_for = 0;
                log::info!(
                    "Customer at seat {} left unserved (-{})",
                    seat,
                    config.timeout_penalty
                );
                events.push(SessionEvent::CustomerTimedOut {
                    seat,
                    penalty: config.timeout_penalty,
                });
            }
            Some(TickOutcome::Waiting { .. }) | Some(TickOutcome::Idle) => {}
            None => slot.vacant_for = slot.vacant_for.saturating_add(1),
        }
    }
}

/// Seat a new customer wherever a seat is free: immediately if it has
/// never been filled this stage, otherwise once it has been vacant for
/// `config.respawn_delay` ticks.
pub fn refill_seats(
    slots: &mut [CustomerSlot],
    config: &StageConfig,
    rng: &mut impl Rng,
    events: &mut Vec<SessionEvent>,
) {
    for slot in slots.iter_mut() {
        if !slot.is_free() {
            continue;
        }
        let ready = slot.customer.is_none() || slot.vacant_for >= config.respawn_delay;
        if !ready {
            continue;
        }

        let customer = generate_customer(slot.seat, config, rng);
        log::info!(
            "Customer arrived at seat {} (patience {:.2}, {} ticks)",
            slot.seat,
            customer.patience,
            customer.order_end
        );
        events.push(SessionEvent::CustomerArrived {
            seat: slot.seat,
            order: customer.order.clone(),
        });
        slot.customer = Some(customer);
        slot.vacant_for = 0;
    }
}
