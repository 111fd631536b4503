//! Order and customer generation

use meowcafe_logic::config::StageConfig;
use meowcafe_logic::customer::Customer;
use meowcafe_logic::order::{menu, Order};
use rand::Rng;

/// Pick a random drink from the menu.
pub fn random_order(rng: &mut impl Rng) -> Order {
    let recipes = menu();
    let recipe = recipes[rng.gen_range(0..recipes.len())];
    Order::from_recipe(&recipe)
}

/// Patience multiplier drawn uniformly from the configured range. A range
/// that cannot be sampled (empty, or with a non-finite width) falls back to
/// `patience_min`, or 1.0 if that is not a usable multiplier either.
pub fn random_patience(config: &StageConfig, rng: &mut impl Rng) -> f32 {
    let (min, max) = (config.patience_min, config.patience_max);
    if max > min && (max - min).is_finite() {
        rng.gen_range(min..=max)
    } else if min.is_finite() && min > 0.0 {
        min
    } else {
        1.0
    }
}

/// A new customer for `seat` with a fresh order.
pub fn generate_customer(seat: u8, config: &StageConfig, rng: &mut impl Rng) -> Customer {
    let order = random_order(rng);
    let patience = random_patience(config, rng);
    Customer::new(seat, order, config.base_duration, patience)
}
