//! MeowCafe Core - Café Minigame Session Engine
//!
//! Runs one café stage: a cup pulled from the stack, ingredients dragged
//! onto it in slot order, and three seats of customers whose patience
//! runs down while they wait for the drink they asked for.
//!
//! # Architecture
//!
//! Counter objects live in an ECS world via `hecs`:
//! - **Entities**: the cup, ingredient tins and bottles, pour overlays
//! - **Components**: pure data (Draggable, CupItem, IngredientItem, ...)
//! - **Systems**: pointer handling, customer patience, serving
//!
//! The rules themselves (slot order, composition keys, validation,
//! scoring) live in `meowcafe-logic`.
//!
//! # Example
//!
//! ```rust,no_run
//! use meowcafe_core::prelude::*;
//!
//! let mut session = MinigameSession::default();
//!
//! loop {
//!     let events = session.update(PointerInput::hover(Vec2::ZERO));
//!     for event in events {
//!         println!("{:?}", event);
//!     }
//! }
//! ```

pub mod components;
pub mod config;
pub mod engine;
pub mod events;
pub mod generation;
pub mod snapshot;
pub mod systems;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::components::*;
    pub use crate::engine::MinigameSession;
    pub use crate::events::SessionEvent;
    pub use crate::systems::{PointerInput, ServeOutcome};
    pub use meowcafe_logic::geometry::Vec2;
}
