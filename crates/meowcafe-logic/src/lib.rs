//! Pure order-fulfillment logic for MeowCafe.
//!
//! This crate contains the café minigame rules independent of any ECS,
//! renderer or input backend. Functions take plain data and return
//! results, so the rules are unit-testable on their own and shared by the
//! session engine and the headless harness.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | Stage tuning and counter layout, with validation |
//! | [`cup`] | Ordered slot machine and composition keys |
//! | [`customer`] | Patience countdown, emotion thresholds, timeout |
//! | [`drag`] | Single-owner drag session and drop decisions |
//! | [`geometry`] | Points and axis-aligned rectangles |
//! | [`ingredients`] | Ingredient catalogue, slots, labels, key codes |
//! | [`order`] | Orders, menu recipes, the order validator |
//! | [`scoring`] | Point distribution, scoring policy, scoreboard |

pub mod config;
pub mod cup;
pub mod customer;
pub mod drag;
pub mod geometry;
pub mod ingredients;
pub mod order;
pub mod scoring;
