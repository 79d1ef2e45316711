//! Shipyard domain core.
//!
//! Ship design records, the tech catalog, and the spec engine that turns a
//! hull plus components into derived ship performance. Also the pieces of
//! game logic that consume design specs: fuel and cloak curves, production
//! costs, and mine field damage. No I/O lives here; persistence and HTTP
//! sit in the `db` and `api` crates.

pub mod cloak;
pub mod cost;
pub mod cost_calculator;
pub mod design_spec;
pub mod design_validation;
pub mod error;
pub mod fleet;
pub mod fuel;
pub mod messages;
pub mod minefield;
pub mod player;
pub mod rules;
pub mod ship_design;
pub mod tech;
pub mod techs;
pub mod types;
