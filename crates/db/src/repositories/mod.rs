//! Repository layer: one zero-sized struct per table with async CRUD
//! functions taking a `&PgPool`. Rows are converted into `shipyard_core`
//! types before they leave this crate.

pub mod fleet_repo;
pub mod player_repo;
pub mod ship_design_repo;

pub use fleet_repo::FleetRepo;
pub use player_repo::PlayerRepo;
pub use ship_design_repo::{DesignDeletion, ShipDesignRepo};
