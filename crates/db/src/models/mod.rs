//! Database row structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` row struct matching the table, with JSONB columns wrapped
//!   in [`sqlx::types::Json`]
//! - A conversion from the row into the matching `shipyard_core` type
//! - A `Deserialize` create DTO where inserts need more than the core type

pub mod fleet;
pub mod player;
pub mod ship_design;
