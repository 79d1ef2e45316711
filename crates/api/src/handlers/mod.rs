pub mod ship_designs;
pub mod techs;
