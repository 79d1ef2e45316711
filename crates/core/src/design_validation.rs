//! Checks a submitted design against the catalog and the player's research
//! before it is saved.

use std::collections::{HashMap, HashSet};

use crate::error::CoreError;
use crate::player::Player;
use crate::ship_design::{ShipDesign, ShipDesignSlot};
use crate::tech::TechHull;
use crate::techs::TechStore;

pub const MAX_DESIGN_NAME_LEN: usize = 32;

fn invalid(msg: impl Into<String>) -> CoreError {
    CoreError::Validation(msg.into())
}

/// Validate `design` for `player`. Every failure is a
/// [`CoreError::Validation`] naming the offending slot or part.
pub fn validate_ship_design(
    techs: &TechStore,
    player: &Player,
    design: &ShipDesign,
) -> Result<(), CoreError> {
    let name = design.name.trim();
    if name.is_empty() {
        return Err(invalid("design name is required"));
    }
    if name.chars().count() > MAX_DESIGN_NAME_LEN {
        return Err(invalid(format!(
            "design name must be at most {MAX_DESIGN_NAME_LEN} characters"
        )));
    }
    if design.mystery_trader {
        return Err(invalid("mystery trader designs cannot be submitted"));
    }

    let hull = techs
        .hull(&design.hull)
        .ok_or_else(|| invalid(format!("unknown hull {}", design.hull)))?;
    if !player.tech_levels.has_required_levels(&hull.requirements) {
        return Err(invalid(format!("hull {} is not available", hull.name)));
    }

    validate_slot_layout(hull, &design.slots)?;

    let mut filled: HashMap<i32, i32> = HashMap::new();
    for slot in &design.slots {
        let index = slot.hull_slot_index;
        let hull_slot = hull
            .slot(index)
            .ok_or_else(|| invalid(format!("slot {index} is out of range")))?;

        let component = techs
            .hull_component(&slot.hull_component)
            .ok_or_else(|| invalid(format!("slot {index}: unknown component {}", slot.hull_component)))?;
        if !player.tech_levels.has_required_levels(&component.requirements) {
            return Err(invalid(format!(
                "slot {index}: {} is not available",
                component.name
            )));
        }
        if !hull_slot.slot_type.accepts(component.slot_type) {
            return Err(invalid(format!(
                "slot {index}: {} does not fit a {:?} slot",
                component.name, hull_slot.slot_type
            )));
        }

        *filled.entry(index).or_default() += slot.quantity;
    }

    for (i, hull_slot) in hull.slots.iter().enumerate() {
        let index = i as i32 + 1;
        if hull_slot.required && filled.get(&index).copied().unwrap_or(0) < hull_slot.capacity {
            return Err(invalid(format!(
                "slot {index} is required and must be filled"
            )));
        }
    }

    Ok(())
}

/// Check slot indices and quantities against `hull`. Each (slot, component)
/// pair may appear once and a slot never holds more than its capacity.
/// Required slots may still be empty.
pub fn validate_slot_layout(hull: &TechHull, slots: &[ShipDesignSlot]) -> Result<(), CoreError> {
    let mut seen = HashSet::new();
    let mut filled: HashMap<i32, i32> = HashMap::new();

    for slot in slots {
        let index = slot.hull_slot_index;
        let hull_slot = hull.slot(index).ok_or_else(|| {
            invalid(format!(
                "slot {index} is out of range, {} has {} slots",
                hull.name,
                hull.slots.len()
            ))
        })?;

        if !seen.insert((index, slot.hull_component.as_str())) {
            return Err(invalid(format!(
                "slot {index} lists {} more than once",
                slot.hull_component
            )));
        }

        if slot.quantity < 1 || slot.quantity > hull_slot.capacity {
            return Err(invalid(format!(
                "slot {index} quantity {} must be between 1 and {}",
                slot.quantity, hull_slot.capacity
            )));
        }

        let total = filled.entry(index).or_default();
        *total += slot.quantity;
        if *total > hull_slot.capacity {
            return Err(invalid(format!(
                "slot {index} holds {} components but has room for {}",
                total, hull_slot.capacity
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tech::TechLevel;
    use assert_matches::assert_matches;

    fn check(design: &ShipDesign, levels: TechLevel) -> Result<(), CoreError> {
        let player = Player::new(1, "Humanoids", levels);
        validate_ship_design(&TechStore::standard(), &player, design)
    }

    fn scout(slots: Vec<ShipDesignSlot>) -> ShipDesign {
        ShipDesign::new(1, 1, "Scout", "Scout").with_slots(slots)
    }

    fn error_text(result: Result<(), CoreError>) -> String {
        match result {
            Err(CoreError::Validation(msg)) => msg,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn accepts_a_valid_scout() {
        let d = scout(vec![
            ShipDesignSlot::new("Quick Jump 5", 1, 1),
            ShipDesignSlot::new("Rhino Scanner", 2, 1),
            ShipDesignSlot::new("Laser", 3, 1),
        ]);
        assert_matches!(check(&d, TechLevel::new(0, 0, 0, 0, 1, 0)), Ok(()));
    }

    #[test]
    fn rejects_bad_names() {
        let mut d = scout(vec![ShipDesignSlot::new("Quick Jump 5", 1, 1)]);
        d.name = "   ".into();
        assert!(error_text(check(&d, TechLevel::default())).contains("name"));

        d.name = "x".repeat(MAX_DESIGN_NAME_LEN + 1);
        assert!(error_text(check(&d, TechLevel::default())).contains("32"));

        d.name = "x".repeat(MAX_DESIGN_NAME_LEN);
        assert_matches!(check(&d, TechLevel::default()), Ok(()));
    }

    #[test]
    fn rejects_unavailable_tech() {
        let d = scout(vec![ShipDesignSlot::new("Long Hump 6", 1, 1)]);
        assert!(error_text(check(&d, TechLevel::default())).contains("Long Hump 6"));

        let d = ShipDesign::new(1, 1, "Cruiser", "Cruiser")
            .with_slots(vec![ShipDesignSlot::new("Quick Jump 5", 1, 2)]);
        assert!(error_text(check(&d, TechLevel::default())).contains("Cruiser"));
    }

    #[test]
    fn rejects_slot_problems() {
        let out_of_range = scout(vec![
            ShipDesignSlot::new("Quick Jump 5", 1, 1),
            ShipDesignSlot::new("Laser", 4, 1),
        ]);
        assert!(error_text(check(&out_of_range, TechLevel::default())).contains("slot 4"));

        let wrong_type = scout(vec![ShipDesignSlot::new("Laser", 1, 1)]);
        assert!(error_text(check(&wrong_type, TechLevel::default())).contains("does not fit"));

        let too_many = scout(vec![ShipDesignSlot::new("Quick Jump 5", 1, 2)]);
        assert!(error_text(check(&too_many, TechLevel::default())).contains("between 1 and 1"));

        let duplicate = scout(vec![
            ShipDesignSlot::new("Quick Jump 5", 1, 1),
            ShipDesignSlot::new("Laser", 3, 1),
            ShipDesignSlot::new("Laser", 3, 1),
        ]);
        assert!(error_text(check(&duplicate, TechLevel::default())).contains("more than once"));

        let over_capacity = scout(vec![
            ShipDesignSlot::new("Quick Jump 5", 1, 1),
            ShipDesignSlot::new("Laser", 3, 1),
            ShipDesignSlot::new("Tritanium", 3, 1),
        ]);
        assert!(error_text(check(&over_capacity, TechLevel::default())).contains("room for 1"));

        let unknown = scout(vec![ShipDesignSlot::new("Flux Drive", 1, 1)]);
        assert!(error_text(check(&unknown, TechLevel::default())).contains("unknown component"));
    }

    #[test]
    fn layout_allows_incomplete_designs() {
        let techs = TechStore::standard();
        let scout = techs.hull("Scout").unwrap();
        let slots = vec![ShipDesignSlot::new("Laser", 3, 1)];
        assert_matches!(validate_slot_layout(scout, &slots), Ok(()));
        assert_matches!(validate_slot_layout(scout, &[]), Ok(()));
    }

    #[test]
    fn layout_rejects_huge_quantities() {
        let techs = TechStore::standard();
        let scout = techs.hull("Scout").unwrap();
        let slots = vec![ShipDesignSlot::new("Laser", 3, 400_000_000)];
        let msg = error_text(validate_slot_layout(scout, &slots));
        assert!(msg.contains("between 1 and 1"));

        let zero = vec![ShipDesignSlot::new("Laser", 3, 0)];
        assert!(error_text(validate_slot_layout(scout, &zero)).contains("between 1 and 1"));
    }

    #[test]
    fn requires_engines() {
        let d = scout(vec![ShipDesignSlot::new("Laser", 3, 1)]);
        assert!(error_text(check(&d, TechLevel::default())).contains("required"));
    }

    #[test]
    fn rejects_mystery_trader_designs() {
        let mut d = scout(vec![ShipDesignSlot::new("Quick Jump 5", 1, 1)]);
        d.mystery_trader = true;
        assert!(error_text(check(&d, TechLevel::default())).contains("mystery trader"));
    }
}
