//! Prices of production queue items.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::cost::Cost;
use crate::error::CoreError;
use crate::ship_design::ShipDesign;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QueueItemType {
    Mine,
    Factory,
    Defenses,
    MineralAlchemy,
    TerraformEnvironment,
    Starbase,
    ShipToken,
}

impl QueueItemType {
    /// Items whose price comes from a ship design rather than the race.
    pub fn is_design(self) -> bool {
        matches!(self, QueueItemType::Starbase | QueueItemType::ShipToken)
    }
}

/// One entry in a planet's production queue. Design items carry the design
/// they build; it must be populated before the item can be priced.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductionQueueItem<'a> {
    pub item_type: QueueItemType,
    pub quantity: i32,
    pub design: Option<&'a ShipDesign>,
}

impl<'a> ProductionQueueItem<'a> {
    pub fn new(item_type: QueueItemType, quantity: i32) -> Self {
        Self {
            item_type,
            quantity,
            design: None,
        }
    }

    pub fn with_design(mut self, design: &'a ShipDesign) -> Self {
        self.design = Some(design);
        self
    }
}

/// What it costs to replace starbase `design` with `new_design`. Never
/// negative: downgrading is free, not a refund.
pub fn starbase_upgrade_cost(design: &ShipDesign, new_design: &ShipDesign) -> Cost {
    (new_design.spec.cost() - design.spec.cost()).min_zero()
}

/// The cost of building one of `item`.
pub fn cost_of_one(
    race_costs: &HashMap<QueueItemType, Cost>,
    item: &ProductionQueueItem<'_>,
) -> Result<Cost, CoreError> {
    if item.item_type.is_design() {
        return item
            .design
            .map(|d| d.spec.cost())
            .ok_or_else(|| CoreError::Internal(format!("{:?} queue item has no design", item.item_type)));
    }
    Ok(race_costs.get(&item.item_type).copied().unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::RaceSpec;
    use crate::ship_design::ShipDesignSpec;
    use assert_matches::assert_matches;

    fn starbase(cost: Cost) -> ShipDesign {
        let mut design = ShipDesign::new(1, 1, "Base", "Space Station");
        design.spec = ShipDesignSpec {
            cost: Some(cost),
            ..Default::default()
        };
        design
    }

    #[test]
    fn upgrade_cost_is_the_clamped_difference() {
        let fort = starbase(Cost::new(20, 10, 30, 100));
        let station = starbase(Cost::new(100, 5, 150, 500));
        assert_eq!(starbase_upgrade_cost(&fort, &station), Cost::new(80, 0, 120, 400));
        assert_eq!(starbase_upgrade_cost(&station, &fort), Cost::default());
    }

    #[test]
    fn cost_of_one_uses_race_table_or_design() {
        let race = RaceSpec::default();
        let mine = ProductionQueueItem::new(QueueItemType::Mine, 10);
        assert_eq!(cost_of_one(&race.costs, &mine).unwrap(), Cost::new(0, 0, 0, 5));

        let design = starbase(Cost::new(1, 2, 3, 4));
        let item = ProductionQueueItem::new(QueueItemType::Starbase, 1).with_design(&design);
        assert_eq!(cost_of_one(&race.costs, &item).unwrap(), Cost::new(1, 2, 3, 4));
    }

    #[test]
    fn design_item_without_design_is_an_error() {
        let race = RaceSpec::default();
        let item = ProductionQueueItem::new(QueueItemType::ShipToken, 1);
        assert_matches!(cost_of_one(&race.costs, &item), Err(CoreError::Internal(_)));
    }
}
