//! Mineral and resource costs.

use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// The price of a tech, design, or production item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export)]
pub struct Cost {
    pub ironium: i32,
    pub boranium: i32,
    pub germanium: i32,
    pub resources: i32,
}

impl Cost {
    pub const fn new(ironium: i32, boranium: i32, germanium: i32, resources: i32) -> Self {
        Self {
            ironium,
            boranium,
            germanium,
            resources,
        }
    }

    pub fn multiply_int(self, factor: i32) -> Self {
        Self {
            ironium: self.ironium * factor,
            boranium: self.boranium * factor,
            germanium: self.germanium * factor,
            resources: self.resources * factor,
        }
    }

    /// Scale every component, rounding to the nearest whole unit.
    pub fn multiply_f64(self, factor: f64) -> Self {
        let scale = |v: i32| (v as f64 * factor).round() as i32;
        Self {
            ironium: scale(self.ironium),
            boranium: scale(self.boranium),
            germanium: scale(self.germanium),
            resources: scale(self.resources),
        }
    }

    /// Clamp negative components to zero.
    pub fn min_zero(self) -> Self {
        Self {
            ironium: self.ironium.max(0),
            boranium: self.boranium.max(0),
            germanium: self.germanium.max(0),
            resources: self.resources.max(0),
        }
    }

    pub fn total_minerals(&self) -> i32 {
        self.ironium + self.boranium + self.germanium
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }
}

impl Add for Cost {
    type Output = Cost;

    fn add(self, rhs: Cost) -> Cost {
        Cost {
            ironium: self.ironium + rhs.ironium,
            boranium: self.boranium + rhs.boranium,
            germanium: self.germanium + rhs.germanium,
            resources: self.resources + rhs.resources,
        }
    }
}

impl Sub for Cost {
    type Output = Cost;

    fn sub(self, rhs: Cost) -> Cost {
        Cost {
            ironium: self.ironium - rhs.ironium,
            boranium: self.boranium - rhs.boranium,
            germanium: self.germanium - rhs.germanium,
            resources: self.resources - rhs.resources,
        }
    }
}
