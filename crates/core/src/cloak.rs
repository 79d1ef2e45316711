//! Cloak units to cloak percent.
//!
//! The curve has diminishing returns: the first 100 units buy 50%, the
//! next 200 another 25%, and so on up to a hard cap of 98%.

pub const MAX_CLOAK_PERCENT: i32 = 98;

pub fn cloak_percent_for_units(cloak_units: i32) -> i32 {
    if cloak_units <= 0 {
        return 0;
    }
    if cloak_units <= 100 {
        return (cloak_units as f64 / 2.0 + 0.5) as i32;
    }

    let mut units = cloak_units - 100;
    if units < 200 {
        return 50 + units / 8;
    }
    units -= 200;
    if units < 312 {
        return 75 + units / 24;
    }
    units -= 312;
    if units < 512 {
        return 88 + units / 64;
    }
    units -= 512;
    if units < 768 {
        return 96;
    }
    units -= 768;
    if units < 1000 {
        return 97;
    }
    MAX_CLOAK_PERCENT
}

/// Cloak units once a tachyon detector field has been applied. `reduction`
/// is the fraction of cloaking removed, 0..=1.
pub fn reduced_cloak_units(cloak_units: i32, reduction: f64) -> i32 {
    (cloak_units as f64 * (1.0 - reduction)).round() as i32
}
