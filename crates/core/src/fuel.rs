//! Fuel consumption and range.

use crate::tech::Engine;

/// Range reported for designs that never burn fuel.
pub const INFINITE_RANGE: i32 = i32::MAX;

/// Fuel (mg) to move `mass` kT `distance` light-years at `warp`.
///
/// An engine's usage number is fuel per 200 kT per light-year in units of
/// 1/100 mg. Warp 0 and speeds at or below the engine's free speed cost
/// nothing.
pub fn fuel_cost(mass: i32, warp: i32, distance: f64, efficiency: f64, engine: &Engine) -> i32 {
    if warp <= 0 || warp <= engine.free_speed || mass <= 0 || distance <= 0.0 {
        return 0;
    }
    let usage = (engine.fuel_usage_at(warp) as f64 * efficiency).ceil();
    (mass as f64 * usage * distance.ceil() / 2000.0 / 10.0).ceil() as i32
}

/// How far `mass` kT can go on `fuel` mg at `warp`.
pub fn estimated_range(mass: i32, fuel: i32, warp: i32, efficiency: f64, engine: &Engine) -> i32 {
    if warp <= engine.free_speed || mass <= 0 {
        return INFINITE_RANGE;
    }
    let usage = (engine.fuel_usage_at(warp) as f64 * efficiency).ceil();
    if usage <= 0.0 {
        return INFINITE_RANGE;
    }
    (fuel as f64 * 2000.0 * 10.0 / (mass as f64 * usage)).floor() as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn long_hump() -> Engine {
        Engine {
            ideal_speed: 6,
            free_speed: 1,
            max_safe_speed: 9,
            fuel_usage: vec![0, 0, 20, 60, 100, 100, 105, 450, 750, 900, 1080],
        }
    }

    #[test]
    fn free_below_free_speed() {
        let engine = long_hump();
        assert_eq!(fuel_cost(100, 0, 50.0, 1.0, &engine), 0);
        assert_eq!(fuel_cost(100, 1, 50.0, 1.0, &engine), 0);

        let scoop = Engine {
            free_speed: 6,
            ..long_hump()
        };
        assert_eq!(fuel_cost(100, 6, 50.0, 1.0, &scoop), 0);
        assert_eq!(estimated_range(100, 10, 6, 1.0, &scoop), INFINITE_RANGE);
    }

    #[test]
    fn cost_rounds_up() {
        let engine = long_hump();
        // 200kT * 105 * 10ly / 20000 = 10.5
        assert_eq!(fuel_cost(200, 6, 10.0, 1.0, &engine), 11);
        // fractional distances count as a whole light-year
        assert_eq!(fuel_cost(200, 6, 9.2, 1.0, &engine), 11);
    }

    #[test]
    fn efficiency_lowers_usage() {
        let engine = long_hump();
        assert_eq!(fuel_cost(200, 6, 100.0, 0.85, &engine), 90);
    }

    #[test]
    fn range_at_ideal_speed() {
        let engine = long_hump();
        // 50mg * 20000 / (25kT * 105)
        assert_eq!(estimated_range(25, 50, 6, 1.0, &engine), 380);
    }
}
