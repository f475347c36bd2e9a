//! Hit chance and accuracy calculations.

use rand::Rng;

/// Lower bound of any hit chance.
pub const MIN_HIT_CHANCE: f32 = 0.1;
/// Upper bound of any hit chance.
pub const MAX_HIT_CHANCE: f32 = 0.95;

/// Multiplier for a ranged attacker shooting an adjacent target.
pub const POINT_BLANK_MULTIPLIER: f32 = 0.6;
/// Accuracy lost per tile between the optimal band and attack range.
pub const FALLOFF_PER_TILE: f32 = 0.05;
/// Multiplier compounded per tile beyond attack range.
pub const BEYOND_RANGE_MULTIPLIER: f32 = 0.7;

/// Far edge of the band where a ranged attacker has no distance penalty.
///
/// Two thirds of attack range, never closer than two tiles.
pub fn optimal_distance(attack_range: u32) -> u32 {
    (attack_range * 2 / 3).max(2)
}

/// Distance multiplier for a ranged attacker. Melee attackers always get 1.
///
/// ```text
/// d <= 1                  0.6
/// 2 <= d <= optimal       1.0
/// optimal < d <= range    1 - 0.05 × (d - optimal)
/// d > range               (value at range) × 0.7^(d - range)
/// ```
pub fn distance_multiplier(distance: u32, attack_range: u32) -> f32 {
    if attack_range <= 1 {
        return 1.0;
    }
    if distance <= 1 {
        return POINT_BLANK_MULTIPLIER;
    }

    let optimal = optimal_distance(attack_range);
    if distance <= optimal {
        return 1.0;
    }

    let falloff = |d: u32| 1.0 - FALLOFF_PER_TILE * d.saturating_sub(optimal) as f32;
    if distance <= attack_range {
        return falloff(distance);
    }

    let beyond = (distance - attack_range).min(64) as i32;
    falloff(attack_range) * BEYOND_RANGE_MULTIPLIER.powi(beyond)
}

/// Effective hit chance of an attack.
///
/// # Formula
///
/// ```text
/// chance = accuracy × distance_multiplier(distance, attack_range) - defender_mobility
/// clamped to [0.1, 0.95]
/// ```
///
/// # Arguments
///
/// * `accuracy` - Attacker's base accuracy plus any ability bias
/// * `distance` - Chebyshev distance in tiles
/// * `attack_range` - Attacker's range; above 1 enables the ranged curve
/// * `defender_mobility` - Dodge bonus reported by the target
pub fn hit_chance(accuracy: f32, distance: u32, attack_range: u32, defender_mobility: f32) -> f32 {
    let chance = accuracy * distance_multiplier(distance, attack_range) - defender_mobility;
    if chance.is_nan() {
        return MIN_HIT_CHANCE;
    }
    chance.clamp(MIN_HIT_CHANCE, MAX_HIT_CHANCE)
}

/// Rolls uniform against `chance`.
pub fn roll_hit(chance: f32, rng: &mut impl Rng) -> bool {
    rng.r#gen::<f32>() < chance
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn melee_has_no_distance_penalty() {
        assert_eq!(hit_chance(0.8, 1, 1, 0.0), 0.8);
        assert_eq!(hit_chance(0.8, 5, 1, 0.0), 0.8);
    }

    #[test]
    fn ranged_curve_shape() {
        // range 6 → optimal 4
        assert_eq!(distance_multiplier(1, 6), POINT_BLANK_MULTIPLIER);
        assert_eq!(distance_multiplier(3, 6), 1.0);
        assert_eq!(distance_multiplier(4, 6), 1.0);
        assert!((distance_multiplier(6, 6) - 0.9).abs() < 1e-6);
        assert!((distance_multiplier(7, 6) - 0.63).abs() < 1e-6);
    }

    #[test]
    fn mobility_lowers_chance() {
        assert!(hit_chance(0.8, 3, 6, 0.2) < hit_chance(0.8, 3, 6, 0.0));
    }

    proptest! {
        #[test]
        fn hit_chance_is_always_bounded(
            accuracy in -2.0f32..3.0,
            distance in 0u32..200,
            range in 0u32..20,
            mobility in -1.0f32..1.0,
        ) {
            let chance = hit_chance(accuracy, distance, range, mobility);
            prop_assert!((MIN_HIT_CHANCE..=MAX_HIT_CHANCE).contains(&chance));
        }
    }
}
