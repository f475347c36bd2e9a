//! Damage types and damage rolls.

use rand::Rng;

/// Damage type reported to the target's stat system.
///
/// Resistances live on the target side; the engine only tags the hit.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum DamageType {
    /// Melee, projectiles.
    #[default]
    Physical,
    /// Burns, explosions.
    Fire,
    Cold,
    /// Toxins, venom.
    Poison,
    /// Mind attacks.
    Psychic,
    /// Ignores all resistances. Used for damage over time.
    True,
}

/// Lowest and highest multiplier applied to base damage by a roll.
pub const DAMAGE_VARIANCE: (f32, f32) = (0.8, 1.2);

/// Outgoing damage multiplier while the attacker is weakened.
pub const WEAKENED_MULTIPLIER: f32 = 0.75;

/// Rolls final damage.
///
/// # Formula
///
/// ```text
/// raw = base × multiplier × uniform(0.8, 1.2) × (0.75 if weakened)
/// final = max(round(raw), 1) when multiplier > 0, else 0
/// ```
pub fn roll_damage(base: u32, multiplier: f32, weakened: bool, rng: &mut impl Rng) -> u32 {
    if base == 0 || multiplier <= 0.0 {
        return 0;
    }
    let variance = rng.gen_range(DAMAGE_VARIANCE.0..=DAMAGE_VARIANCE.1);
    let mut raw = base as f32 * multiplier * variance;
    if weakened {
        raw *= WEAKENED_MULTIPLIER;
    }
    (raw.round() as u32).max(1)
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;
    use crate::env::CreatureRng;

    #[test]
    fn rolls_stay_inside_variance_band() {
        let mut rng = CreatureRng::seed_from_u64(3);
        for _ in 0..500 {
            let dmg = roll_damage(10, 1.0, false, &mut rng);
            assert!((8..=12).contains(&dmg), "{dmg}");
        }
    }

    #[test]
    fn control_abilities_deal_nothing() {
        let mut rng = CreatureRng::seed_from_u64(3);
        assert_eq!(roll_damage(10, 0.0, false, &mut rng), 0);
    }

    #[test]
    fn weakened_never_drops_to_zero() {
        let mut rng = CreatureRng::seed_from_u64(5);
        for _ in 0..100 {
            assert!(roll_damage(1, 0.5, true, &mut rng) >= 1);
        }
    }
}
