//! Combat result types.

/// Outcome of an attack attempt.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum AttackOutcome {
    /// Attack missed the target.
    Miss,
    /// Attack hit the target.
    Hit,
    /// The target's stat system reported a critical.
    Critical,
}

/// What the target's stat system did with incoming damage.
///
/// Returned by `CombatTarget::take_damage`. The engine never computes armor or
/// body parts itself; it only forwards these flags into events.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageReport {
    /// Damage that actually reached health.
    pub amount: u32,
    /// Damage soaked by armor.
    pub absorbed: u32,
    /// Body part struck, when the target models them.
    pub body_part: Option<String>,
    pub critical: bool,
    pub instant_death: bool,
}

impl DamageReport {
    /// Plain report for targets without armor or body parts.
    pub fn direct(amount: u32) -> Self {
        Self {
            amount,
            ..Self::default()
        }
    }

    pub fn outcome(&self) -> AttackOutcome {
        if self.critical || self.instant_death {
            AttackOutcome::Critical
        } else {
            AttackOutcome::Hit
        }
    }
}

/// Result of a creature taking damage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageTaken {
    /// Health actually removed.
    pub amount: u32,
    pub remaining_health: u32,
    /// True only on the call that brought health to zero.
    pub killed: bool,
    /// True when the hit knocked the creature out of stealth.
    pub revealed: bool,
}
