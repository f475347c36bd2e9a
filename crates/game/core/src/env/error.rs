//! Oracle access errors.
//!
//! Errors raised when a caller hands the engine a reference the read-only
//! data cannot satisfy.

use crate::creature::CreatureKind;
use crate::error::{ErrorSeverity, GameError};
use crate::state::Position;

/// Errors that occur when resolving oracle data.
///
/// These indicate invalid input (an archetype missing from the catalog, a
/// spawn tile outside the grid) rather than engine bugs.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OracleError {
    /// No archetype template is registered for this creature kind.
    #[error("archetype template for '{0}' not found")]
    ArchetypeNotFound(CreatureKind),

    /// Position is outside the map bounds.
    #[error("position {0} is out of map bounds")]
    PositionOutOfBounds(Position),

    /// Terrain at the position cannot be stood on.
    #[error("tile {0} is not walkable")]
    TileNotWalkable(Position),
}

impl GameError for OracleError {
    fn severity(&self) -> ErrorSeverity {
        use OracleError::*;
        match self {
            ArchetypeNotFound(_) | PositionOutOfBounds(_) => ErrorSeverity::Validation,
            // Another tile may work.
            TileNotWalkable(_) => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        use OracleError::*;
        match self {
            ArchetypeNotFound(_) => "ORACLE_ARCHETYPE_NOT_FOUND",
            PositionOutOfBounds(_) => "ORACLE_POSITION_OUT_OF_BOUNDS",
            TileNotWalkable(_) => "ORACLE_TILE_NOT_WALKABLE",
        }
    }
}
