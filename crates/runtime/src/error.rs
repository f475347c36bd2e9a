//! Errors surfaced by encounter orchestration.

use creature_core::{ErrorSeverity, GameError, OracleError, Position};

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    #[error("no creature at roster index {0}")]
    UnknownCreature(usize),

    #[error("spawn tile {0} is occupied")]
    SpawnBlocked(Position),

    #[error(transparent)]
    Oracle(#[from] OracleError),

    #[error("invalid map: {0}")]
    InvalidMap(String),

    #[error("invalid scenario: {0}")]
    InvalidScenario(String),
}

impl GameError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::UnknownCreature(_) | Self::InvalidMap(_) | Self::InvalidScenario(_) => {
                ErrorSeverity::Validation
            }
            Self::SpawnBlocked(_) => ErrorSeverity::Recoverable,
            Self::Oracle(inner) => inner.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownCreature(_) => "RUNTIME_UNKNOWN_CREATURE",
            Self::SpawnBlocked(_) => "RUNTIME_SPAWN_BLOCKED",
            Self::Oracle(inner) => inner.error_code(),
            Self::InvalidMap(_) => "RUNTIME_INVALID_MAP",
            Self::InvalidScenario(_) => "RUNTIME_INVALID_SCENARIO",
        }
    }
}
