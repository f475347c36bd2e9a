use std::fmt;

/// Discrete grid position expressed in tile coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the tile displaced by `(dx, dy)`.
    #[inline]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Chebyshev (diagonal-inclusive) distance in tiles.
    #[inline]
    pub fn chebyshev(self, other: Position) -> u32 {
        let dx = (self.x - other.x).unsigned_abs();
        let dy = (self.y - other.y).unsigned_abs();
        dx.max(dy)
    }

    /// Squared Euclidean distance, used as a tie-breaker between tiles at the
    /// same Chebyshev distance.
    #[inline]
    pub fn distance_squared(self, other: Position) -> i64 {
        let dx = (self.x - other.x) as i64;
        let dy = (self.y - other.y) as i64;
        dx * dx + dy * dy
    }

    /// World-space center of this tile.
    #[inline]
    pub fn center(self, tile_size: f32) -> WorldPos {
        WorldPos::new(
            (self.x as f32 + 0.5) * tile_size,
            (self.y as f32 + 0.5) * tile_size,
        )
    }

    /// Returns true when `other` touches this tile diagonally.
    #[inline]
    pub fn is_diagonal_to(self, other: Position) -> bool {
        (self.x - other.x).abs() == 1 && (self.y - other.y).abs() == 1
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::ORIGIN
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Continuous world coordinate.
///
/// Creatures store only this; the tile they stand on is always derived with
/// [`WorldPos::tile`] so the two can never drift apart.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldPos {
    pub x: f32,
    pub y: f32,
}

impl WorldPos {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Tile containing this point (floor division by the tile size).
    #[inline]
    pub fn tile(self, tile_size: f32) -> Position {
        Position::new(
            (self.x / tile_size).floor() as i32,
            (self.y / tile_size).floor() as i32,
        )
    }

    pub fn distance(self, other: WorldPos) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Per-turn spendable pool (action points, movement points).
///
/// `current` only moves down during a turn; [`ResourcePool::refill`] is the
/// single way back up.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourcePool {
    pub current: u32,
    pub maximum: u32,
}

impl ResourcePool {
    pub const fn full(maximum: u32) -> Self {
        Self {
            current: maximum,
            maximum,
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.current == 0
    }

    /// Spends one point. Returns false (and spends nothing) when empty.
    #[inline]
    pub fn spend(&mut self) -> bool {
        if self.current == 0 {
            return false;
        }
        self.current -= 1;
        true
    }

    pub fn refill(&mut self) {
        self.current = self.maximum;
    }

    pub fn drain(&mut self) {
        self.current = 0;
    }
}
