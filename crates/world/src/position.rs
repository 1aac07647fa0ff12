use std::fmt;
use std::ops::{Add, Div, Neg, Sub};

use serde::{Deserialize, Serialize};

/// Number of blocks along each horizontal axis of a chunk.
pub const CHUNK_SIZE: i32 = 16;

/// Horizontal integer position `(x, z)`, used for world and chunk addressing.
///
/// Arithmetic wraps on `i32` overflow instead of panicking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Vector2Int {
    pub x: i32,
    pub z: i32,
}

impl Vector2Int {
    pub const ZERO: Vector2Int = Vector2Int::new(0, 0);
    pub const ONE: Vector2Int = Vector2Int::new(1, 1);
    /// Unit step along +X.
    pub const AXIS_X: Vector2Int = Vector2Int::new(1, 0);
    /// Unit step along +Z.
    pub const AXIS_Z: Vector2Int = Vector2Int::new(0, 1);

    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    pub fn min(self, other: Self) -> Self {
        Self::new(self.x.min(other.x), self.z.min(other.z))
    }

    pub fn max(self, other: Self) -> Self {
        Self::new(self.x.max(other.x), self.z.max(other.z))
    }

    /// Sum of absolute per-axis differences. Wraps when the distance does
    /// not fit in an `i32`.
    pub fn manhattan(self, other: Self) -> i32 {
        self.x.abs_diff(other.x).wrapping_add(self.z.abs_diff(other.z)) as i32
    }

    /// The chunk containing this world position, as the server computes it.
    ///
    /// Division truncates toward zero, so `-1` maps to chunk `0` rather than
    /// `-1`. Callers that want floor semantics for negative coordinates must
    /// use `div_euclid` themselves.
    pub const fn to_chunk(self) -> Self {
        Self::new(self.x / CHUNK_SIZE, self.z / CHUNK_SIZE)
    }
}

impl Add for Vector2Int {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x.wrapping_add(rhs.x), self.z.wrapping_add(rhs.z))
    }
}

impl Sub for Vector2Int {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x.wrapping_sub(rhs.x), self.z.wrapping_sub(rhs.z))
    }
}

impl Neg for Vector2Int {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(self.x.wrapping_neg(), self.z.wrapping_neg())
    }
}

/// Truncating scalar division, componentwise. Panics when `rhs` is zero.
impl Div<i32> for Vector2Int {
    type Output = Self;

    fn div(self, rhs: i32) -> Self {
        Self::new(self.x.wrapping_div(rhs), self.z.wrapping_div(rhs))
    }
}

impl fmt::Display for Vector2Int {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.z)
    }
}

/// A 3D block offset. Used both for the position of an edit relative to the
/// request origin and for the origin itself. Arithmetic wraps like
/// [`Vector2Int`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct BlockOffset {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockOffset {
    pub const ORIGIN: BlockOffset = BlockOffset::new(0, 0, 0);

    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Horizontal projection.
    pub const fn horizontal(&self) -> Vector2Int {
        Vector2Int::new(self.x, self.z)
    }
}

impl Add for BlockOffset {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(
            self.x.wrapping_add(rhs.x),
            self.y.wrapping_add(rhs.y),
            self.z.wrapping_add(rhs.z),
        )
    }
}

impl Sub for BlockOffset {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(
            self.x.wrapping_sub(rhs.x),
            self.y.wrapping_sub(rhs.y),
            self.z.wrapping_sub(rhs.z),
        )
    }
}
