// Hex grid coordinate math.
//
// Axial `(q, r)` is the canonical address of a hex cell. Cube `(x, y, z)`
// with `x + y + z == 0` is an intermediate used for distance and for linear
// interpolation in `line`. Conversion is `x = q, z = r, y = -q - r`.
//
// Everything here is a pure function over integers (the only float use is
// the interpolation inside `line`, which is rounded straight back). There is
// no state and no error path.
//
// Domain: every `i32` axial coordinate is valid. Cube components are `i64`,
// so conversion and `distance` are exact over the full `i32` range (the
// largest distance, 2^33 - 2, fits in the `u64` result). `Axial` arithmetic
// (`+`, `-`, scaling, negation, and therefore `neighbors` and `ring`) wraps
// at the `i32` limits instead of panicking; results are only geometrically
// meaningful while they stay inside that range.
//
// This crate is the leaf of the workspace: `hydraulik_sim` re-exports it as
// `hydraulik_sim::hex` and builds pathfinding on `neighbors` + `distance`.
//
// **Critical constraint: direction order.** `DIRECTIONS` is walked in index
// order by both `neighbors` and `ring`. Reordering it changes ring winding
// and A* tie-breaking, so it must never change.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

// ---------------------------------------------------------------------------
// Axial coordinates
// ---------------------------------------------------------------------------

/// A hex cell address in axial coordinates. Arithmetic wraps at `i32` limits.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Axial {
    pub q: i32,
    pub r: i32,
}

impl Axial {
    pub const ZERO: Self = Self::new(0, 0);

    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    pub fn to_cube(self) -> Cube {
        axial_to_cube(self)
    }

    /// The adjacent cell in the given direction.
    pub fn neighbor(self, dir: HexDirection) -> Self {
        self + dir.offset()
    }

    pub fn neighbors(self) -> [Self; 6] {
        neighbors(self)
    }

    pub fn distance(self, other: Self) -> u64 {
        distance(self, other)
    }

    pub fn line_to(self, other: Self) -> Vec<Self> {
        line(self, other)
    }

    pub fn ring(self, radius: u32) -> Vec<Self> {
        ring(self, radius)
    }

    pub fn spiral(self, radius: u32) -> Vec<Self> {
        spiral(self, radius)
    }
}

impl Add for Axial {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.q.wrapping_add(rhs.q), self.r.wrapping_add(rhs.r))
    }
}

impl Sub for Axial {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.q.wrapping_sub(rhs.q), self.r.wrapping_sub(rhs.r))
    }
}

impl Mul<i32> for Axial {
    type Output = Self;

    fn mul(self, k: i32) -> Self {
        Self::new(self.q.wrapping_mul(k), self.r.wrapping_mul(k))
    }
}

impl Neg for Axial {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(self.q.wrapping_neg(), self.r.wrapping_neg())
    }
}

impl fmt::Display for Axial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.q, self.r)
    }
}

// ---------------------------------------------------------------------------
// Cube coordinates
// ---------------------------------------------------------------------------

/// A hex cell address in cube coordinates.
///
/// Fields are private: every constructor keeps `x + y + z == 0`.
/// Components are `i64` so a cube built from any `i32` axial is exact.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Cube {
    x: i64,
    y: i64,
    z: i64,
}

impl Cube {
    /// Build a cube coordinate from the two independent components. `y` is
    /// derived.
    pub const fn from_xz(x: i32, z: i32) -> Self {
        Self::from_xz_wide(x as i64, z as i64)
    }

    // Exact for anything widened from i32; wraps only for inputs far
    // outside that (e.g. saturated rounding of infinite floats).
    const fn from_xz_wide(x: i64, z: i64) -> Self {
        Self {
            x,
            y: x.wrapping_add(z).wrapping_neg(),
            z,
        }
    }

    pub const fn x(&self) -> i64 {
        self.x
    }

    pub const fn y(&self) -> i64 {
        self.y
    }

    pub const fn z(&self) -> i64 {
        self.z
    }

    /// Round a fractional cube position to the nearest cell.
    ///
    /// Each component is rounded independently, then the component with the
    /// largest rounding error is re-derived from the other two so the result
    /// still sums to zero.
    pub fn round(fx: f64, fy: f64, fz: f64) -> Self {
        let rx = fx.round();
        let ry = fy.round();
        let rz = fz.round();

        let dx = (rx - fx).abs();
        let dy = (ry - fy).abs();
        let dz = (rz - fz).abs();

        // Float-to-int casts saturate, so out-of-range input cannot panic.
        // `from_xz_wide` always derives y from the two it is given.
        let (x, y, z) = (rx as i64, ry as i64, rz as i64);
        if dx > dy && dx > dz {
            Self::from_xz_wide(y.wrapping_add(z).wrapping_neg(), z)
        } else if dy > dz {
            Self::from_xz_wide(x, z)
        } else {
            Self::from_xz_wide(x, x.wrapping_add(y).wrapping_neg())
        }
    }
}

/// Axial to cube: `x = q, z = r, y = -x - z`.
pub const fn axial_to_cube(a: Axial) -> Cube {
    Cube::from_xz(a.q, a.r)
}

/// Cube to axial: `q = x, r = z`.
///
/// Exact for every cube produced by `axial_to_cube` or by `line` between
/// two axial cells. Components outside `i32` (only reachable through
/// `Cube::round` on far out-of-range floats) are truncated.
pub const fn cube_to_axial(c: Cube) -> Axial {
    Axial::new(c.x as i32, c.z as i32)
}

// ---------------------------------------------------------------------------
// Directions
// ---------------------------------------------------------------------------

/// The six axial offsets that define adjacency, in their fixed order.
pub const DIRECTIONS: [Axial; 6] = [
    Axial::new(1, 0),
    Axial::new(1, -1),
    Axial::new(0, -1),
    Axial::new(-1, 0),
    Axial::new(-1, 1),
    Axial::new(0, 1),
];

/// Named form of `DIRECTIONS`. Discriminants match the array index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HexDirection {
    East = 0,
    NorthEast = 1,
    NorthWest = 2,
    West = 3,
    SouthWest = 4,
    SouthEast = 5,
}

impl HexDirection {
    pub const ALL: [Self; 6] = [
        Self::East,
        Self::NorthEast,
        Self::NorthWest,
        Self::West,
        Self::SouthWest,
        Self::SouthEast,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn offset(self) -> Axial {
        DIRECTIONS[self.index()]
    }

    pub const fn opposite(self) -> Self {
        Self::ALL[(self.index() + 3) % 6]
    }
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// The six adjacent cells, in `DIRECTIONS` order.
pub fn neighbors(a: Axial) -> [Axial; 6] {
    DIRECTIONS.map(|d| a + d)
}

/// Hex distance: the largest absolute component difference in cube space.
///
/// Computed in `i64`, so it is exact for every pair of `i32` coordinates.
pub fn distance(a: Axial, b: Axial) -> u64 {
    let ac = axial_to_cube(a);
    let bc = axial_to_cube(b);
    (ac.x - bc.x)
        .unsigned_abs()
        .max((ac.y - bc.y).unsigned_abs())
        .max((ac.z - bc.z).unsigned_abs())
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Cells on the straight line from `a` to `b`, both inclusive.
///
/// Samples `N + 1` evenly spaced points where `N = max(1, distance(a, b))`,
/// so `line(a, a)` is `[a, a]`.
pub fn line(a: Axial, b: Axial) -> Vec<Axial> {
    let n = distance(a, b).max(1);
    let ac = axial_to_cube(a);
    let bc = axial_to_cube(b);

    (0..=n)
        .map(|i| {
            // Components and step counts stay below 2^34, exact in f64.
            let t = i as f64 / n as f64;
            let cube = Cube::round(
                lerp(ac.x as f64, bc.x as f64, t),
                lerp(ac.y as f64, bc.y as f64, t),
                lerp(ac.z as f64, bc.z as f64, t),
            );
            cube_to_axial(cube)
        })
        .collect()
}

/// All cells at exactly `radius` from `center`.
///
/// Starts `radius` steps from `center` along `DIRECTIONS[4]` and walks each
/// direction in order for `radius` steps, giving a consistent winding.
/// Returns `6 * radius` cells, so very large radii are bounded by memory,
/// not by arithmetic.
pub fn ring(center: Axial, radius: u32) -> Vec<Axial> {
    if radius == 0 {
        return vec![center];
    }
    let mut results = Vec::with_capacity(6 * radius as usize);
    // DIRECTIONS[4] is (-1, 1); step by the unsigned radius so radii above
    // i32::MAX do not flip sign.
    let mut cell = Axial::new(
        center.q.wrapping_sub_unsigned(radius),
        center.r.wrapping_add_unsigned(radius),
    );
    for dir in DIRECTIONS {
        for _ in 0..radius {
            results.push(cell);
            cell = cell + dir;
        }
    }
    results
}

/// Every cell within `radius` of `center`: ring 0, ring 1, ... ring `radius`.
pub fn spiral(center: Axial, radius: u32) -> Vec<Axial> {
    let r = radius as usize;
    let cells = r.saturating_mul(r + 1).saturating_mul(3).saturating_add(1);
    let mut results = Vec::with_capacity(cells);
    for k in 0..=radius {
        results.extend(ring(center, k));
    }
    results
}
