//! Axial hex coordinates for flat-topped hexagons.
//!
//! A hex is addressed by `(q, r)`; the third cube coordinate `s = -q - r` is
//! always derived. World conversion assumes a unit hex size (corner radius
//! `1.0`); callers scale the result.

use std::fmt;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

use bevy::prelude::*;
use hexx::Hex;

/// `√3`, used by the flat-topped projection.
const SQRT_3: f32 = 1.732_050_8;

/// Integer axial coordinate of a flat-topped hexagon.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Reflect)]
pub struct HexCoord {
    /// Column.
    pub q: i32,
    /// Diagonal row.
    pub r: i32,
}

impl HexCoord {
    /// The origin hex.
    pub const ZERO: Self = Self::new(0, 0);

    /// Offsets to the six edge-adjacent hexes.
    ///
    /// The order is the walking order used by [`HexCoord::ring`].
    pub const NEIGHBORS: [Self; 6] = [
        Self::new(1, 0),
        Self::new(1, -1),
        Self::new(0, -1),
        Self::new(-1, 0),
        Self::new(-1, 1),
        Self::new(0, 1),
    ];

    /// Offsets to the six corner-adjacent hexes at distance 2.
    pub const DIAGONALS: [Self; 6] = [
        Self::new(2, -1),
        Self::new(1, -2),
        Self::new(-1, -1),
        Self::new(-2, 1),
        Self::new(-1, 2),
        Self::new(1, 1),
    ];

    /// Creates a coordinate from its axial components.
    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    /// The implicit third cube coordinate.
    pub const fn s(self) -> i32 {
        -self.q - self.r
    }

    /// Hex-grid distance: the largest absolute difference over `q`, `r` and `s`.
    pub fn distance_to(self, other: Self) -> i32 {
        (self.q - other.q)
            .abs()
            .max((self.r - other.r).abs())
            .max((self.s() - other.s()).abs())
    }

    /// The neighbor in direction `index` (taken modulo 6).
    pub fn neighbor(self, index: usize) -> Self {
        self + Self::NEIGHBORS[index % 6]
    }

    /// All six edge neighbors, in [`HexCoord::NEIGHBORS`] order.
    pub fn all_neighbors(self) -> [Self; 6] {
        Self::NEIGHBORS.map(|offset| self + offset)
    }

    /// All six diagonal neighbors, in [`HexCoord::DIAGONALS`] order.
    pub fn all_diagonals(self) -> [Self; 6] {
        Self::DIAGONALS.map(|offset| self + offset)
    }

    /// Every hex within `distance` of `self`, center included.
    ///
    /// Iterates `q` in `[-distance, distance]` and, for each `q`, the valid
    /// `r` range in ascending order. Yields `3n² + 3n + 1` coordinates for
    /// `n >= 0` and nothing for negative `n`.
    pub fn within_range(self, distance: i32) -> impl Iterator<Item = Self> {
        (-distance..=distance).flat_map(move |q| {
            let r1 = (-distance).max(-q - distance);
            let r2 = distance.min(-q + distance);
            (r1..=r2).map(move |r| self + Self::new(q, r))
        })
    }

    /// Appends [`HexCoord::within_range`] to `out`, reusing its allocation.
    pub fn within_range_into(self, distance: i32, out: &mut Vec<Self>) {
        out.extend(self.within_range(distance));
    }

    /// The hexes at exactly `radius` from `self`.
    ///
    /// Starts at `self + NEIGHBORS[4] * radius` and walks `radius` steps along
    /// each direction of [`HexCoord::NEIGHBORS`] in order, so the walk closes
    /// on itself without repeating the start.
    pub fn ring(self, radius: i32) -> Ring {
        let remaining = match radius {
            r if r < 0 => 0,
            0 => 1,
            r => 6 * r as usize,
        };
        let current = if radius > 0 {
            self + Self::NEIGHBORS[4] * radius
        } else {
            self
        };
        Ring {
            current,
            radius,
            direction: 0,
            step: 0,
            remaining,
        }
    }

    /// Rounds a fractional axial coordinate to the nearest hex.
    ///
    /// All three cube components are rounded, then the one with the largest
    /// rounding error is rebuilt from the other two so `q + r + s == 0`.
    pub fn round(frac: Vec2) -> Self {
        let (q, r) = (frac.x, frac.y);
        let s = -q - r;

        let mut qi = q.round_ties_even();
        let mut ri = r.round_ties_even();
        let si = s.round_ties_even();

        let q_diff = (qi - q).abs();
        let r_diff = (ri - r).abs();
        let s_diff = (si - s).abs();

        if q_diff > r_diff && q_diff > s_diff {
            qi = -ri - si;
        } else if r_diff > s_diff {
            ri = -qi - si;
        }

        Self::new(qi as i32, ri as i32)
    }

    /// The hex containing a unit-scale world position (inverse of [`HexCoord::to_world`]).
    pub fn from_world(point: Vec2) -> Self {
        let q = 2.0 / 3.0 * point.x;
        let r = -1.0 / 3.0 * point.x + SQRT_3 / 3.0 * point.y;
        Self::round(Vec2::new(q, r))
    }

    /// Unit-scale world position of the hex center.
    pub fn to_world(self) -> Vec2 {
        let q = self.q as f32;
        let r = self.r as f32;
        Vec2::new(1.5 * q, SQRT_3 / 2.0 * q + SQRT_3 * r)
    }
}

/// Iterator returned by [`HexCoord::ring`].
#[derive(Debug, Clone)]
pub struct Ring {
    current: HexCoord,
    radius: i32,
    direction: usize,
    step: i32,
    remaining: usize,
}

impl Iterator for Ring {
    type Item = HexCoord;

    fn next(&mut self) -> Option<HexCoord> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let hex = self.current;
        if self.radius > 0 {
            self.current += HexCoord::NEIGHBORS[self.direction];
            self.step += 1;
            if self.step == self.radius {
                self.step = 0;
                self.direction += 1;
            }
        }
        Some(hex)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Ring {}

// ── Arithmetic ─────────────────────────────────────────────────────

impl Add for HexCoord {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.q + rhs.q, self.r + rhs.r)
    }
}

impl AddAssign for HexCoord {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for HexCoord {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.q - rhs.q, self.r - rhs.r)
    }
}

impl SubAssign for HexCoord {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Neg for HexCoord {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.q, -self.r)
    }
}

impl Mul<i32> for HexCoord {
    type Output = Self;

    fn mul(self, k: i32) -> Self {
        Self::new(self.q * k, self.r * k)
    }
}

impl Mul<HexCoord> for i32 {
    type Output = HexCoord;

    fn mul(self, hex: HexCoord) -> HexCoord {
        hex * self
    }
}

/// Component-wise integer division, truncating toward zero.
///
/// Not distance-preserving: `(q / k) + (r / k)` need not equal `s / k`
/// negated, so the result is only a coarse bucket.
///
/// # Panics
///
/// Panics when `k == 0`, like integer division.
impl Div<i32> for HexCoord {
    type Output = Self;

    fn div(self, k: i32) -> Self {
        Self::new(self.q / k, self.r / k)
    }
}

impl fmt::Display for HexCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.q, self.r)
    }
}

// ── Conversions ────────────────────────────────────────────────────

impl From<IVec2> for HexCoord {
    fn from(v: IVec2) -> Self {
        Self::new(v.x, v.y)
    }
}

impl From<HexCoord> for IVec2 {
    fn from(hex: HexCoord) -> Self {
        IVec2::new(hex.q, hex.r)
    }
}

impl From<Hex> for HexCoord {
    fn from(hex: Hex) -> Self {
        Self::new(hex.x, hex.y)
    }
}

impl From<HexCoord> for Hex {
    fn from(hex: HexCoord) -> Self {
        Hex::new(hex.q, hex.r)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use hexx::shapes;

    fn sample_coords() -> Vec<HexCoord> {
        HexCoord::new(3, -2).within_range(4).collect()
    }

    // ── distance ───────────────────────────────────────────────────

    #[test]
    fn distance_to_self_is_zero() {
        for a in sample_coords() {
            assert_eq!(a.distance_to(a), 0);
        }
    }

    #[test]
    fn distance_is_symmetric() {
        let coords = sample_coords();
        for &a in &coords {
            for &b in &coords {
                assert_eq!(a.distance_to(b), b.distance_to(a), "{a} vs {b}");
            }
        }
    }

    #[test]
    fn distance_is_zero_only_for_equal_coords() {
        let coords = sample_coords();
        for &a in &coords {
            for &b in &coords {
                assert_eq!(a.distance_to(b) == 0, a == b);
            }
        }
    }

    #[test]
    fn distance_satisfies_triangle_inequality() {
        let coords: Vec<HexCoord> = HexCoord::ZERO.within_range(2).collect();
        for &a in &coords {
            for &b in &coords {
                for &c in &coords {
                    assert!(a.distance_to(c) <= a.distance_to(b) + b.distance_to(c));
                }
            }
        }
    }

    #[test]
    fn distance_matches_hexx() {
        let coords = sample_coords();
        for &a in &coords {
            for &b in &coords {
                assert_eq!(a.distance_to(b), Hex::from(a).distance_to(Hex::from(b)));
            }
        }
    }

    #[test]
    fn neighbors_are_at_distance_one_and_diagonals_at_two() {
        let c = HexCoord::new(-4, 9);
        for n in c.all_neighbors() {
            assert_eq!(c.distance_to(n), 1);
        }
        for d in c.all_diagonals() {
            assert_eq!(c.distance_to(d), 2);
        }
    }

    #[test]
    fn neighbor_index_wraps() {
        let c = HexCoord::new(1, 1);
        assert_eq!(c.neighbor(6), c.neighbor(0));
        assert_eq!(c.neighbor(4), HexCoord::new(0, 2));
    }

    // ── within_range ───────────────────────────────────────────────

    #[test]
    fn within_range_count_is_centered_hexagonal_number() {
        for n in 0..8 {
            let count = HexCoord::new(2, 5).within_range(n).count();
            assert_eq!(count as i32, 3 * n * n + 3 * n + 1, "n = {n}");
        }
    }

    #[test]
    fn within_range_negative_is_empty() {
        assert_eq!(HexCoord::ZERO.within_range(-1).count(), 0);
    }

    #[test]
    fn within_range_contains_center_once() {
        let c = HexCoord::new(-3, 1);
        let hits = c.within_range(3).filter(|&h| h == c).count();
        assert_eq!(hits, 1);
    }

    #[test]
    fn within_range_order_is_q_outer_r_inner() {
        let got: Vec<HexCoord> = HexCoord::ZERO.within_range(1).collect();
        let expected = [
            HexCoord::new(-1, 0),
            HexCoord::new(-1, 1),
            HexCoord::new(0, -1),
            HexCoord::new(0, 0),
            HexCoord::new(0, 1),
            HexCoord::new(1, -1),
            HexCoord::new(1, 0),
        ];
        assert_eq!(got, expected);
    }

    #[test]
    fn within_range_equals_union_of_rings() {
        let c = HexCoord::new(5, -5);
        let range: HashSet<HexCoord> = c.within_range(4).collect();
        let rings: HashSet<HexCoord> = (0..=4).flat_map(|k| c.ring(k)).collect();
        assert_eq!(range, rings);
    }

    #[test]
    fn within_range_matches_hexx_hexagon() {
        let range: HashSet<HexCoord> = HexCoord::new(1, 2).within_range(5).collect();
        let hexagon: HashSet<HexCoord> = shapes::hexagon(Hex::new(1, 2), 5)
            .map(HexCoord::from)
            .collect();
        assert_eq!(range, hexagon);
    }

    #[test]
    fn within_range_into_appends() {
        let mut out = vec![HexCoord::new(100, 100)];
        HexCoord::ZERO.within_range_into(1, &mut out);
        assert_eq!(out.len(), 8);
        assert_eq!(out[0], HexCoord::new(100, 100));
    }

    // ── ring ───────────────────────────────────────────────────────

    #[test]
    fn ring_zero_is_center() {
        let c = HexCoord::new(7, -1);
        assert_eq!(c.ring(0).collect::<Vec<_>>(), vec![c]);
    }

    #[test]
    fn ring_negative_is_empty() {
        assert_eq!(HexCoord::ZERO.ring(-2).count(), 0);
    }

    #[test]
    fn ring_has_six_k_members_at_distance_k() {
        let c = HexCoord::new(-2, 3);
        for k in 1..7 {
            let ring: Vec<HexCoord> = c.ring(k).collect();
            assert_eq!(ring.len() as i32, 6 * k);
            assert_eq!(c.ring(k).len() as i32, 6 * k);
            for h in &ring {
                assert_eq!(c.distance_to(*h), k, "{h} in ring {k}");
            }
            let unique: HashSet<HexCoord> = ring.iter().copied().collect();
            assert_eq!(unique.len(), ring.len(), "ring {k} repeats a coordinate");
        }
    }

    #[test]
    fn ring_starts_at_fourth_neighbor_and_closes() {
        let c = HexCoord::new(4, 4);
        let ring: Vec<HexCoord> = c.ring(3).collect();
        assert_eq!(ring[0], c + HexCoord::NEIGHBORS[4] * 3);
        for pair in ring.windows(2) {
            assert_eq!(pair[0].distance_to(pair[1]), 1);
        }
        assert_eq!(ring[ring.len() - 1].distance_to(ring[0]), 1);
    }

    #[test]
    fn ring_one_order() {
        let ring: Vec<HexCoord> = HexCoord::ZERO.ring(1).collect();
        let expected = [
            HexCoord::new(-1, 1),
            HexCoord::new(0, 1),
            HexCoord::new(1, 0),
            HexCoord::new(1, -1),
            HexCoord::new(0, -1),
            HexCoord::new(-1, 0),
        ];
        assert_eq!(ring, expected);
    }

    // ── round / world conversion ───────────────────────────────────

    #[test]
    fn round_integral_input_is_identity() {
        assert_eq!(HexCoord::round(Vec2::new(3.0, -7.0)), HexCoord::new(3, -7));
    }

    #[test]
    fn round_snaps_to_nearest_hex() {
        assert_eq!(HexCoord::round(Vec2::new(0.1, 0.2)), HexCoord::ZERO);
        assert_eq!(HexCoord::round(Vec2::new(0.9, -0.1)), HexCoord::new(1, 0));
        assert_eq!(HexCoord::round(Vec2::new(-1.2, 2.1)), HexCoord::new(-1, 2));
    }

    #[test]
    fn round_corrects_largest_error_component() {
        // (0.6, 0.3, -0.9) rounds to (1, 0, -1); q has the largest error and
        // is rebuilt from r and s.
        assert_eq!(HexCoord::round(Vec2::new(0.6, 0.3)), HexCoord::new(1, 0));
        // (0.6, 0.6, -1.2) rounds to (1, 1, -1); q and r tie, r is rebuilt.
        assert_eq!(HexCoord::round(Vec2::new(0.6, 0.6)), HexCoord::new(1, 0));
        // (0.7, -0.2, -0.5) rounds to (1, 0, 0); s is largest and dropped.
        assert_eq!(HexCoord::round(Vec2::new(0.7, -0.2)), HexCoord::new(1, 0));
    }

    #[test]
    fn round_breaks_exact_halves_toward_even() {
        // Half-away-from-zero would give (1, 0).
        assert_eq!(HexCoord::round(Vec2::new(0.5, 0.0)), HexCoord::ZERO);
        assert_eq!(HexCoord::round(Vec2::new(1.5, -1.5)), HexCoord::new(2, -2));
        // Half-away-from-zero would give (-1, 1).
        assert_eq!(HexCoord::round(Vec2::new(-0.5, 0.5)), HexCoord::ZERO);
        // Half-away-from-zero would give (3, -3).
        assert_eq!(HexCoord::round(Vec2::new(2.5, -2.5)), HexCoord::new(2, -2));
    }

    #[test]
    fn to_world_uses_flat_topped_projection() {
        let w = HexCoord::new(2, 1).to_world();
        assert!((w.x - 3.0).abs() < 1e-6);
        assert!((w.y - 2.0 * SQRT_3).abs() < 1e-5);
        assert_eq!(HexCoord::ZERO.to_world(), Vec2::ZERO);
    }

    #[test]
    fn neighbor_centers_are_sqrt3_apart() {
        let c = HexCoord::new(-3, 8);
        for n in c.all_neighbors() {
            let d = c.to_world().distance(n.to_world());
            assert!((d - SQRT_3).abs() < 1e-4, "{n}: {d}");
        }
    }

    #[test]
    fn world_roundtrip_is_exact() {
        for hex in HexCoord::ZERO.within_range(40) {
            assert_eq!(HexCoord::from_world(hex.to_world()), hex, "roundtrip {hex}");
        }
        for hex in [HexCoord::new(191, -160), HexCoord::new(-160, 191)] {
            assert_eq!(HexCoord::from_world(hex.to_world()), hex, "roundtrip {hex}");
        }
    }

    #[test]
    fn from_world_near_center_stays_in_hex() {
        let hex = HexCoord::new(2, -1);
        let center = hex.to_world();
        for offset in [Vec2::new(0.3, 0.0), Vec2::new(0.0, -0.4), Vec2::new(-0.2, 0.3)] {
            assert_eq!(HexCoord::from_world(center + offset), hex);
        }
    }

    // ── arithmetic ─────────────────────────────────────────────────

    #[test]
    fn add_sub_mul_are_component_wise() {
        let a = HexCoord::new(3, -5);
        let b = HexCoord::new(-1, 2);
        assert_eq!(a + b, HexCoord::new(2, -3));
        assert_eq!(a - b, HexCoord::new(4, -7));
        assert_eq!(a * 3, HexCoord::new(9, -15));
        assert_eq!(3 * a, a * 3);
        assert_eq!(-a, HexCoord::new(-3, 5));
    }

    #[test]
    fn division_truncates_toward_zero() {
        assert_eq!(HexCoord::new(7, -3) / 2, HexCoord::new(3, -1));
        assert_eq!(HexCoord::new(-7, 3) / 2, HexCoord::new(-3, 1));
        assert_eq!(HexCoord::new(5, 5) / -2, HexCoord::new(-2, -2));
    }

    #[test]
    fn division_does_not_preserve_cube_invariant_scaling() {
        // s = -2 for (1, 1); s / 2 would be -1, but the result's s is 0.
        let halved = HexCoord::new(1, 1) / 2;
        assert_eq!(halved, HexCoord::ZERO);
        assert_ne!(halved.s(), HexCoord::new(1, 1).s() / 2);
    }

    #[test]
    #[should_panic]
    fn division_by_zero_panics() {
        let _ = HexCoord::new(1, 1) / 0;
    }

    #[test]
    fn cube_coordinates_sum_to_zero() {
        for h in sample_coords() {
            assert_eq!(h.q + h.r + h.s(), 0);
        }
    }

    #[test]
    fn display_and_conversions() {
        let h = HexCoord::new(-2, 9);
        assert_eq!(h.to_string(), "(-2,9)");
        assert_eq!(HexCoord::from(IVec2::from(h)), h);
        assert_eq!(HexCoord::from(Hex::from(h)), h);
    }
}
