//! Active-lane predicate masks

use std::fmt;
use std::ops::{BitAnd, Not};

use super::VECTOR_WIDTH;

/// Per-lane boolean predicate gating whether an operation affects a lane.
///
/// Always exactly [`VECTOR_WIDTH`] lanes. Value type: masks are created fresh
/// by constructors and combinators, never mutated in place.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LaneMask {
    lanes: [bool; VECTOR_WIDTH],
}

impl LaneMask {
    /// All lanes active.
    pub const fn all() -> Self {
        Self {
            lanes: [true; VECTOR_WIDTH],
        }
    }

    /// Lanes `[0, k)` active, the rest inactive.
    ///
    /// Gates the last, partial tile when the workload size is not a multiple
    /// of the vector width. `k` must not exceed [`VECTOR_WIDTH`].
    pub fn first(k: usize) -> Self {
        assert!(
            k <= VECTOR_WIDTH,
            "mask prefix {k} exceeds vector width {VECTOR_WIDTH}"
        );
        let mut lanes = [false; VECTOR_WIDTH];
        for lane in lanes.iter_mut().take(k) {
            *lane = true;
        }
        Self { lanes }
    }

    /// Build a mask from explicit per-lane bits.
    pub const fn from_lanes(lanes: [bool; VECTOR_WIDTH]) -> Self {
        Self { lanes }
    }

    /// Whether lane `i` is active.
    pub fn lane(&self, i: usize) -> bool {
        self.lanes[i]
    }

    /// Number of active lanes.
    pub fn count_active(&self) -> usize {
        self.lanes.iter().filter(|&&active| active).count()
    }
}

impl Not for LaneMask {
    type Output = LaneMask;

    fn not(self) -> LaneMask {
        let mut lanes = [false; VECTOR_WIDTH];
        for (out, active) in lanes.iter_mut().zip(self.lanes) {
            *out = !active;
        }
        LaneMask { lanes }
    }
}

impl BitAnd for LaneMask {
    type Output = LaneMask;

    fn bitand(self, rhs: LaneMask) -> LaneMask {
        let mut lanes = [false; VECTOR_WIDTH];
        for (out, (a, b)) in lanes.iter_mut().zip(self.lanes.iter().zip(rhs.lanes)) {
            *out = *a && b;
        }
        LaneMask { lanes }
    }
}

impl fmt::Display for LaneMask {
    /// `*` for an active lane, `.` for an inactive one, e.g. `[**..]`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for active in self.lanes {
            write!(f, "{}", if active { '*' } else { '.' })?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_ones() {
        assert_eq!(LaneMask::all().count_active(), VECTOR_WIDTH);
    }

    #[test]
    fn test_first_k() {
        for k in 0..=VECTOR_WIDTH {
            let mask = LaneMask::first(k);
            assert_eq!(mask.count_active(), k);
            for lane in 0..VECTOR_WIDTH {
                assert_eq!(mask.lane(lane), lane < k);
            }
        }
    }

    #[test]
    #[should_panic(expected = "exceeds vector width")]
    fn test_first_k_out_of_range() {
        let _ = LaneMask::first(VECTOR_WIDTH + 1);
    }

    #[test]
    fn test_complement_is_disjoint() {
        let mask = LaneMask::from_lanes([true, false, true, false]);
        assert_eq!((mask & !mask).count_active(), 0);
        assert_eq!(mask.count_active() + (!mask).count_active(), VECTOR_WIDTH);
    }

    #[test]
    fn test_and_intersects() {
        let a = LaneMask::first(3);
        let b = LaneMask::from_lanes([false, true, true, true]);
        let both = a & b;
        assert_eq!(both, LaneMask::from_lanes([false, true, true, false]));
    }

    #[test]
    fn test_display() {
        assert_eq!(LaneMask::first(2).to_string(), "[**..]");
    }
}
