//! Masked vector registers and the execution unit that drives them
//!
//! [`VecF32`] and [`VecI32`] are plain W-lane value types. All masked
//! operations live on [`VectorUnit`], which records every issued instruction
//! in its execution trace so utilization can be reported after a run.
//!
//! Lane semantics follow real predicated hardware:
//! - an operation writes only the destination lanes its ambient mask enables;
//!   inactive lanes keep whatever they held before (not zeroed),
//! - a masked load never dereferences memory for an inactive lane, so the
//!   final partial tile of an array can be loaded with a `first(k)` mask
//!   without reading past the end,
//! - a compare produces an inactive result bit for every lane that was
//!   inactive in the ambient mask.

use crate::trace::{ExecTrace, Opcode};

use super::mask::LaneMask;
use super::VECTOR_WIDTH;

// ================================================================================================
// Register value types
// ================================================================================================

/// W-lane single-precision float register.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct VecF32 {
    lanes: [f32; VECTOR_WIDTH],
}

impl VecF32 {
    /// Every lane set to `value`. Pure constructor, not a traced instruction.
    pub const fn splat(value: f32) -> Self {
        Self {
            lanes: [value; VECTOR_WIDTH],
        }
    }

    pub const fn from_array(lanes: [f32; VECTOR_WIDTH]) -> Self {
        Self { lanes }
    }

    pub fn lane(&self, i: usize) -> f32 {
        self.lanes[i]
    }

    pub fn to_array(self) -> [f32; VECTOR_WIDTH] {
        self.lanes
    }
}

/// W-lane 32-bit signed integer register.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VecI32 {
    lanes: [i32; VECTOR_WIDTH],
}

impl VecI32 {
    /// Every lane set to `value`. Pure constructor, not a traced instruction.
    pub const fn splat(value: i32) -> Self {
        Self {
            lanes: [value; VECTOR_WIDTH],
        }
    }

    pub const fn from_array(lanes: [i32; VECTOR_WIDTH]) -> Self {
        Self { lanes }
    }

    pub fn lane(&self, i: usize) -> i32 {
        self.lanes[i]
    }

    pub fn to_array(self) -> [i32; VECTOR_WIDTH] {
        self.lanes
    }
}

// ================================================================================================
// Vector unit
// ================================================================================================

/// Simulated masked vector execution unit.
///
/// Owns the execution trace for one run; create a fresh unit per kernel
/// invocation to keep accounting isolated. The unit is deliberately not
/// shared: one logical execution stream per unit (a multi-threaded extension
/// would need one unit per thread and a trace merge step).
#[derive(Debug, Default)]
pub struct VectorUnit {
    trace: ExecTrace,
}

impl VectorUnit {
    pub fn new() -> Self {
        Self::default()
    }

    /// Execution trace recorded so far.
    pub fn trace(&self) -> &ExecTrace {
        &self.trace
    }

    // ============================================================================================
    // Set / load / store
    // ============================================================================================

    /// Broadcast a scalar into the active lanes of `dst`.
    pub fn vset_f32(&mut self, dst: &mut VecF32, value: f32, mask: LaneMask) {
        self.trace.record(Opcode::VSetF32, mask);
        for lane in 0..VECTOR_WIDTH {
            if mask.lane(lane) {
                dst.lanes[lane] = value;
            }
        }
    }

    /// Broadcast a scalar into the active lanes of `dst`.
    pub fn vset_i32(&mut self, dst: &mut VecI32, value: i32, mask: LaneMask) {
        self.trace.record(Opcode::VSetI32, mask);
        for lane in 0..VECTOR_WIDTH {
            if mask.lane(lane) {
                dst.lanes[lane] = value;
            }
        }
    }

    /// Load `mem[i]` into lane `i` for every active lane.
    ///
    /// Memory is never indexed for an inactive lane, so `mem` only has to
    /// cover the active prefix of a tail mask.
    pub fn vload_f32(&mut self, dst: &mut VecF32, mem: &[f32], mask: LaneMask) {
        self.trace.record(Opcode::VLoadF32, mask);
        for lane in 0..VECTOR_WIDTH {
            if mask.lane(lane) {
                dst.lanes[lane] = mem[lane];
            }
        }
    }

    /// Load `mem[i]` into lane `i` for every active lane.
    pub fn vload_i32(&mut self, dst: &mut VecI32, mem: &[i32], mask: LaneMask) {
        self.trace.record(Opcode::VLoadI32, mask);
        for lane in 0..VECTOR_WIDTH {
            if mask.lane(lane) {
                dst.lanes[lane] = mem[lane];
            }
        }
    }

    /// Store lane `i` of `src` to `mem[i]` for every active lane.
    ///
    /// An active lane addressing memory past the live region is the
    /// out-of-bounds-write failure class: the unit performs the write and the
    /// verification harness detects it against the padding sentinels.
    pub fn vstore_f32(&mut self, mem: &mut [f32], src: VecF32, mask: LaneMask) {
        self.trace.record(Opcode::VStoreF32, mask);
        for lane in 0..VECTOR_WIDTH {
            if mask.lane(lane) {
                mem[lane] = src.lanes[lane];
            }
        }
    }

    /// Store lane `i` of `src` to `mem[i]` for every active lane.
    pub fn vstore_i32(&mut self, mem: &mut [i32], src: VecI32, mask: LaneMask) {
        self.trace.record(Opcode::VStoreI32, mask);
        for lane in 0..VECTOR_WIDTH {
            if mask.lane(lane) {
                mem[lane] = src.lanes[lane];
            }
        }
    }

    // ============================================================================================
    // Arithmetic
    // ============================================================================================
    //
    // Sources are taken by value (registers are Copy). To update a register
    // in place, copy it into a local first and pass the copy as the source;
    // the borrow checker rejects reading a register while it is mutably
    // borrowed as the destination.

    /// `dst = a + b` in the active lanes.
    pub fn vadd_f32(&mut self, dst: &mut VecF32, a: VecF32, b: VecF32, mask: LaneMask) {
        self.trace.record(Opcode::VAddF32, mask);
        for lane in 0..VECTOR_WIDTH {
            if mask.lane(lane) {
                dst.lanes[lane] = a.lanes[lane] + b.lanes[lane];
            }
        }
    }

    /// `dst = a - b` in the active lanes.
    pub fn vsub_f32(&mut self, dst: &mut VecF32, a: VecF32, b: VecF32, mask: LaneMask) {
        self.trace.record(Opcode::VSubF32, mask);
        for lane in 0..VECTOR_WIDTH {
            if mask.lane(lane) {
                dst.lanes[lane] = a.lanes[lane] - b.lanes[lane];
            }
        }
    }

    /// `dst = a * b` in the active lanes.
    pub fn vmult_f32(&mut self, dst: &mut VecF32, a: VecF32, b: VecF32, mask: LaneMask) {
        self.trace.record(Opcode::VMultF32, mask);
        for lane in 0..VECTOR_WIDTH {
            if mask.lane(lane) {
                dst.lanes[lane] = a.lanes[lane] * b.lanes[lane];
            }
        }
    }

    /// `dst = a + b` in the active lanes.
    pub fn vadd_i32(&mut self, dst: &mut VecI32, a: VecI32, b: VecI32, mask: LaneMask) {
        self.trace.record(Opcode::VAddI32, mask);
        for lane in 0..VECTOR_WIDTH {
            if mask.lane(lane) {
                dst.lanes[lane] = a.lanes[lane] + b.lanes[lane];
            }
        }
    }

    /// `dst = a - b` in the active lanes.
    pub fn vsub_i32(&mut self, dst: &mut VecI32, a: VecI32, b: VecI32, mask: LaneMask) {
        self.trace.record(Opcode::VSubI32, mask);
        for lane in 0..VECTOR_WIDTH {
            if mask.lane(lane) {
                dst.lanes[lane] = a.lanes[lane] - b.lanes[lane];
            }
        }
    }

    /// `dst = a * b` in the active lanes.
    pub fn vmult_i32(&mut self, dst: &mut VecI32, a: VecI32, b: VecI32, mask: LaneMask) {
        self.trace.record(Opcode::VMultI32, mask);
        for lane in 0..VECTOR_WIDTH {
            if mask.lane(lane) {
                dst.lanes[lane] = a.lanes[lane] * b.lanes[lane];
            }
        }
    }

    // ============================================================================================
    // Compare
    // ============================================================================================
    //
    // A lane inactive in the ambient mask always produces an inactive result
    // bit: comparisons never enable a lane that was not eligible.

    /// `a < b` per active lane.
    pub fn vlt_f32(&mut self, a: VecF32, b: VecF32, mask: LaneMask) -> LaneMask {
        self.trace.record(Opcode::VLtF32, mask);
        let mut result = [false; VECTOR_WIDTH];
        for lane in 0..VECTOR_WIDTH {
            result[lane] = mask.lane(lane) && a.lanes[lane] < b.lanes[lane];
        }
        LaneMask::from_lanes(result)
    }

    /// `a > b` per active lane.
    pub fn vgt_f32(&mut self, a: VecF32, b: VecF32, mask: LaneMask) -> LaneMask {
        self.trace.record(Opcode::VGtF32, mask);
        let mut result = [false; VECTOR_WIDTH];
        for lane in 0..VECTOR_WIDTH {
            result[lane] = mask.lane(lane) && a.lanes[lane] > b.lanes[lane];
        }
        LaneMask::from_lanes(result)
    }

    /// `a == b` per active lane.
    pub fn veq_f32(&mut self, a: VecF32, b: VecF32, mask: LaneMask) -> LaneMask {
        self.trace.record(Opcode::VEqF32, mask);
        let mut result = [false; VECTOR_WIDTH];
        for lane in 0..VECTOR_WIDTH {
            result[lane] = mask.lane(lane) && a.lanes[lane] == b.lanes[lane];
        }
        LaneMask::from_lanes(result)
    }

    /// `a < b` per active lane.
    pub fn vlt_i32(&mut self, a: VecI32, b: VecI32, mask: LaneMask) -> LaneMask {
        self.trace.record(Opcode::VLtI32, mask);
        let mut result = [false; VECTOR_WIDTH];
        for lane in 0..VECTOR_WIDTH {
            result[lane] = mask.lane(lane) && a.lanes[lane] < b.lanes[lane];
        }
        LaneMask::from_lanes(result)
    }

    /// `a > b` per active lane.
    pub fn vgt_i32(&mut self, a: VecI32, b: VecI32, mask: LaneMask) -> LaneMask {
        self.trace.record(Opcode::VGtI32, mask);
        let mut result = [false; VECTOR_WIDTH];
        for lane in 0..VECTOR_WIDTH {
            result[lane] = mask.lane(lane) && a.lanes[lane] > b.lanes[lane];
        }
        LaneMask::from_lanes(result)
    }

    /// `a == b` per active lane.
    pub fn veq_i32(&mut self, a: VecI32, b: VecI32, mask: LaneMask) -> LaneMask {
        self.trace.record(Opcode::VEqI32, mask);
        let mut result = [false; VECTOR_WIDTH];
        for lane in 0..VECTOR_WIDTH {
            result[lane] = mask.lane(lane) && a.lanes[lane] == b.lanes[lane];
        }
        LaneMask::from_lanes(result)
    }

    // ============================================================================================
    // Reduction to scalar control flow
    // ============================================================================================

    /// Number of active lanes in `mask`.
    ///
    /// The one point where vector state collapses into a scalar control-flow
    /// decision; a divergent loop terminates when this reaches zero.
    pub fn count_active(&mut self, mask: LaneMask) -> usize {
        self.trace.record(Opcode::CntBits, mask);
        mask.count_active()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vset_leaves_inactive_lanes() {
        let mut unit = VectorUnit::new();
        let mut reg = VecF32::splat(7.0);
        unit.vset_f32(&mut reg, 1.0, LaneMask::first(2));
        assert_eq!(reg.to_array(), [1.0, 1.0, 7.0, 7.0]);
    }

    #[test]
    fn test_vload_skips_inactive_lanes() {
        let mut unit = VectorUnit::new();
        let mut reg = VecF32::splat(-1.0);
        // Only two elements backing the tail tile: inactive lanes must not
        // index past the end.
        let mem = [10.0f32, 20.0];
        unit.vload_f32(&mut reg, &mem, LaneMask::first(2));
        assert_eq!(reg.to_array(), [10.0, 20.0, -1.0, -1.0]);
    }

    #[test]
    fn test_vstore_writes_only_active_lanes() {
        let mut unit = VectorUnit::new();
        let mut mem = [0.0f32; VECTOR_WIDTH];
        let src = VecF32::from_array([1.0, 2.0, 3.0, 4.0]);
        unit.vstore_f32(&mut mem, src, LaneMask::from_lanes([true, false, true, false]));
        assert_eq!(mem, [1.0, 0.0, 3.0, 0.0]);
    }

    #[test]
    fn test_arithmetic_masked() {
        let mut unit = VectorUnit::new();
        let a = VecI32::from_array([1, 2, 3, 4]);
        let b = VecI32::splat(10);
        let mut dst = VecI32::splat(0);
        unit.vadd_i32(&mut dst, a, b, LaneMask::first(3));
        assert_eq!(dst.to_array(), [11, 12, 13, 0]);
        let prev = dst;
        unit.vsub_i32(&mut dst, prev, b, LaneMask::first(1));
        assert_eq!(dst.to_array(), [1, 12, 13, 0]);
        unit.vmult_i32(&mut dst, a, a, LaneMask::all());
        assert_eq!(dst.to_array(), [1, 4, 9, 16]);
    }

    #[test]
    fn test_in_place_update_with_copied_source() {
        let mut unit = VectorUnit::new();
        let x = VecF32::splat(2.0);
        let mut result = VecF32::from_array([1.0, 2.0, 3.0, 4.0]);
        // Registers are Copy: snapshot the current value, then overwrite the
        // same register through the masked op.
        let partial = result;
        unit.vmult_f32(&mut result, partial, x, LaneMask::all());
        assert_eq!(result.to_array(), [2.0, 4.0, 6.0, 8.0]);
    }

    #[test]
    fn test_compare_respects_ambient_mask() {
        let mut unit = VectorUnit::new();
        let a = VecI32::from_array([5, 5, 5, 5]);
        let b = VecI32::splat(0);
        // All lanes satisfy a > b, but only the ambient-active lanes may set
        // a result bit.
        let gt = unit.vgt_i32(a, b, LaneMask::first(2));
        assert_eq!(gt, LaneMask::first(2));

        let eq = unit.veq_i32(a, a, LaneMask::from_lanes([false, true, false, true]));
        assert_eq!(eq, LaneMask::from_lanes([false, true, false, true]));
    }

    #[test]
    fn test_count_active_is_traced() {
        let mut unit = VectorUnit::new();
        assert_eq!(unit.count_active(LaneMask::first(3)), 3);
        assert_eq!(unit.count_active(LaneMask::first(0)), 0);
        let entries = unit.trace().entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].opcode, Opcode::CntBits);
        assert_eq!(entries[0].active_lanes(), 3);
        assert_eq!(entries[1].active_lanes(), 0);
    }
}
