//! Execution trace and utilization accounting
//!
//! Every masked instruction the [`VectorUnit`](crate::isa::VectorUnit) issues
//! is recorded here as an `(opcode, mask)` pair. After a run the trace is
//! aggregated into a [`TraceSummary`]: lane slots issued versus lanes
//! actually active, i.e. how well the kernel kept the vector unit busy in the
//! presence of branch divergence and masked tails.
//!
//! Mask combinators (`!`, `&`) model predicate-register algebra, not issued
//! instructions, and never reach the trace — only real operations count
//! toward the utilization denominator.

use std::collections::BTreeMap;
use std::fmt;

use crate::isa::{LaneMask, VECTOR_WIDTH};

/// Mnemonic of a simulated vector instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Opcode {
    VSetF32,
    VSetI32,
    VLoadF32,
    VLoadI32,
    VStoreF32,
    VStoreI32,
    VAddF32,
    VAddI32,
    VSubF32,
    VSubI32,
    VMultF32,
    VMultI32,
    VLtF32,
    VLtI32,
    VGtF32,
    VGtI32,
    VEqF32,
    VEqI32,
    CntBits,
}

impl Opcode {
    pub fn mnemonic(&self) -> &'static str {
        match self {
            Opcode::VSetF32 => "vset_f32",
            Opcode::VSetI32 => "vset_i32",
            Opcode::VLoadF32 => "vload_f32",
            Opcode::VLoadI32 => "vload_i32",
            Opcode::VStoreF32 => "vstore_f32",
            Opcode::VStoreI32 => "vstore_i32",
            Opcode::VAddF32 => "vadd_f32",
            Opcode::VAddI32 => "vadd_i32",
            Opcode::VSubF32 => "vsub_f32",
            Opcode::VSubI32 => "vsub_i32",
            Opcode::VMultF32 => "vmult_f32",
            Opcode::VMultI32 => "vmult_i32",
            Opcode::VLtF32 => "vlt_f32",
            Opcode::VLtI32 => "vlt_i32",
            Opcode::VGtF32 => "vgt_f32",
            Opcode::VGtI32 => "vgt_i32",
            Opcode::VEqF32 => "veq_f32",
            Opcode::VEqI32 => "veq_i32",
            Opcode::CntBits => "cntbits",
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // f.pad so width specifiers in the log formatting apply.
        f.pad(self.mnemonic())
    }
}

/// One issued masked instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TraceEntry {
    pub opcode: Opcode,
    pub mask: LaneMask,
}

impl TraceEntry {
    /// Lanes that did useful work for this instruction.
    pub fn active_lanes(&self) -> usize {
        self.mask.count_active()
    }
}

impl fmt::Display for TraceEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<11} {}  {}",
            self.opcode,
            self.mask,
            self.active_lanes()
        )
    }
}

/// Ordered log of every masked instruction issued during one run.
///
/// Owned by exactly one `VectorUnit`; single execution stream only.
#[derive(Clone, Debug, Default)]
pub struct ExecTrace {
    entries: Vec<TraceEntry>,
}

impl ExecTrace {
    pub fn record(&mut self, opcode: Opcode, mask: LaneMask) {
        self.entries.push(TraceEntry { opcode, mask });
    }

    pub fn entries(&self) -> &[TraceEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Aggregate the full recorded sequence.
    pub fn summary(&self) -> TraceSummary {
        let mut per_opcode: BTreeMap<Opcode, OpcodeStats> = BTreeMap::new();
        let mut lanes_active = 0;

        for entry in &self.entries {
            let active = entry.active_lanes();
            lanes_active += active;
            let stats = per_opcode.entry(entry.opcode).or_insert(OpcodeStats {
                opcode: entry.opcode,
                instructions: 0,
                lanes_active: 0,
            });
            stats.instructions += 1;
            stats.lanes_active += active;
        }

        let instructions = self.entries.len();
        let lane_slots = instructions * VECTOR_WIDTH;
        let utilization_percent = if lane_slots == 0 {
            0.0
        } else {
            100.0 * lanes_active as f64 / lane_slots as f64
        };

        TraceSummary {
            instructions,
            lane_slots,
            lanes_active,
            utilization_percent,
            per_opcode: per_opcode.into_values().collect(),
        }
    }
}

/// Per-opcode slice of the aggregate accounting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OpcodeStats {
    pub opcode: Opcode,
    pub instructions: usize,
    pub lanes_active: usize,
}

/// Aggregate utilization report for one run.
#[derive(Clone, Debug, PartialEq)]
pub struct TraceSummary {
    /// Masked instructions issued.
    pub instructions: usize,
    /// `instructions * VECTOR_WIDTH`: lane slots the hardware would have
    /// burned regardless of masking.
    pub lane_slots: usize,
    /// Lane slots that were actually active.
    pub lanes_active: usize,
    /// `100 * lanes_active / lane_slots`; 0 for an empty trace.
    pub utilization_percent: f64,
    /// Breakdown by opcode, in mnemonic order.
    pub per_opcode: Vec<OpcodeStats>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_trace_summary() {
        let trace = ExecTrace::default();
        let summary = trace.summary();
        assert_eq!(summary.instructions, 0);
        assert_eq!(summary.lane_slots, 0);
        assert_eq!(summary.utilization_percent, 0.0);
        assert!(summary.per_opcode.is_empty());
    }

    #[test]
    fn test_summary_aggregates() {
        let mut trace = ExecTrace::default();
        trace.record(Opcode::VLoadF32, LaneMask::all());
        trace.record(Opcode::VMultF32, LaneMask::first(2));
        trace.record(Opcode::VMultF32, LaneMask::first(1));
        trace.record(Opcode::VStoreF32, LaneMask::all());

        let summary = trace.summary();
        assert_eq!(summary.instructions, 4);
        assert_eq!(summary.lane_slots, 4 * VECTOR_WIDTH);
        assert_eq!(summary.lanes_active, 4 + 2 + 1 + 4);
        assert!((summary.utilization_percent - 100.0 * 11.0 / 16.0).abs() < 1e-9);

        let mult = summary
            .per_opcode
            .iter()
            .find(|stats| stats.opcode == Opcode::VMultF32)
            .unwrap();
        assert_eq!(mult.instructions, 2);
        assert_eq!(mult.lanes_active, 3);
    }

    #[test]
    fn test_entry_display() {
        let entry = TraceEntry {
            opcode: Opcode::VMultF32,
            mask: LaneMask::first(2),
        };
        assert_eq!(entry.to_string(), "vmult_f32   [**..]  2");
    }
}
