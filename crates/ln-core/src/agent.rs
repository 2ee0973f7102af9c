//! The per-request agent descriptor.

use crate::AgentId;

/// Who is being planned for, and under which movement constraints.
///
/// Built by the caller for each planning request; the planner does not
/// retain it past the call.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Agent {
    pub id: AgentId,

    /// Fuel budget in steps.  Half of it is held back for the return trip,
    /// so a plan never exceeds `fuel / 2` steps.
    pub fuel: u32,

    /// Whether the agent may dig through blocked cells (still subject to
    /// the planner's `dig_enabled` option).
    pub can_dig: bool,

    /// Non-conformist agents ignore flow bias and instead pay a flat
    /// penalty for every agent they share a cell with.
    pub non_conformist: bool,
}

impl Agent {
    /// A conformist, non-digging agent.
    pub fn new(id: AgentId, fuel: u32) -> Self {
        Self { id, fuel, can_dig: false, non_conformist: false }
    }

    pub fn with_dig(mut self, can_dig: bool) -> Self {
        self.can_dig = can_dig;
        self
    }

    pub fn with_non_conformist(mut self, non_conformist: bool) -> Self {
        self.non_conformist = non_conformist;
        self
    }

    /// Maximum number of steps a plan may take.
    #[inline]
    pub fn step_budget(&self) -> u32 {
        self.fuel / 2
    }

    /// `true` if a node `steps` away from the start may still be expanded,
    /// i.e. one more step keeps the outbound leg within half the fuel.
    #[inline]
    pub fn can_expand(&self, steps: u32) -> bool {
        (u64::from(steps) + 1) * 2 <= u64::from(self.fuel)
    }
}
