//! Planner configuration.
//!
//! Three layers, all with documented defaults:
//!
//! - [`PlanOptions`] — behavioural switches a caller flips per deployment.
//! - [`CostModel`] — score penalties (unitless) and time delays (ms) the
//!   search applies per move.  Tuned together; change with care.
//! - [`PlannerConfig`] — the two above plus expansion cadences.
//!
//! Fuel and conformity are per-agent and live on [`ln_core::Agent`].

use ln_core::CoreError;

// ── PlanOptions ───────────────────────────────────────────────────────────────

/// Behavioural switches.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PlanOptions {
    /// Allow agents with dig permission to path through blocked cells.
    /// Default: `false`.
    pub dig_enabled: bool,

    /// `true`: moving against ambient flow costs `against_flow_penalty`.
    /// `false` (default): moving against ambient flow is not allowed.
    pub allow_against_flow_penalty_only: bool,

    /// Give the final step a finite leave time (`arrive + move_time_ms`)
    /// because the agent keeps moving past its destination.  Default:
    /// `false`, the final step is held indefinitely.
    pub continue_past_destination: bool,
}

// ── CostModel ─────────────────────────────────────────────────────────────────

/// Per-move score penalties and time delays.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CostModel {
    /// Score added for every step.  Default: 1.
    pub step_cost: i64,
    /// Time to traverse one cell.  Default: 100 ms.
    pub move_time_ms: u64,

    /// Score per quarter turn (left/right = 1, back = 2).  Default: 1.
    pub turn_penalty: i64,
    /// Time per quarter turn.  Default: 50 ms.
    pub turn_delay_ms: u64,

    /// Score for digging through a blocked cell.  Default: 50.
    pub dig_penalty: i64,
    /// Time to dig one cell.  Default: 500 ms.
    pub dig_delay_ms: u64,

    /// Score subtracted when moving with the flow.  Default: 1.
    pub with_flow_bonus: i64,
    /// Score added when crossing the flow.  Default: 1.
    pub cross_flow_penalty: i64,
    /// Score added when moving against the flow (only where allowed).
    /// Default: 5.
    pub against_flow_penalty: i64,

    /// Gap kept after another agent's leave time before entering.
    /// Default: 50 ms.
    pub wait_margin_ms: u64,
    /// One score point per started unit of waiting.  Default: 100 ms.
    pub wait_penalty_unit_ms: u64,

    /// Flat score per co-located agent for non-conformist agents.
    /// Default: 3.
    pub interaction_penalty: i64,
}

impl Default for CostModel {
    fn default() -> Self {
        Self {
            step_cost:            1,
            move_time_ms:         100,
            turn_penalty:         1,
            turn_delay_ms:        50,
            dig_penalty:          50,
            dig_delay_ms:         500,
            with_flow_bonus:      1,
            cross_flow_penalty:   1,
            against_flow_penalty: 5,
            wait_margin_ms:       50,
            wait_penalty_unit_ms: 100,
            interaction_penalty:  3,
        }
    }
}

impl CostModel {
    /// Score for waiting `wait_ms`: `ceil(wait_ms / wait_penalty_unit_ms)`.
    /// Monotonic in the wait; zero for no wait.
    #[inline]
    pub fn wait_penalty(&self, wait_ms: u64) -> i64 {
        i64::try_from(wait_ms.div_ceil(self.wait_penalty_unit_ms)).unwrap_or(i64::MAX / 4)
    }
}

// ── PlannerConfig ─────────────────────────────────────────────────────────────

/// Complete planner configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PlannerConfig {
    pub options: PlanOptions,
    pub costs:   CostModel,

    /// Expansions between reachability-probe opportunities.  Default: 100 000.
    pub probe_interval: u64,

    /// Expansions between cooperative checkpoints.  Default: 1 000.
    pub yield_interval: u64,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            options:        PlanOptions::default(),
            costs:          CostModel::default(),
            probe_interval: 100_000,
            yield_interval: 1_000,
        }
    }
}

impl PlannerConfig {
    pub fn with_options(options: PlanOptions) -> Self {
        Self { options, ..Self::default() }
    }

    /// Check the invariants the search relies on.
    ///
    /// The flow and traffic bias of one move is floored at
    /// `-with_flow_bonus`, so `with_flow_bonus <= step_cost` keeps every
    /// move's score contribution non-negative and the search free of
    /// negative cycles.
    pub fn validate(&self) -> Result<(), CoreError> {
        let c = &self.costs;
        if self.yield_interval == 0 {
            return Err(CoreError::Config("yield_interval must be > 0".into()));
        }
        if self.probe_interval == 0 {
            return Err(CoreError::Config("probe_interval must be > 0".into()));
        }
        if c.wait_penalty_unit_ms == 0 {
            return Err(CoreError::Config("wait_penalty_unit_ms must be > 0".into()));
        }
        if c.step_cost <= 0 {
            return Err(CoreError::Config(format!("step_cost must be > 0, got {}", c.step_cost)));
        }
        if c.with_flow_bonus > c.step_cost {
            return Err(CoreError::Config(format!(
                "with_flow_bonus ({}) must not exceed step_cost ({})",
                c.with_flow_bonus, c.step_cost
            )));
        }
        let penalties = [
            ("turn_penalty", c.turn_penalty),
            ("dig_penalty", c.dig_penalty),
            ("with_flow_bonus", c.with_flow_bonus),
            ("cross_flow_penalty", c.cross_flow_penalty),
            ("against_flow_penalty", c.against_flow_penalty),
            ("interaction_penalty", c.interaction_penalty),
        ];
        if let Some((name, v)) = penalties.iter().find(|(_, v)| *v < 0) {
            return Err(CoreError::Config(format!("{name} must be >= 0, got {v}")));
        }
        Ok(())
    }
}
