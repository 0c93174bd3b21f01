/// Combat configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatConfig {
    /// Half-width of the multiplicative variance band (0.05 = ±5%).
    pub variance_spread: f64,
    /// Damage floor applied after defense subtraction.
    pub min_damage: i32,
    /// Number of successful uses needed for each mastery rank.
    pub uses_per_rank: u32,
    /// Gauge value at which a combatant becomes ready to act.
    pub atb_threshold: f64,
    /// Multiplier applied to `speed × dt` on every gauge tick.
    pub atb_scale: f64,
    /// HP ratio under which the auto-battle heuristic prefers healing.
    pub heal_threshold: f64,
    /// Shortest duration a partially resisted effect can be reduced to.
    pub partial_min_turns: i32,
}

impl CombatConfig {
    // ===== compile-time constants =====
    /// Upper bound on simultaneously active status effects per combatant.
    pub const MAX_STATUS_EFFECTS: usize = 32;
    /// Rank assigned to a freshly learned skill.
    pub const INITIAL_RANK: u32 = 1;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_VARIANCE_SPREAD: f64 = 0.05;
    pub const DEFAULT_MIN_DAMAGE: i32 = 1;
    pub const DEFAULT_USES_PER_RANK: u32 = 10;
    pub const DEFAULT_ATB_THRESHOLD: f64 = 100.0;
    pub const DEFAULT_ATB_SCALE: f64 = 1.0;
    pub const DEFAULT_HEAL_THRESHOLD: f64 = 0.35;
    pub const DEFAULT_PARTIAL_MIN_TURNS: i32 = 1;

    pub fn new() -> Self {
        Self {
            variance_spread: Self::DEFAULT_VARIANCE_SPREAD,
            min_damage: Self::DEFAULT_MIN_DAMAGE,
            uses_per_rank: Self::DEFAULT_USES_PER_RANK,
            atb_threshold: Self::DEFAULT_ATB_THRESHOLD,
            atb_scale: Self::DEFAULT_ATB_SCALE,
            heal_threshold: Self::DEFAULT_HEAL_THRESHOLD,
            partial_min_turns: Self::DEFAULT_PARTIAL_MIN_TURNS,
        }
    }

    /// Lower and upper bound of the variance draw.
    pub fn variance_bounds(&self) -> (f64, f64) {
        let spread = self.variance_spread.abs();
        (1.0 - spread, 1.0 + spread)
    }

    /// True when gauges can fill and reach the threshold in finite time.
    pub fn atb_runnable(&self) -> bool {
        self.atb_scale.is_finite()
            && self.atb_scale > 0.0
            && self.atb_threshold.is_finite()
    }

    pub fn with_atb_scale(mut self, atb_scale: f64) -> Self {
        self.atb_scale = atb_scale;
        self
    }

    pub fn with_heal_threshold(mut self, heal_threshold: f64) -> Self {
        self.heal_threshold = heal_threshold;
        self
    }
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self::new()
    }
}
