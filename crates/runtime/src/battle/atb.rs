//! Active-time-battle gauges.
//!
//! Every combatant owns a readiness gauge that fills by `speed × dt × scale`
//! each tick. Once one or more gauges cross the threshold, the fastest ready
//! combatant takes the turn; equal speeds fall back to registration order.

use std::collections::BTreeMap;

use game_core::CombatantId;

#[derive(Clone, Copy, Debug, PartialEq)]
struct Gauge {
    value: f64,
    /// Registration order, used to break speed ties.
    order: usize,
}

#[derive(Clone, Debug, Default)]
pub(crate) struct Gauges {
    gauges: BTreeMap<CombatantId, Gauge>,
    next_order: usize,
}

impl Gauges {
    pub fn register(&mut self, id: CombatantId) {
        let order = self.next_order;
        self.next_order += 1;
        self.gauges.insert(id, Gauge { value: 0.0, order });
    }

    pub fn value(&self, id: CombatantId) -> f64 {
        self.gauges.get(&id).map_or(0.0, |gauge| gauge.value)
    }

    pub fn reset(&mut self, id: CombatantId) {
        if let Some(gauge) = self.gauges.get_mut(&id) {
            gauge.value = 0.0;
        }
    }

    pub fn fill(&mut self, id: CombatantId, amount: f64) {
        if let Some(gauge) = self.gauges.get_mut(&id) {
            gauge.value += amount;
        }
    }

    /// Picks the next actor among `candidates` (`(id, speed)`) whose gauge has
    /// reached `threshold`.
    pub fn select_ready(
        &self,
        candidates: impl IntoIterator<Item = (CombatantId, i32)>,
        threshold: f64,
    ) -> Option<CombatantId> {
        candidates
            .into_iter()
            .filter_map(|(id, speed)| {
                let gauge = self.gauges.get(&id)?;
                (gauge.value >= threshold).then_some((speed, std::cmp::Reverse(gauge.order), id))
            })
            .max()
            .map(|(_, _, id)| id)
    }
}
