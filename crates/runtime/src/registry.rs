//! Concurrent combatant registry.
//!
//! Every combatant lives behind its own `Arc<Mutex<_>>` inside a sharded map,
//! so lookups, inserts and removals proceed while other threads hold a
//! combatant lock. Map guards are never held while a combatant is locked:
//! callers clone the `Arc` out first.

use std::sync::Arc;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use parking_lot::Mutex;

use game_core::{Combatant, CombatantId, EncounterId};

use crate::api::{Result, RuntimeError};

/// Shared handle to one combatant's state.
pub type CombatantCell = Arc<Mutex<Combatant>>;

#[derive(Debug, Default)]
pub struct CombatantRegistry {
    combatants: DashMap<CombatantId, CombatantCell>,
}

impl CombatantRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a combatant; fails if the id is taken.
    pub fn insert(&self, combatant: Combatant) -> Result<CombatantCell> {
        match self.combatants.entry(combatant.id) {
            Entry::Occupied(_) => Err(RuntimeError::CombatantExists(combatant.id)),
            Entry::Vacant(slot) => {
                let cell = Arc::new(Mutex::new(combatant));
                slot.insert(Arc::clone(&cell));
                Ok(cell)
            }
        }
    }

    /// Removes a combatant and returns its final state.
    pub fn remove(&self, id: CombatantId) -> Option<Combatant> {
        let (_, cell) = self.combatants.remove(&id)?;
        let snapshot = cell.lock().clone();
        Some(snapshot)
    }

    pub fn get(&self, id: CombatantId) -> Option<CombatantCell> {
        self.combatants.get(&id).map(|entry| Arc::clone(entry.value()))
    }

    /// True while `cell` is still the registered entry for `id`.
    ///
    /// Used after taking a lock to detect a removal (or remove + re-add) that
    /// raced with the lookup.
    pub fn is_current(&self, id: CombatantId, cell: &CombatantCell) -> bool {
        self.combatants
            .get(&id)
            .is_some_and(|entry| Arc::ptr_eq(entry.value(), cell))
    }

    pub fn contains(&self, id: CombatantId) -> bool {
        self.combatants.contains_key(&id)
    }

    pub fn snapshot(&self, id: CombatantId) -> Option<Combatant> {
        let cell = self.get(id)?;
        let snapshot = cell.lock().clone();
        Some(snapshot)
    }

    /// Copies of every registered combatant, ordered by id.
    pub fn snapshots(&self) -> Vec<Combatant> {
        let mut snapshots: Vec<Combatant> = self
            .cells()
            .into_iter()
            .map(|cell| cell.lock().clone())
            .collect();
        snapshots.sort_by_key(|c| c.id);
        snapshots
    }

    /// Copies of every combatant currently assigned to `encounter`, ordered by id.
    pub fn snapshots_in(&self, encounter: Option<EncounterId>) -> Vec<Combatant> {
        let mut snapshots: Vec<Combatant> = self
            .cells()
            .into_iter()
            .filter_map(|cell| {
                let combatant = cell.lock();
                (combatant.encounter == encounter).then(|| combatant.clone())
            })
            .collect();
        snapshots.sort_by_key(|c| c.id);
        snapshots
    }

    pub fn len(&self) -> usize {
        self.combatants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.combatants.is_empty()
    }

    fn cells(&self) -> Vec<CombatantCell> {
        self.combatants
            .iter()
            .map(|entry| Arc::clone(entry.value()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::TeamId;

    fn goblin(id: u32) -> Combatant {
        Combatant::new(CombatantId(id), "Goblin", TeamId::MONSTERS)
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let registry = CombatantRegistry::new();
        registry.insert(goblin(1)).unwrap();
        assert_eq!(
            registry.insert(goblin(1)).err(),
            Some(RuntimeError::CombatantExists(CombatantId(1)))
        );
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn stale_cells_are_detected_after_readd() {
        let registry = CombatantRegistry::new();
        let first = registry.insert(goblin(1)).unwrap();
        assert!(registry.is_current(CombatantId(1), &first));

        registry.remove(CombatantId(1));
        assert!(!registry.is_current(CombatantId(1), &first));

        registry.insert(goblin(1)).unwrap();
        assert!(!registry.is_current(CombatantId(1), &first));
    }

    #[test]
    fn snapshots_are_sorted_and_filtered() {
        let registry = CombatantRegistry::new();
        registry.insert(goblin(3)).unwrap();
        registry.insert(goblin(1)).unwrap();
        let mut engaged = goblin(2);
        engaged.encounter = Some(EncounterId(9));
        registry.insert(engaged).unwrap();

        let ids: Vec<_> = registry.snapshots().iter().map(|c| c.id.0).collect();
        assert_eq!(ids, vec![1, 2, 3]);

        let in_fight = registry.snapshots_in(Some(EncounterId(9)));
        assert_eq!(in_fight.len(), 1);
        assert_eq!(in_fight[0].id, CombatantId(2));
    }
}
