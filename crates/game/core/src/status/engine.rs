//! Stacking, conflict and expiry rules for [`StatusEffects`].
//!
//! # Apply order
//!
//! ```text
//! 1. find existing (same tag + param, not SeparateInstances)
//! 2. RefreshDuration  → turns = max(old, new), keep old value      (done)
//! 3. StackUpToN       → below cap: stacks+1, value+=new, turns=max
//!                       at cap:    turns=max only                   (done)
//! 4. NoStackOverwrite → old instance is replaced, continue
//! 5. conflict group   → higher old priority blocks everything,
//!                       lower/equal old priority is evicted
//! 6. insert
//! ```

use crate::config::CombatConfig;
use crate::state::{StackingPolicy, StatusEffect, StatusEffects};

/// What an [`StatusEffects::apply`] call did to the list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ApplyOutcome {
    /// A new instance was pushed (possibly replacing others).
    Inserted,
    /// An existing instance had its duration extended.
    Refreshed,
    /// An existing instance gained a stack.
    Stacked,
    /// An existing instance was at its stack cap; only duration changed.
    StackCapped,
    /// A higher-priority member of the conflict group won; nothing changed.
    Blocked,
}

/// Result of applying one status effect.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApplyReport {
    pub outcome: ApplyOutcome,
    /// Instances evicted by overwrite or conflict resolution.
    pub removed: Vec<StatusEffect>,
}

impl ApplyReport {
    fn unchanged(outcome: ApplyOutcome) -> Self {
        Self {
            outcome,
            removed: Vec::new(),
        }
    }

    /// True unless the application was blocked.
    pub fn is_applied(&self) -> bool {
        self.outcome != ApplyOutcome::Blocked
    }
}

impl StatusEffects {
    /// Applies a new instance against the existing ones.
    pub fn apply(&mut self, new: StatusEffect) -> ApplyReport {
        let existing = self
            .effects
            .iter()
            .position(|e| e.policy != StackingPolicy::SeparateInstances && e.same_slot(&new));

        let mut replaced = None;
        if let Some(index) = existing {
            let current = &mut self.effects[index];
            match new.policy {
                StackingPolicy::RefreshDuration => {
                    current.turns_remaining = current.turns_remaining.max(new.turns_remaining);
                    return ApplyReport::unchanged(ApplyOutcome::Refreshed);
                }
                StackingPolicy::StackUpToN => {
                    let cap = new.max_stacks.max(1);
                    current.max_stacks = cap;
                    current.turns_remaining = current.turns_remaining.max(new.turns_remaining);
                    if current.stacks < cap {
                        current.stacks += 1;
                        current.value += new.value;
                        return ApplyReport::unchanged(ApplyOutcome::Stacked);
                    }
                    return ApplyReport::unchanged(ApplyOutcome::StackCapped);
                }
                StackingPolicy::NoStackOverwrite => replaced = Some(index),
                StackingPolicy::SeparateInstances => {}
            }
        }

        let outranked = self
            .effects
            .iter()
            .enumerate()
            .any(|(i, e)| Some(i) != replaced && e.conflicts_with(&new) && e.priority > new.priority);
        if outranked {
            return ApplyReport::unchanged(ApplyOutcome::Blocked);
        }

        let evicted = self
            .effects
            .iter()
            .enumerate()
            .filter(|(i, e)| Some(*i) == replaced || e.conflicts_with(&new))
            .count();
        if self.effects.len() - evicted >= CombatConfig::MAX_STATUS_EFFECTS {
            return ApplyReport::unchanged(ApplyOutcome::Blocked);
        }

        let mut removed = Vec::with_capacity(evicted);
        for index in (0..self.effects.len()).rev() {
            if Some(index) == replaced || self.effects[index].conflicts_with(&new) {
                removed.push(self.effects.remove(index));
            }
        }
        removed.reverse();

        self.effects.push(new);
        ApplyReport {
            outcome: ApplyOutcome::Inserted,
            removed,
        }
    }

    /// Advances every instance by one turn and evicts the expired ones.
    ///
    /// Returns the evicted instances in list order.
    pub fn tick(&mut self) -> Vec<StatusEffect> {
        let mut expired = Vec::new();
        for index in (0..self.effects.len()).rev() {
            let effect = &mut self.effects[index];
            effect.turns_remaining -= 1;
            if effect.is_expired() {
                let mut effect = self.effects.remove(index);
                effect.turns_remaining = 0;
                expired.push(effect);
            }
        }
        expired.reverse();
        expired
    }

    /// Removes every instance matching `predicate` and returns them in list order.
    pub fn remove_all<F>(&mut self, mut predicate: F) -> Vec<StatusEffect>
    where
        F: FnMut(&StatusEffect) -> bool,
    {
        let mut removed = Vec::new();
        for index in (0..self.effects.len()).rev() {
            if predicate(&self.effects[index]) {
                removed.push(self.effects.remove(index));
            }
        }
        removed.reverse();
        removed
    }

    /// Removes Seal, Burn and DebuffStats instances.
    pub fn cleanse(&mut self) -> Vec<StatusEffect> {
        self.remove_all(|e| e.tag.is_debuff())
    }

    /// Removes BuffStats and Shield instances.
    pub fn dispel(&mut self) -> Vec<StatusEffect> {
        self.remove_all(|e| e.tag.is_buff())
    }
}
