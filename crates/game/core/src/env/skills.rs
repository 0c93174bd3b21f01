use std::collections::BTreeMap;

use crate::skill::{Skill, SkillId};

/// Read-only skill catalog.
///
/// The resolver, manager and battle instance borrow definitions from here and
/// never mutate them. Implementations must be safe to share across threads.
pub trait SkillOracle: Send + Sync {
    fn skill(&self, id: &SkillId) -> Option<&Skill>;

    /// Every skill id in the catalog, in a stable order.
    fn skill_ids(&self) -> Vec<SkillId>;

    fn contains(&self, id: &SkillId) -> bool {
        self.skill(id).is_some()
    }
}

impl SkillOracle for BTreeMap<SkillId, Skill> {
    fn skill(&self, id: &SkillId) -> Option<&Skill> {
        self.get(id)
    }

    fn skill_ids(&self) -> Vec<SkillId> {
        self.keys().cloned().collect()
    }
}
