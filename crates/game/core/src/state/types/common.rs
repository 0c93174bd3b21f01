use std::fmt;

/// Unique identifier for any combatant tracked by a registry or battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatantId(pub u32);

impl fmt::Display for CombatantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Side a combatant fights for. Combatants sharing a team are allies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TeamId(pub u8);

impl TeamId {
    /// Player characters and their pets.
    pub const PLAYERS: Self = Self(0);

    /// Spawned monsters.
    pub const MONSTERS: Self = Self(1);
}

/// Identifier of an encounter started through the combat manager.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EncounterId(pub u64);

impl fmt::Display for EncounterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "encounter-{}", self.0)
    }
}

/// Formation row used by row-targeting skills.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Row {
    #[default]
    Front,
    Back,
}

/// What kind of entity a combatant represents.
///
/// Monsters are transient: they are despawned when their encounter ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatantKind {
    #[default]
    Player,
    Monster,
    Pet,
}

impl CombatantKind {
    pub const fn is_transient(self) -> bool {
        matches!(self, Self::Monster)
    }
}
