//! Encounter bookkeeping.

use std::sync::Arc;

use parking_lot::Mutex;

use game_core::{CombatantId, EncounterId, RandomSource, SeededRng};

/// Random stream shared by every action resolved in one encounter.
pub type SharedRng = Arc<Mutex<Box<dyn RandomSource>>>;

pub fn shared_rng(rng: impl RandomSource + 'static) -> SharedRng {
    Arc::new(Mutex::new(Box::new(rng)))
}

/// A running encounter: who takes part and which RNG stream resolves their actions.
pub struct Encounter {
    pub id: EncounterId,
    pub participants: Vec<CombatantId>,
    pub seed: Option<u64>,
    pub(crate) rng: SharedRng,
}

impl Encounter {
    /// Seeded encounters replay identically; unseeded ones draw from entropy.
    pub fn new(id: EncounterId, participants: Vec<CombatantId>, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => SeededRng::new(seed),
            None => SeededRng::from_entropy(),
        };
        Self {
            id,
            participants,
            seed,
            rng: shared_rng(rng),
        }
    }

    /// An encounter driven by an explicit stream (scripted draws in tests and replays).
    pub fn scripted(
        id: EncounterId,
        participants: Vec<CombatantId>,
        rng: impl RandomSource + 'static,
    ) -> Self {
        Self {
            id,
            participants,
            seed: None,
            rng: shared_rng(rng),
        }
    }
}

impl std::fmt::Debug for Encounter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Encounter")
            .field("id", &self.id)
            .field("participants", &self.participants)
            .field("seed", &self.seed)
            .finish_non_exhaustive()
    }
}
