//! Server-authoritative combat manager.
//!
//! Resolves "use skill" requests from many sessions against the shared
//! [`CombatantRegistry`]. Each request runs to completion on the calling
//! thread:
//!
//! ```text
//! snapshot actor/target ─► plan_action ─► resolve_targets
//!     ─► commit (actor lock) ─► resolve_on_target (one target lock at a time)
//!     ─► record_success, or refund if every target vanished (actor lock)
//! ```
//!
//! A target removed from the registry between lookup and lock is skipped.
//!
//! At most one combatant lock is held at any moment. The encounter RNG mutex
//! is only ever taken while holding a single combatant lock, never the other
//! way round.

mod encounter;

pub use encounter::{Encounter, SharedRng, shared_rng};

use std::sync::Arc;

use dashmap::DashMap;
use tracing::{debug, info};

use game_core::{
    ActionError, CombatAction, CombatResolver, CombatResult, Combatant, CombatantId, EncounterId,
    GameError, MasteryProgress, RandomSource, SeededRng, SkillOracle, TargetType, TurnUpkeep,
    commit, plan_action, record_success, refund, resolve_on_target, resolve_targets,
};

use crate::api::{Result, RuntimeError, UseSkillRequest, UseSkillResponse};
use crate::config::RuntimeConfig;
use crate::events::{CombatEvent, EncounterEvent, EventBus};
use crate::providers::auto_battle;
use crate::registry::CombatantRegistry;

pub struct CombatManager {
    registry: CombatantRegistry,
    encounters: DashMap<EncounterId, Encounter>,
    catalog: Arc<dyn SkillOracle>,
    config: RuntimeConfig,
    /// Stream for actors outside any encounter.
    default_rng: SharedRng,
    events: EventBus,
}

impl CombatManager {
    pub fn new(catalog: Arc<dyn SkillOracle>, config: RuntimeConfig) -> Self {
        let default_rng = match config.default_seed {
            Some(seed) => SeededRng::new(seed),
            None => SeededRng::from_entropy(),
        };
        Self {
            registry: CombatantRegistry::new(),
            encounters: DashMap::new(),
            events: EventBus::with_capacity(config.event_buffer_size),
            catalog,
            config,
            default_rng: shared_rng(default_rng),
        }
    }

    /// Replaces the fallback RNG stream.
    pub fn with_rng(mut self, rng: impl RandomSource + 'static) -> Self {
        self.default_rng = shared_rng(rng);
        self
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn catalog(&self) -> &dyn SkillOracle {
        self.catalog.as_ref()
    }

    // ========================================================================
    // Registry
    // ========================================================================

    pub fn register_combatant(&self, combatant: Combatant) -> Result<()> {
        let id = combatant.id;
        self.registry.insert(combatant)?;
        debug!(combatant = %id, "registered combatant");
        Ok(())
    }

    /// Removes a combatant. Casts already past their lookup treat it as gone.
    pub fn remove_combatant(&self, id: CombatantId) -> Option<Combatant> {
        let removed = self.registry.remove(id);
        if removed.is_some() {
            debug!(combatant = %id, "removed combatant");
        }
        removed
    }

    pub fn snapshot(&self, id: CombatantId) -> Option<Combatant> {
        self.registry.snapshot(id)
    }

    pub fn all_combatants(&self) -> Vec<Combatant> {
        self.registry.snapshots()
    }

    // ========================================================================
    // Encounters
    // ========================================================================

    /// Assigns `participants` to a new encounter with its own RNG stream.
    pub fn start_encounter(
        &self,
        id: EncounterId,
        participants: &[CombatantId],
        seed: Option<u64>,
    ) -> Result<()> {
        self.open_encounter(Encounter::new(id, participants.to_vec(), seed))
    }

    /// Like [`start_encounter`](Self::start_encounter) with an explicit stream.
    pub fn start_encounter_with_rng(
        &self,
        id: EncounterId,
        participants: &[CombatantId],
        rng: impl RandomSource + 'static,
    ) -> Result<()> {
        self.open_encounter(Encounter::scripted(id, participants.to_vec(), rng))
    }

    fn open_encounter(&self, encounter: Encounter) -> Result<()> {
        let id = encounter.id;
        if encounter.participants.is_empty() {
            return Err(RuntimeError::EmptyEncounter(id));
        }
        if self.encounters.contains_key(&id) {
            return Err(RuntimeError::EncounterExists(id));
        }

        let mut enlisted = Vec::with_capacity(encounter.participants.len());
        for &participant in &encounter.participants {
            if let Err(err) = self.enlist(participant, id) {
                for &done in &enlisted {
                    self.discharge(done, id);
                }
                return Err(err);
            }
            enlisted.push(participant);
        }

        let participants = encounter.participants.clone();
        match self.encounters.entry(id) {
            dashmap::mapref::entry::Entry::Occupied(_) => {
                for &done in &enlisted {
                    self.discharge(done, id);
                }
                return Err(RuntimeError::EncounterExists(id));
            }
            dashmap::mapref::entry::Entry::Vacant(slot) => {
                slot.insert(encounter);
            }
        }

        info!(encounter = %id, participants = participants.len(), "encounter started");
        self.events.publish(EncounterEvent::Started {
            encounter: id,
            participants,
        });
        Ok(())
    }

    fn enlist(&self, id: CombatantId, encounter: EncounterId) -> Result<()> {
        let cell = self
            .registry
            .get(id)
            .ok_or(RuntimeError::CombatantNotFound(id))?;
        let mut combatant = cell.lock();
        if let Some(current) = combatant.encounter {
            return Err(RuntimeError::AlreadyEngaged {
                combatant: id,
                encounter: current,
            });
        }
        combatant.encounter = Some(encounter);
        Ok(())
    }

    fn discharge(&self, id: CombatantId, encounter: EncounterId) -> Option<Combatant> {
        let cell = self.registry.get(id)?;
        let mut combatant = cell.lock();
        if combatant.encounter == Some(encounter) {
            combatant.encounter = None;
            combatant.guarding = false;
        }
        Some(combatant.clone())
    }

    /// Ends an encounter and returns the surviving participants' final state.
    ///
    /// Transient combatants (monsters) are removed from the registry; their
    /// snapshots are still included in the returned list.
    pub fn end_encounter(&self, id: EncounterId) -> Result<Vec<Combatant>> {
        let (_, encounter) = self
            .encounters
            .remove(&id)
            .ok_or(RuntimeError::EncounterNotFound(id))?;

        let mut snapshots = Vec::with_capacity(encounter.participants.len());
        let mut despawned = Vec::new();
        for &participant in &encounter.participants {
            let Some(snapshot) = self.discharge(participant, id) else {
                continue;
            };
            if snapshot.kind.is_transient() {
                self.registry.remove(participant);
                despawned.push(participant);
            }
            snapshots.push(snapshot);
        }

        info!(encounter = %id, despawned = despawned.len(), "encounter ended");
        self.events.publish(EncounterEvent::Ended {
            encounter: id,
            despawned,
        });
        Ok(snapshots)
    }

    pub fn encounter_participants(&self, id: EncounterId) -> Option<Vec<CombatantId>> {
        self.encounters
            .get(&id)
            .map(|encounter| encounter.participants.clone())
    }

    // ========================================================================
    // Actions
    // ========================================================================

    /// Resolves a client request. Rejections yield an empty list.
    pub fn use_skill(&self, request: UseSkillRequest) -> Vec<CombatResult> {
        self.execute(request.into())
    }

    /// Decodes a JSON request from a session and encodes the response.
    pub fn handle_json(&self, payload: &str) -> serde_json::Result<String> {
        let request: UseSkillRequest = serde_json::from_str(payload)?;
        UseSkillResponse::from(self.use_skill(request)).to_json()
    }

    /// Resolves an action. Rejections are logged and yield an empty list.
    pub fn execute(&self, action: CombatAction) -> Vec<CombatResult> {
        match self.try_execute(&action) {
            Ok(results) => results,
            Err(err) => {
                debug!(
                    actor = %action.actor(),
                    code = err.error_code(),
                    severity = err.severity().as_str(),
                    "combat action rejected: {}",
                    err
                );
                Vec::new()
            }
        }
    }

    /// Resolves an action, reporting why it was rejected.
    pub fn try_execute(
        &self,
        action: &CombatAction,
    ) -> std::result::Result<Vec<CombatResult>, ActionError> {
        let actor_id = action.actor();
        let actor_cell = self
            .registry
            .get(actor_id)
            .ok_or(ActionError::ActorNotFound)?;
        let actor = actor_cell.lock().clone();
        let primary = match action.target() {
            Some(target) if target != actor_id => self
                .registry
                .snapshot(target)
                .ok_or(ActionError::TargetNotFound)?,
            _ => actor.clone(),
        };

        let plan = plan_action(action, &actor, self.catalog.as_ref())?;
        let roster = match plan.target_type {
            TargetType::EnemyRow | TargetType::AllAllies | TargetType::AllEnemies => {
                self.registry.snapshots_in(actor.encounter)
            }
            _ => Vec::new(),
        };
        let targets = resolve_targets(&actor, &primary, plan.target_type, &roster)?;

        let (caster, payment) = {
            let mut live = actor_cell.lock();
            if !self.registry.is_current(actor_id, &actor_cell) {
                return Err(ActionError::ActorNotFound);
            }
            let payment = commit(&mut live, &plan)?;
            (live.clone(), payment)
        };

        let rng = self.rng_for(caster.encounter);
        let resolver = CombatResolver::new(self.catalog.as_ref(), &self.config.combat);
        let mut results = Vec::with_capacity(targets.len());
        let mut vanished = false;
        for target_id in targets {
            let Some(cell) = self.registry.get(target_id) else {
                vanished = true;
                continue;
            };
            let mut target = cell.lock();
            if !self.registry.is_current(target_id, &cell) {
                vanished = true;
                continue;
            }
            if !target.is_alive() {
                continue;
            }
            // The caster acting on itself sees its post-commit state.
            let result = {
                let mut rng = rng.lock();
                resolve_on_target(&caster, &mut target, &plan.technique, &resolver, rng.as_mut())
            };
            if !target.is_alive() {
                self.events.publish(CombatEvent::CombatantDefeated {
                    combatant: target_id,
                    by: Some(actor_id),
                });
            }
            results.push(result);
        }

        let progress = {
            let mut live = actor_cell.lock();
            if results.is_empty() {
                refund(&mut live, &plan, payment);
                return Err(if vanished {
                    ActionError::TargetNotFound
                } else {
                    ActionError::TargetDead
                });
            }
            record_success(&mut live, &plan, &self.config.combat)
        };

        if let Some(skill) = plan.skill_id.clone() {
            self.events.publish(CombatEvent::SkillUsed {
                actor: actor_id,
                skill,
            });
        }
        if let Some(MasteryProgress::Evolved { from, to }) = progress {
            info!(actor = %actor_id, %from, %to, "skill evolved");
            self.events.publish(CombatEvent::SkillEvolved {
                actor: actor_id,
                from,
                to,
            });
        }

        Ok(results)
    }

    /// Lets the auto-battle heuristic pick and resolve an action for `id`.
    pub fn auto_battle(&self, id: CombatantId) -> Vec<CombatResult> {
        let Some(actor) = self.registry.snapshot(id) else {
            return Vec::new();
        };
        let battlefield = self.registry.snapshots_in(actor.encounter);
        let refs: Vec<&Combatant> = battlefield.iter().collect();
        let action = {
            let rng = self.rng_for(actor.encounter);
            let mut rng = rng.lock();
            auto_battle::choose_action(
                &actor,
                &refs,
                self.catalog.as_ref(),
                &self.config.combat,
                rng.as_mut(),
            )
        };
        match action {
            Some(action) => self.execute(action),
            None => {
                debug!(actor = %id, "auto-battle found nothing to do");
                Vec::new()
            }
        }
    }

    /// Runs end-of-turn upkeep for one combatant: Burn, status tick, cooldowns.
    pub fn end_turn(&self, id: CombatantId) -> Option<TurnUpkeep> {
        let cell = self.registry.get(id)?;
        let upkeep = {
            let mut combatant = cell.lock();
            let was_alive = combatant.is_alive();
            let upkeep = combatant.end_turn();
            if was_alive && !combatant.is_alive() {
                self.events.publish(CombatEvent::CombatantDefeated {
                    combatant: id,
                    by: None,
                });
            }
            upkeep
        };
        Some(upkeep)
    }

    fn rng_for(&self, encounter: Option<EncounterId>) -> SharedRng {
        encounter
            .and_then(|id| self.encounters.get(&id).map(|e| Arc::clone(&e.rng)))
            .unwrap_or_else(|| Arc::clone(&self.default_rng))
    }
}
