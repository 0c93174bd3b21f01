//! Turn-scheduled battle between two owned rosters.
//!
//! A [`BattleInstance`] owns its combatants outright, so it needs no locks.
//! The caller drives time with [`tick`](BattleInstance::tick); once a gauge
//! fills, that combatant's turn stays open until an action resolves or the
//! turn is passed. Actions go through the same plan → target → commit →
//! per-target pipeline the combat manager uses.

mod atb;

use std::sync::Arc;

use tracing::{debug, info};

use game_core::{
    ActionError, ActionPlan, CombatAction, CombatConfig, CombatResolver, CombatResult, Combatant,
    CombatantId, GameError, MasteryProgress, RandomSource, SkillOracle, TeamId, Technique,
    TurnUpkeep, commit, plan_action, record_success, resolve_on_target, resolve_targets,
};

use self::atb::Gauges;
use crate::api::{Result, RuntimeError};
use crate::events::{CombatEvent, Event, EventBus};
use crate::providers::auto_battle;

/// How the battle stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Outcome {
    Ongoing,
    /// Every enemy is down.
    Victory,
    /// Every ally is down.
    Defeat,
}

pub struct BattleInstance {
    allies: Vec<Combatant>,
    enemies: Vec<Combatant>,
    gauges: Gauges,
    current: Option<CombatantId>,
    catalog: Arc<dyn SkillOracle>,
    config: CombatConfig,
    rng: Box<dyn RandomSource>,
    events: Option<EventBus>,
}

impl BattleInstance {
    pub fn new(
        catalog: Arc<dyn SkillOracle>,
        config: CombatConfig,
        rng: impl RandomSource + 'static,
    ) -> Self {
        Self {
            allies: Vec::new(),
            enemies: Vec::new(),
            gauges: Gauges::default(),
            current: None,
            catalog,
            config,
            rng: Box::new(rng),
            events: None,
        }
    }

    /// Publishes skill use, evolution and defeats to `bus`.
    pub fn with_events(mut self, bus: EventBus) -> Self {
        self.events = Some(bus);
        self
    }

    pub fn add_ally(&mut self, combatant: Combatant) -> Result<()> {
        self.enlist(combatant, TeamId::PLAYERS)
    }

    pub fn add_enemy(&mut self, combatant: Combatant) -> Result<()> {
        self.enlist(combatant, TeamId::MONSTERS)
    }

    fn enlist(&mut self, mut combatant: Combatant, team: TeamId) -> Result<()> {
        if self.combatant(combatant.id).is_some() {
            return Err(RuntimeError::CombatantExists(combatant.id));
        }
        // Battle rosters are self-contained: sides come from the roster.
        combatant.team = team;
        combatant.encounter = None;
        self.gauges.register(combatant.id);
        if team == TeamId::PLAYERS {
            self.allies.push(combatant);
        } else {
            self.enemies.push(combatant);
        }
        Ok(())
    }

    pub fn allies(&self) -> &[Combatant] {
        &self.allies
    }

    pub fn enemies(&self) -> &[Combatant] {
        &self.enemies
    }

    pub fn combatant(&self, id: CombatantId) -> Option<&Combatant> {
        self.allies
            .iter()
            .chain(self.enemies.iter())
            .find(|combatant| combatant.id == id)
    }

    pub fn gauge(&self, id: CombatantId) -> f64 {
        self.gauges.value(id)
    }

    /// The combatant whose turn is open, if any.
    pub fn current_turn_combatant(&self) -> Option<&Combatant> {
        self.current.and_then(|id| self.combatant(id))
    }

    /// Advances time by `dt`. Gauges only fill while no turn is open.
    ///
    /// Returns the combatant whose turn is open afterwards.
    pub fn tick(&mut self, dt: f64) -> Option<CombatantId> {
        if let Some(id) = self.current {
            if self.combatant(id).is_some_and(Combatant::is_alive) {
                return Some(id);
            }
            self.current = None;
        }

        let rate = dt * self.config.atb_scale;
        for combatant in self.allies.iter().chain(self.enemies.iter()) {
            if combatant.is_alive() {
                self.gauges
                    .fill(combatant.id, f64::from(combatant.speed()) * rate);
            }
        }

        let living = self
            .allies
            .iter()
            .chain(self.enemies.iter())
            .filter(|combatant| combatant.is_alive())
            .map(|combatant| (combatant.id, combatant.speed()));
        self.current = self.gauges.select_ready(living, self.config.atb_threshold);
        self.current
    }

    /// Resolves the current combatant's action and returns the narrative.
    ///
    /// A rejected action leaves the turn open so the caller can pick again.
    pub fn resolve_action(
        &mut self,
        action: CombatAction,
    ) -> std::result::Result<String, ActionError> {
        let actor_id = action.actor();
        if self.current != Some(actor_id) {
            return Err(ActionError::NotActorsTurn);
        }
        let actor = self
            .combatant(actor_id)
            .cloned()
            .ok_or(ActionError::ActorNotFound)?;
        if actor.is_sealed() {
            self.finish_turn(actor_id);
            return Ok(format!("{} is sealed and cannot act!", actor.name));
        }

        let catalog = Arc::clone(&self.catalog);
        let config = self.config.clone();
        let primary = match action.target() {
            Some(target) if target != actor_id => self
                .combatant(target)
                .cloned()
                .ok_or(ActionError::TargetNotFound)?,
            _ => actor.clone(),
        };
        let plan = plan_action(&action, &actor, catalog.as_ref())?;
        let targets = resolve_targets(
            &actor,
            &primary,
            plan.target_type,
            self.allies.iter().chain(self.enemies.iter()),
        )?;

        let (caster, progress) = {
            let live = find_mut(&mut self.allies, &mut self.enemies, actor_id)
                .ok_or(ActionError::ActorNotFound)?;
            commit(live, &plan)?;
            let progress = record_success(live, &plan, &config);
            (live.clone(), progress)
        };

        let resolver = CombatResolver::new(catalog.as_ref(), &config);
        let mut lines = Vec::with_capacity(targets.len());
        for target_id in targets {
            let Some(target) = find_mut(&mut self.allies, &mut self.enemies, target_id) else {
                continue;
            };
            if !target.is_alive() {
                continue;
            }
            let result =
                resolve_on_target(&caster, target, &plan.technique, &resolver, self.rng.as_mut());
            let defeated = !target.is_alive();
            lines.push(narrate(&caster, &plan, &target.name, &result));
            if defeated {
                self.publish(CombatEvent::CombatantDefeated {
                    combatant: target_id,
                    by: Some(actor_id),
                });
            }
        }

        if let Some(skill) = plan.skill_id.clone() {
            self.publish(CombatEvent::SkillUsed {
                actor: actor_id,
                skill,
            });
        }
        if let Some(MasteryProgress::Evolved { from, to }) = progress {
            info!(actor = %actor_id, %from, %to, "skill evolved");
            self.publish(CombatEvent::SkillEvolved {
                actor: actor_id,
                from,
                to,
            });
        }

        self.finish_turn(actor_id);
        Ok(lines.join("\n"))
    }

    /// Ends the open turn without acting.
    pub fn pass_turn(&mut self) -> Option<TurnUpkeep> {
        let id = self.current?;
        Some(self.finish_turn(id))
    }

    fn finish_turn(&mut self, id: CombatantId) -> TurnUpkeep {
        self.gauges.reset(id);
        self.current = None;

        let Some(combatant) = find_mut(&mut self.allies, &mut self.enemies, id) else {
            return TurnUpkeep::default();
        };
        let was_alive = combatant.is_alive();
        let upkeep = combatant.end_turn();
        if was_alive && !combatant.is_alive() {
            self.publish(CombatEvent::CombatantDefeated {
                combatant: id,
                by: None,
            });
        }
        upkeep
    }

    pub fn outcome(&self) -> Outcome {
        if !self.allies.iter().any(Combatant::is_alive) {
            Outcome::Defeat
        } else if !self.enemies.iter().any(Combatant::is_alive) {
            Outcome::Victory
        } else {
            Outcome::Ongoing
        }
    }

    /// Lets the auto-battle heuristic act for the current combatant.
    ///
    /// Falls back to a basic attack on the weakest enemy when no skill fits,
    /// and passes the turn when even that is rejected. Returns `None` when no
    /// turn is open.
    pub fn auto_step(&mut self) -> Option<String> {
        let actor = self.current_turn_combatant()?.clone();
        let action = {
            let field: Vec<&Combatant> = self.allies.iter().chain(self.enemies.iter()).collect();
            auto_battle::choose_action(
                &actor,
                &field,
                self.catalog.as_ref(),
                &self.config,
                self.rng.as_mut(),
            )
            .or_else(|| basic_attack(&actor, &field))
        };

        let rejected = match action {
            Some(action) => match self.resolve_action(action) {
                Ok(line) => return Some(line),
                Err(err) => Some(err),
            },
            None => None,
        };
        if let Some(err) = rejected {
            debug!(
                actor = %actor.id,
                code = err.error_code(),
                severity = err.severity().as_str(),
                "auto-battle action rejected: {}",
                err
            );
        }
        self.pass_turn();
        Some(format!("{} waits.", actor.name))
    }

    /// Ticks and auto-steps until the battle ends or `max_turns` turns ran.
    pub fn run_auto(&mut self, max_turns: usize) -> Vec<String> {
        let mut log = Vec::new();
        while log.len() < max_turns && self.outcome() == Outcome::Ongoing {
            if self.current.is_none() && !self.advance() {
                break;
            }
            match self.auto_step() {
                Some(line) => log.push(line),
                None => break,
            }
        }
        info!(outcome = ?self.outcome(), turns = log.len(), "battle finished");
        log
    }

    /// Ticks until a turn opens. False when no living combatant can fill its gauge.
    fn advance(&mut self) -> bool {
        let fastest = self
            .allies
            .iter()
            .chain(self.enemies.iter())
            .filter(|combatant| combatant.is_alive())
            .map(Combatant::speed)
            .max()
            .unwrap_or(0);
        if fastest <= 0 || !self.config.atb_runnable() {
            return false;
        }
        while self.tick(1.0).is_none() {}
        true
    }

    fn publish(&self, event: impl Into<Event>) {
        if let Some(bus) = &self.events {
            bus.publish(event);
        }
    }
}

impl std::fmt::Debug for BattleInstance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BattleInstance")
            .field("allies", &self.allies.len())
            .field("enemies", &self.enemies.len())
            .field("current", &self.current)
            .finish_non_exhaustive()
    }
}

fn find_mut<'a>(
    allies: &'a mut [Combatant],
    enemies: &'a mut [Combatant],
    id: CombatantId,
) -> Option<&'a mut Combatant> {
    allies
        .iter_mut()
        .chain(enemies.iter_mut())
        .find(|combatant| combatant.id == id)
}

fn basic_attack(actor: &Combatant, field: &[&Combatant]) -> Option<CombatAction> {
    let target = field
        .iter()
        .filter(|c| c.is_alive() && !actor.is_ally_of(c))
        .min_by_key(|c| (c.hp.current, c.id))?;
    Some(CombatAction::Attack {
        actor: actor.id,
        target: target.id,
    })
}

fn narrate(actor: &Combatant, plan: &ActionPlan<'_>, target: &str, result: &CombatResult) -> String {
    let amount = if result.damage == 0 && result.heal > 0 {
        result.heal
    } else {
        result.damage
    };
    match (&plan.technique, &plan.skill_id) {
        (Technique::Defend, _) => format!("{} defends!", actor.name),
        (Technique::Skill(skill), _) => {
            format!("{} uses {} on {} for {}!", actor.name, skill.name, target, amount)
        }
        (Technique::Basic, Some(id)) => {
            format!("{} uses {} on {} for {}!", actor.name, id, target, amount)
        }
        (Technique::Basic, None) => format!("{} attacks {} for {}!", actor.name, target, amount),
    }
}
