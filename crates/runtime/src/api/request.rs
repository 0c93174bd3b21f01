use serde::{Deserialize, Serialize};

use game_core::{CombatAction, CombatResult, CombatantId, SkillId};

/// "Use skill" request as it arrives from a client session.
///
/// A missing skill id is a basic attack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UseSkillRequest {
    pub player_id: CombatantId,
    #[serde(default)]
    pub skill_id: Option<SkillId>,
    pub target_id: CombatantId,
}

impl UseSkillRequest {
    pub fn new(player_id: CombatantId, skill_id: Option<SkillId>, target_id: CombatantId) -> Self {
        Self {
            player_id,
            skill_id,
            target_id,
        }
    }
}

impl From<UseSkillRequest> for CombatAction {
    fn from(request: UseSkillRequest) -> Self {
        match request.skill_id {
            Some(skill) => CombatAction::UseSkill {
                actor: request.player_id,
                skill,
                target: request.target_id,
            },
            None => CombatAction::Attack {
                actor: request.player_id,
                target: request.target_id,
            },
        }
    }
}

/// Per-target results sent back to the requesting session.
///
/// An empty list means the request was rejected; nothing changed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UseSkillResponse {
    pub results: Vec<CombatResult>,
}

impl UseSkillResponse {
    pub fn is_rejected(&self) -> bool {
        self.results.is_empty()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl From<Vec<CombatResult>> for UseSkillResponse {
    fn from(results: Vec<CombatResult>) -> Self {
        Self { results }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_without_skill_is_a_basic_attack() {
        let request: UseSkillRequest =
            serde_json::from_str(r#"{"player_id": 4, "target_id": 9}"#).unwrap();
        assert_eq!(
            CombatAction::from(request),
            CombatAction::Attack {
                actor: CombatantId(4),
                target: CombatantId(9)
            }
        );
    }

    #[test]
    fn empty_response_marks_a_rejection() {
        let response = UseSkillResponse::from(Vec::new());
        assert!(response.is_rejected());
        assert_eq!(response.to_json().unwrap(), r#"{"results":[]}"#);
    }
}
