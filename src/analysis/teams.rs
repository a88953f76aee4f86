use crate::api::models::{Participant, Team};
use std::collections::HashMap;

/// Participant id -> team, built once per match view.
#[derive(Debug, Clone, Default)]
pub struct TeamLookup {
    teams: HashMap<i32, Team>,
}

impl TeamLookup {
    pub fn new(participants: &[Participant]) -> Self {
        let teams = participants
            .iter()
            .filter_map(|p| p.team().map(|team| (p.participant_id, team)))
            .collect();

        TeamLookup { teams }
    }

    pub fn team_of(&self, participant_id: i32) -> Option<Team> {
        self.teams.get(&participant_id).copied()
    }

    pub fn contains(&self, participant_id: i32) -> bool {
        self.teams.contains_key(&participant_id)
    }
}

#[cfg(test)]
pub(crate) fn roster() -> Vec<Participant> {
    (1..=10)
        .map(|participant_id| Participant {
            participant_id,
            team_id: if participant_id <= 5 { 100 } else { 200 },
            ..Default::default()
        })
        .collect()
}
