use super::teams::TeamLookup;
use crate::api::models::{Event, Team};

/// Team an event favours, for colouring. `None` means neutral.
pub fn classify(event: &Event, teams: &TeamLookup) -> Option<Team> {
    match event {
        // attributed by the victim even for executions (killer_id 0)
        Event::ChampionKill(kill) => teams.team_of(kill.victim_id).map(Team::opponent),
        Event::BuildingKill(building) => {
            if building.killer_id == 0 {
                return None;
            }
            Team::from_id(building.team_id).map(Team::opponent)
        }
        Event::TurretPlateDestroyed(plate) => {
            if plate.killer_id == 0 {
                return None;
            }
            Team::from_id(plate.team_id).map(Team::opponent)
        }
        Event::EliteMonsterKill(monster) => {
            if monster.killer_id == 0 {
                return None;
            }
            Team::from_id(monster.killer_team_id)
        }
        Event::ChampionSpecialKill(special) => teams.team_of(special.killer_id),
        _ => None,
    }
}
