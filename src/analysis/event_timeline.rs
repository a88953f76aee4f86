use super::classifier::classify;
use super::teams::TeamLookup;
use crate::api::models::{Event, Team, Timeline};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerKind {
    ChampionKill,
    Building,
    TurretPlate,
    EliteMonster,
}

impl MarkerKind {
    pub fn label(self) -> &'static str {
        match self {
            MarkerKind::ChampionKill => "Kill",
            MarkerKind::Building => "Structure",
            MarkerKind::TurretPlate => "Plate",
            MarkerKind::EliteMonster => "Objective",
        }
    }
}

/// A major event placed on the match timeline.
#[derive(Debug, Clone)]
pub struct EventMarker {
    pub frame_index: usize,
    pub timestamp: i64,
    pub kind: MarkerKind,
    pub team: Option<Team>,
    pub label: String,
    pub event: Event,
}

fn describe(event: &Event) -> Option<(MarkerKind, String)> {
    match event {
        Event::ChampionKill(kill) => {
            let label = if kill.killer_id == 0 {
                format!("participant {} executed", kill.victim_id)
            } else {
                format!("participant {} killed participant {}", kill.killer_id, kill.victim_id)
            };
            Some((MarkerKind::ChampionKill, label))
        }
        Event::BuildingKill(building) => {
            let kind = if building.tower_type.is_empty() {
                building.building_type.clone()
            } else {
                building.tower_type.clone()
            };
            Some((MarkerKind::Building, format!("{} {}", building.lane_type, kind)))
        }
        Event::TurretPlateDestroyed(plate) => {
            Some((MarkerKind::TurretPlate, format!("{} plate", plate.lane_type)))
        }
        Event::EliteMonsterKill(monster) => {
            let label = if monster.monster_sub_type.is_empty() {
                monster.monster_type.clone()
            } else {
                monster.monster_sub_type.clone()
            };
            Some((MarkerKind::EliteMonster, label))
        }
        _ => None,
    }
}

fn involves(event: &Event, participant_id: i32) -> bool {
    match event {
        Event::ChampionKill(kill) => kill.killer_id == participant_id || kill.victim_id == participant_id,
        Event::BuildingKill(building) => building.killer_id == participant_id,
        Event::TurretPlateDestroyed(plate) => plate.killer_id == participant_id,
        Event::EliteMonsterKill(monster) => monster.killer_id == participant_id,
        _ => false,
    }
}

/// Kills, structures and objectives in timestamp order, optionally
/// narrowed to the events a selected participant took part in.
pub fn event_markers(
    timeline: &Timeline,
    teams: &TeamLookup,
    selected: Option<i32>,
) -> Vec<EventMarker> {
    let mut markers = Vec::new();

    for (frame_index, frame) in timeline.frames.iter().enumerate() {
        for event in frame.events() {
            if let Some(participant_id) = selected {
                if !involves(&event, participant_id) {
                    continue;
                }
            }
            let Some((kind, label)) = describe(&event) else {
                continue;
            };
            markers.push(EventMarker {
                frame_index,
                timestamp: event.timestamp(),
                kind,
                team: classify(&event, teams),
                label,
                event,
            });
        }
    }

    markers.sort_by_key(|marker| marker.timestamp);
    markers
}

/// Drops markers after frame `last`. `None` means no frame was reached yet.
pub fn up_to_frame(markers: Vec<EventMarker>, last: Option<usize>) -> Vec<EventMarker> {
    match last {
        Some(last) => markers
            .into_iter()
            .filter(|marker| marker.frame_index <= last)
            .collect(),
        None => Vec::new(),
    }
}
