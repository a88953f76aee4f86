use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Team {
    Blue,
    Red,
}

impl Team {
    pub fn from_id(team_id: i32) -> Option<Team> {
        match team_id {
            100 => Some(Team::Blue),
            200 => Some(Team::Red),
            _ => None,
        }
    }

    #[allow(dead_code)]
    pub fn id(self) -> i32 {
        match self {
            Team::Blue => 100,
            Team::Red => 200,
        }
    }

    pub fn opponent(self) -> Team {
        match self {
            Team::Blue => Team::Red,
            Team::Red => Team::Blue,
        }
    }
}

// Participant list for one match
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Participant {
    #[serde(rename = "_id", default)]
    pub id: i64,
    pub participant_id: i32,
    #[serde(default)]
    pub puuid: String,
    #[serde(default)]
    pub summoner_name: String,
    #[serde(default)]
    pub champion_id: i32,
    #[serde(default)]
    pub champion_name: String,
    pub team_id: i32,
    #[serde(default)]
    pub spell_1_id: i32,
    #[serde(default)]
    pub spell_2_id: i32,
}

impl Participant {
    pub fn team(&self) -> Option<Team> {
        Team::from_id(self.team_id)
    }

    pub fn display_name(&self) -> String {
        match (self.summoner_name.is_empty(), self.champion_name.is_empty()) {
            (false, false) => format!("{} ({})", self.summoner_name, self.champion_name),
            (false, true) => self.summoner_name.clone(),
            (true, false) => self.champion_name.clone(),
            (true, true) => format!("Participant {}", self.participant_id),
        }
    }
}

/// Everything needed to render one match detail view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchBundle {
    pub match_id: String,
    pub participants: Vec<Participant>,
    pub timeline: Timeline,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Timeline {
    #[serde(default = "default_frame_interval")]
    pub frame_interval: i64,
    #[serde(default)]
    pub frames: Vec<Frame>,
    #[serde(default)]
    pub bounties: HashMap<String, serde_json::Value>,
    #[serde(default)]
    pub team_bounties: HashMap<String, i64>,
}

fn default_frame_interval() -> i64 {
    60_000
}

impl Timeline {
    /// Index of the last frame at or before `timestamp` (ms).
    pub fn frame_index_at(&self, timestamp: i64) -> Option<usize> {
        self.frames
            .partition_point(|frame| frame.timestamp <= timestamp)
            .checked_sub(1)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Frame {
    pub timestamp: i64,
    pub participantframes: Vec<ParticipantFrame>,
    pub wardkillevents: Vec<WardKillEvent>,
    pub wardplacedevents: Vec<WardPlacedEvent>,
    pub levelupevents: Vec<LevelUpEvent>,
    pub skilllevelupevents: Vec<SkillLevelUpEvent>,
    pub itempurchaseevents: Vec<ItemEvent>,
    pub itemdestroyedevents: Vec<ItemEvent>,
    pub itemsoldevents: Vec<ItemEvent>,
    pub itemundoevents: Vec<ItemUndoEvent>,
    pub turretplatedestroyedevents: Vec<TurretPlateDestroyedEvent>,
    pub elitemonsterkillevents: Vec<EliteMonsterKillEvent>,
    pub championspecialkillevents: Vec<ChampionSpecialKillEvent>,
    pub buildingkillevents: Vec<BuildingKillEvent>,
    pub championkillevents: Vec<ChampionKillEvent>,
}

impl Frame {
    /// All events of this frame as one list, ordered by timestamp.
    pub fn events(&self) -> Vec<Event> {
        let mut events = Vec::new();
        events.extend(self.wardkillevents.iter().cloned().map(Event::WardKill));
        events.extend(self.wardplacedevents.iter().cloned().map(Event::WardPlaced));
        events.extend(self.levelupevents.iter().cloned().map(Event::LevelUp));
        events.extend(self.skilllevelupevents.iter().cloned().map(Event::SkillLevelUp));
        events.extend(self.itempurchaseevents.iter().cloned().map(Event::ItemPurchased));
        events.extend(self.itemdestroyedevents.iter().cloned().map(Event::ItemDestroyed));
        events.extend(self.itemsoldevents.iter().cloned().map(Event::ItemSold));
        events.extend(self.itemundoevents.iter().cloned().map(Event::ItemUndo));
        events.extend(
            self.turretplatedestroyedevents
                .iter()
                .cloned()
                .map(Event::TurretPlateDestroyed),
        );
        events.extend(
            self.elitemonsterkillevents
                .iter()
                .cloned()
                .map(Event::EliteMonsterKill),
        );
        events.extend(
            self.championspecialkillevents
                .iter()
                .cloned()
                .map(Event::ChampionSpecialKill),
        );
        events.extend(self.buildingkillevents.iter().cloned().map(Event::BuildingKill));
        events.extend(self.championkillevents.iter().cloned().map(Event::ChampionKill));

        // stable: ties keep kind order
        events.sort_by_key(|event| event.timestamp());
        events
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticipantFrame {
    pub participant_id: i32,
    pub current_gold: i64,
    pub total_gold: i64,
    pub level: i32,
    pub xp: i64,
    pub minions_killed: i32,
    pub jungle_minions_killed: i32,
    pub x: i32,
    pub y: i32,
    pub total_damage_done: i64,
    pub total_damage_done_to_champions: i64,
    pub total_damage_taken: i64,
}

impl ParticipantFrame {
    pub fn cs(&self) -> i32 {
        self.minions_killed + self.jungle_minions_killed
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "_type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Event {
    WardKill(WardKillEvent),
    WardPlaced(WardPlacedEvent),
    LevelUp(LevelUpEvent),
    SkillLevelUp(SkillLevelUpEvent),
    ItemPurchased(ItemEvent),
    ItemDestroyed(ItemEvent),
    ItemSold(ItemEvent),
    ItemUndo(ItemUndoEvent),
    TurretPlateDestroyed(TurretPlateDestroyedEvent),
    EliteMonsterKill(EliteMonsterKillEvent),
    ChampionSpecialKill(ChampionSpecialKillEvent),
    BuildingKill(BuildingKillEvent),
    ChampionKill(ChampionKillEvent),
}

impl Event {
    pub fn timestamp(&self) -> i64 {
        match self {
            Event::WardKill(e) => e.timestamp,
            Event::WardPlaced(e) => e.timestamp,
            Event::LevelUp(e) => e.timestamp,
            Event::SkillLevelUp(e) => e.timestamp,
            Event::ItemPurchased(e) | Event::ItemDestroyed(e) | Event::ItemSold(e) => e.timestamp,
            Event::ItemUndo(e) => e.timestamp,
            Event::TurretPlateDestroyed(e) => e.timestamp,
            Event::EliteMonsterKill(e) => e.timestamp,
            Event::ChampionSpecialKill(e) => e.timestamp,
            Event::BuildingKill(e) => e.timestamp,
            Event::ChampionKill(e) => e.timestamp,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Event::WardKill(_) => "WARD_KILL",
            Event::WardPlaced(_) => "WARD_PLACED",
            Event::LevelUp(_) => "LEVEL_UP",
            Event::SkillLevelUp(_) => "SKILL_LEVEL_UP",
            Event::ItemPurchased(_) => "ITEM_PURCHASED",
            Event::ItemDestroyed(_) => "ITEM_DESTROYED",
            Event::ItemSold(_) => "ITEM_SOLD",
            Event::ItemUndo(_) => "ITEM_UNDO",
            Event::TurretPlateDestroyed(_) => "TURRET_PLATE_DESTROYED",
            Event::EliteMonsterKill(_) => "ELITE_MONSTER_KILL",
            Event::ChampionSpecialKill(_) => "CHAMPION_SPECIAL_KILL",
            Event::BuildingKill(_) => "BUILDING_KILL",
            Event::ChampionKill(_) => "CHAMPION_KILL",
        }
    }

    /// Participant ids this event references. Id 0 (no participant) is omitted.
    pub fn participant_refs(&self) -> Vec<i32> {
        let ids = match self {
            Event::WardKill(e) => vec![e.killer_id],
            Event::WardPlaced(e) => vec![e.creator_id],
            Event::LevelUp(e) => vec![e.participant_id],
            Event::SkillLevelUp(e) => vec![e.participant_id],
            Event::ItemPurchased(e) | Event::ItemDestroyed(e) | Event::ItemSold(e) => {
                vec![e.participant_id]
            }
            Event::ItemUndo(e) => vec![e.participant_id],
            Event::TurretPlateDestroyed(e) => vec![e.killer_id],
            Event::EliteMonsterKill(e) => vec![e.killer_id],
            Event::ChampionSpecialKill(e) => vec![e.killer_id],
            Event::BuildingKill(e) => vec![e.killer_id],
            Event::ChampionKill(e) => vec![e.killer_id, e.victim_id],
        };
        ids.into_iter().filter(|id| *id != 0).collect()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WardKillEvent {
    pub timestamp: i64,
    pub killer_id: i32,
    pub ward_type: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WardPlacedEvent {
    pub timestamp: i64,
    pub creator_id: i32,
    pub ward_type: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelUpEvent {
    pub timestamp: i64,
    pub participant_id: i32,
    pub level: i32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillLevelUpEvent {
    pub timestamp: i64,
    pub participant_id: i32,
    pub skill_slot: i32,
    pub level_up_type: String, // NORMAL, EVOLVE
    pub level: Option<i32>,
}

/// Shared shape of ITEM_PURCHASED, ITEM_DESTROYED and ITEM_SOLD.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemEvent {
    pub timestamp: i64,
    pub participant_id: i32,
    pub item_id: i32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemUndoEvent {
    pub timestamp: i64,
    pub participant_id: i32,
    pub before_id: i32,
    pub after_id: i32,
    pub gold_gain: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TurretPlateDestroyedEvent {
    pub timestamp: i64,
    pub killer_id: i32,
    pub lane_type: String,
    pub team_id: i32, // team that lost the plate
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EliteMonsterKillEvent {
    pub timestamp: i64,
    pub killer_id: i32,
    pub killer_team_id: i32,
    pub monster_type: String,
    pub monster_sub_type: String,
    pub bounty: i64,
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChampionSpecialKillEvent {
    pub timestamp: i64,
    pub killer_id: i32,
    pub kill_type: String,
    pub multi_kill_length: i32,
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildingKillEvent {
    pub timestamp: i64,
    pub killer_id: i32,
    pub team_id: i32, // team that lost the building
    pub building_type: String,
    pub lane_type: String,
    pub tower_type: String,
    pub bounty: i64,
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChampionKillEvent {
    pub timestamp: i64,
    pub killer_id: i32,
    pub victim_id: i32,
    pub bounty: i64,
    pub shutdown_bounty: i64,
    pub kill_streak_length: i32,
    pub x: i32,
    pub y: i32,
    pub victimdamagereceived_set: Vec<VictimDamage>,
    pub victimdamagedealt_set: Vec<VictimDamage>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VictimDamage {
    pub participant_id: i32,
    pub basic: bool,
    pub magic_damage: i64,
    pub physical_damage: i64,
    pub true_damage: i64,
    pub name: String,
    pub spell_name: String,
    pub spell_slot: i32,
    #[serde(rename = "type")]
    pub damage_type: String,
}
