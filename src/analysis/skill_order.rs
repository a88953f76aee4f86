use crate::api::models::Timeline;
use tracing::debug;

pub const MAX_LEVEL: usize = 18;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkillSlot {
    Q,
    W,
    E,
    R,
}

impl SkillSlot {
    pub const ALL: [SkillSlot; 4] = [SkillSlot::Q, SkillSlot::W, SkillSlot::E, SkillSlot::R];

    /// Maps the 1-indexed `skill_slot` of a level-up event.
    pub fn from_slot(skill_slot: i32) -> Option<SkillSlot> {
        match skill_slot {
            1 => Some(SkillSlot::Q),
            2 => Some(SkillSlot::W),
            3 => Some(SkillSlot::E),
            4 => Some(SkillSlot::R),
            _ => None,
        }
    }

    pub fn slot(self) -> i32 {
        match self {
            SkillSlot::Q => 1,
            SkillSlot::W => 2,
            SkillSlot::E => 3,
            SkillSlot::R => 4,
        }
    }

    pub fn letter(self) -> &'static str {
        match self {
            SkillSlot::Q => "Q",
            SkillSlot::W => "W",
            SkillSlot::E => "E",
            SkillSlot::R => "R",
        }
    }
}

/// Ability chosen at each champion level.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkillOrder {
    levels: [Option<SkillSlot>; MAX_LEVEL],
}

impl SkillOrder {
    pub fn slot_at(&self, level: usize) -> Option<SkillSlot> {
        if level == 0 || level > MAX_LEVEL {
            return None;
        }
        self.levels[level - 1]
    }

    /// `matrix()[level - 1][slot - 1]` is set when that slot was taken at that level.
    pub fn matrix(&self) -> [[bool; 4]; MAX_LEVEL] {
        let mut matrix = [[false; 4]; MAX_LEVEL];
        for (row, slot) in matrix.iter_mut().zip(self.levels.iter()) {
            if let Some(slot) = slot {
                row[(slot.slot() - 1) as usize] = true;
            }
        }
        matrix
    }

    /// Number of points spent in `slot`.
    pub fn points(&self, slot: SkillSlot) -> usize {
        self.levels.iter().filter(|s| **s == Some(slot)).count()
    }

    pub fn levels_taken(&self) -> usize {
        self.levels.iter().filter(|s| s.is_some()).count()
    }
}

pub fn skill_order(timeline: &Timeline, participant_id: i32) -> SkillOrder {
    let mut order = SkillOrder::default();

    let level_ups = timeline
        .frames
        .iter()
        .flat_map(|frame| frame.skilllevelupevents.iter())
        .filter(|e| e.participant_id == participant_id)
        .filter(|e| !e.level_up_type.eq_ignore_ascii_case("EVOLVE"));

    for (position, event) in level_ups.enumerate() {
        let level = event.level.unwrap_or(position as i32 + 1);
        let Some(slot) = SkillSlot::from_slot(event.skill_slot) else {
            debug!(participant_id, skill_slot = event.skill_slot, "unknown skill slot skipped");
            continue;
        };
        if level < 1 || level as usize > MAX_LEVEL {
            debug!(participant_id, level, "skill level-up outside 1-18 skipped");
            continue;
        }
        order.levels[level as usize - 1] = Some(slot);
    }

    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::{Frame, SkillLevelUpEvent};

    fn level_up(participant_id: i32, skill_slot: i32) -> SkillLevelUpEvent {
        SkillLevelUpEvent {
            participant_id,
            skill_slot,
            level_up_type: "NORMAL".to_string(),
            ..Default::default()
        }
    }

    fn timeline(frames: Vec<Vec<SkillLevelUpEvent>>) -> Timeline {
        Timeline {
            frames: frames
                .into_iter()
                .map(|skilllevelupevents| Frame {
                    skilllevelupevents,
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_positional_levels() {
        let t = timeline(vec![
            vec![level_up(1, 1), level_up(1, 2)],
            vec![level_up(1, 1), level_up(2, 4), level_up(1, 3)],
            vec![level_up(1, 1)],
        ]);
        let order = skill_order(&t, 1);

        assert_eq!(order.slot_at(1), Some(SkillSlot::Q));
        assert_eq!(order.slot_at(2), Some(SkillSlot::W));
        assert_eq!(order.slot_at(3), Some(SkillSlot::Q));
        assert_eq!(order.slot_at(4), Some(SkillSlot::E));
        assert_eq!(order.slot_at(5), Some(SkillSlot::Q));
        assert_eq!(order.slot_at(6), None);
        assert_eq!(order.levels_taken(), 5);
        assert_eq!(order.points(SkillSlot::Q), 3);
    }

    #[test]
    fn test_explicit_level_wins_over_position() {
        let mut late = level_up(1, 4);
        late.level = Some(6);
        let mut early = level_up(1, 1);
        early.level = Some(1);

        // out of order on purpose
        let order = skill_order(&timeline(vec![vec![late, early]]), 1);
        assert_eq!(order.slot_at(1), Some(SkillSlot::Q));
        assert_eq!(order.slot_at(2), None);
        assert_eq!(order.slot_at(6), Some(SkillSlot::R));
    }

    #[test]
    fn test_evolve_and_bad_slots_skipped() {
        let mut evolve = level_up(1, 3);
        evolve.level_up_type = "EVOLVE".to_string();
        let order = skill_order(
            &timeline(vec![vec![level_up(1, 1), evolve, level_up(1, 7), level_up(1, 2)]]),
            1,
        );

        assert_eq!(order.slot_at(1), Some(SkillSlot::Q));
        // the bad slot still used up level 2
        assert_eq!(order.slot_at(2), None);
        assert_eq!(order.slot_at(3), Some(SkillSlot::W));
    }

    #[test]
    fn test_matrix_and_bounds() {
        let order = skill_order(&timeline(vec![vec![level_up(1, 2), level_up(1, 4)]]), 1);
        let matrix = order.matrix();
        assert!(matrix[0][1]);
        assert!(matrix[1][3]);
        assert!(!matrix[2].iter().any(|taken| *taken));
        assert_eq!(order.slot_at(0), None);
        assert_eq!(order.slot_at(19), None);
    }

    #[test]
    fn test_no_events() {
        assert_eq!(skill_order(&Timeline::default(), 1), SkillOrder::default());
    }
}
