use super::teams::TeamLookup;
use crate::api::models::{Participant, ParticipantFrame, Team, Timeline};
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub struct ParticipantSnapshot {
    pub participant_id: i32,
    pub current_gold: i64,
    pub total_gold: i64,
    pub level: i32,
    pub xp: i64,
    pub cs: i32,
    pub x: i32,
    pub y: i32,
}

impl From<&ParticipantFrame> for ParticipantSnapshot {
    fn from(pf: &ParticipantFrame) -> Self {
        ParticipantSnapshot {
            participant_id: pf.participant_id,
            current_gold: pf.current_gold,
            total_gold: pf.total_gold,
            level: pf.level,
            xp: pf.xp,
            cs: pf.cs(),
            x: pf.x,
            y: pf.y,
        }
    }
}

/// One timeline frame with team gold aggregates.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSummary {
    pub timestamp: i64,
    pub team100_gold: i64,
    pub team200_gold: i64,
    pub team100_adv: i64,
    pub team200_adv: i64,
    pub team100_perc_adv: f64,
    pub team200_perc_adv: f64,
    pub participants: Vec<ParticipantSnapshot>,
}

impl FrameSummary {
    pub fn participant(&self, participant_id: i32) -> Option<&ParticipantSnapshot> {
        self.participants
            .iter()
            .find(|p| p.participant_id == participant_id)
    }

    /// Team ahead in gold, `None` when even.
    pub fn leader(&self) -> Option<Team> {
        match self.team100_adv.signum() {
            1 => Some(Team::Blue),
            -1 => Some(Team::Red),
            _ => None,
        }
    }
}

/// Advantage of `gold` over `other` as a percentage of the trailing total.
/// A zero trailing total yields the sign of the advantage.
pub fn percent_advantage(gold: i64, other: i64) -> f64 {
    let adv = gold - other;
    if adv == 0 {
        return 0.0;
    }

    let trailing = gold.min(other);
    if trailing == 0 {
        return adv.signum() as f64;
    }

    (adv as f64 * 100.0) / trailing as f64
}

pub fn normalize(timeline: &Timeline, participants: &[Participant]) -> Vec<FrameSummary> {
    let teams = TeamLookup::new(participants);

    timeline
        .frames
        .iter()
        .map(|frame| {
            let mut team100_gold = 0;
            let mut team200_gold = 0;

            for pf in &frame.participantframes {
                match teams.team_of(pf.participant_id) {
                    Some(Team::Blue) => team100_gold += pf.total_gold,
                    Some(Team::Red) => team200_gold += pf.total_gold,
                    None => debug!(
                        participant_id = pf.participant_id,
                        timestamp = frame.timestamp,
                        "participant frame has no team, excluded from gold totals"
                    ),
                }
            }

            FrameSummary {
                timestamp: frame.timestamp,
                team100_gold,
                team200_gold,
                team100_adv: team100_gold - team200_gold,
                team200_adv: team200_gold - team100_gold,
                team100_perc_adv: percent_advantage(team100_gold, team200_gold),
                team200_perc_adv: percent_advantage(team200_gold, team100_gold),
                participants: frame
                    .participantframes
                    .iter()
                    .map(ParticipantSnapshot::from)
                    .collect(),
            }
        })
        .collect()
}
