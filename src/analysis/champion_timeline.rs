use super::normalizer::FrameSummary;

#[derive(Debug, Clone, PartialEq)]
pub struct ChampionPoint {
    pub timestamp: i64,
    pub minute: f64,
    pub total_gold: i64,
    pub xp: i64,
    pub level: i32,
    pub cs: i32,
    pub gold_per_min: f64,
    pub cs_per_min: f64,
}

/// Chart series for one participant.
#[derive(Debug, Clone, PartialEq)]
pub struct ChampionTimeline {
    pub participant_id: i32,
    pub points: Vec<ChampionPoint>,
}

fn per_minute(value: f64, minute: f64) -> f64 {
    if minute <= 0.0 {
        0.0
    } else {
        value / minute
    }
}

pub fn champion_timeline(frames: &[FrameSummary], participant_id: i32) -> ChampionTimeline {
    let points = frames
        .iter()
        .filter_map(|frame| {
            let snapshot = frame.participant(participant_id)?;
            let minute = frame.timestamp as f64 / 60_000.0;
            Some(ChampionPoint {
                timestamp: frame.timestamp,
                minute,
                total_gold: snapshot.total_gold,
                xp: snapshot.xp,
                level: snapshot.level,
                cs: snapshot.cs,
                gold_per_min: per_minute(snapshot.total_gold as f64, minute),
                cs_per_min: per_minute(snapshot.cs as f64, minute),
            })
        })
        .collect();

    ChampionTimeline {
        participant_id,
        points,
    }
}
