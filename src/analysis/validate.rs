use super::teams::TeamLookup;
use crate::api::models::{Participant, Timeline};
use std::collections::HashSet;
use thiserror::Error;

/// Inconsistencies found in a fetched timeline. None of them stop rendering.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimelineIssue {
    #[error("frame {index} at {timestamp}ms does not come after the previous frame")]
    FrameOutOfOrder { index: usize, timestamp: i64 },

    #[error("{kind} at {timestamp}ms references unknown participant {participant_id}")]
    UnknownParticipant {
        kind: &'static str,
        timestamp: i64,
        participant_id: i32,
    },

    #[error("item undo at {timestamp}ms by participant {participant_id} has no earlier purchase or sale")]
    OrphanUndo { timestamp: i64, participant_id: i32 },
}

/// Participants without a team 100/200 count as unknown references.
pub fn check_timeline(timeline: &Timeline, participants: &[Participant]) -> Vec<TimelineIssue> {
    let mut issues = Vec::new();
    let teams = TeamLookup::new(participants);

    for (index, pair) in timeline.frames.windows(2).enumerate() {
        if pair[1].timestamp <= pair[0].timestamp {
            issues.push(TimelineIssue::FrameOutOfOrder {
                index: index + 1,
                timestamp: pair[1].timestamp,
            });
        }
    }

    // (participant, item, is_sale) seen so far
    let mut history: HashSet<(i32, i32, bool)> = HashSet::new();

    for frame in &timeline.frames {
        if !participants.is_empty() {
            for event in frame.events() {
                for participant_id in event.participant_refs() {
                    if !teams.contains(participant_id) {
                        issues.push(TimelineIssue::UnknownParticipant {
                            kind: event.kind(),
                            timestamp: event.timestamp(),
                            participant_id,
                        });
                    }
                }
            }
        }

        let mut changes: Vec<(i64, i32, i32, bool)> = frame
            .itempurchaseevents
            .iter()
            .map(|e| (e.timestamp, e.participant_id, e.item_id, false))
            .chain(
                frame
                    .itemsoldevents
                    .iter()
                    .map(|e| (e.timestamp, e.participant_id, e.item_id, true)),
            )
            .collect();
        changes.sort_by_key(|change| change.0);

        let mut undos: Vec<_> = frame.itemundoevents.iter().collect();
        undos.sort_by_key(|undo| undo.timestamp);

        let mut next_change = 0;
        for undo in undos {
            while next_change < changes.len() && changes[next_change].0 <= undo.timestamp {
                let (_, participant_id, item_id, is_sale) = changes[next_change];
                history.insert((participant_id, item_id, is_sale));
                next_change += 1;
            }

            let matched = if undo.after_id == 0 {
                history.contains(&(undo.participant_id, undo.before_id, false))
            } else if undo.before_id == 0 {
                history.contains(&(undo.participant_id, undo.after_id, true))
            } else {
                history.iter().any(|(participant_id, _, _)| *participant_id == undo.participant_id)
            };

            if !matched {
                issues.push(TimelineIssue::OrphanUndo {
                    timestamp: undo.timestamp,
                    participant_id: undo.participant_id,
                });
            }
        }

        for &(_, participant_id, item_id, is_sale) in &changes[next_change..] {
            history.insert((participant_id, item_id, is_sale));
        }
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::teams::roster;
    use crate::api::models::*;

    #[test]
    fn test_clean_timeline_has_no_issues() {
        let timeline = Timeline {
            frames: vec![
                Frame {
                    timestamp: 0,
                    itempurchaseevents: vec![ItemEvent {
                        timestamp: 1_000,
                        participant_id: 1,
                        item_id: 1055,
                    }],
                    ..Default::default()
                },
                Frame {
                    timestamp: 60_000,
                    itemundoevents: vec![ItemUndoEvent {
                        timestamp: 61_000,
                        participant_id: 1,
                        before_id: 1055,
                        after_id: 0,
                        gold_gain: 450,
                    }],
                    ..Default::default()
                },
            ],
            ..Default::default()
        };
        assert!(check_timeline(&timeline, &roster()).is_empty());
    }

    fn undo(timestamp: i64, participant_id: i32, before_id: i32, after_id: i32) -> ItemUndoEvent {
        ItemUndoEvent {
            timestamp,
            participant_id,
            before_id,
            after_id,
            gold_gain: 0,
        }
    }

    fn item(timestamp: i64, participant_id: i32, item_id: i32) -> ItemEvent {
        ItemEvent {
            timestamp,
            participant_id,
            item_id,
        }
    }

    #[test]
    fn test_sale_undo_matches_earlier_sale() {
        let timeline = Timeline {
            frames: vec![Frame {
                timestamp: 0,
                itempurchaseevents: vec![item(1_000, 2, 1055)],
                itemsoldevents: vec![item(5_000, 2, 1055)],
                itemundoevents: vec![undo(6_000, 2, 0, 1055)],
                ..Default::default()
            }],
            ..Default::default()
        };
        assert!(check_timeline(&timeline, &roster()).is_empty());
    }

    #[test]
    fn test_sale_undo_without_sale_is_orphan() {
        // a purchase of the same item does not count as a sale
        let timeline = Timeline {
            frames: vec![Frame {
                timestamp: 0,
                itempurchaseevents: vec![item(1_000, 2, 1055)],
                itemundoevents: vec![undo(2_000, 2, 0, 1055)],
                ..Default::default()
            }],
            ..Default::default()
        };
        assert_eq!(
            check_timeline(&timeline, &roster()),
            vec![TimelineIssue::OrphanUndo {
                timestamp: 2_000,
                participant_id: 2
            }]
        );
    }

    #[test]
    fn test_item_swap_undo_needs_any_earlier_change() {
        let timeline = Timeline {
            frames: vec![
                Frame {
                    timestamp: 0,
                    itempurchaseevents: vec![item(1_000, 4, 3006)],
                    itemundoevents: vec![undo(2_000, 4, 3006, 1001), undo(2_500, 5, 3006, 1001)],
                    ..Default::default()
                },
                Frame {
                    timestamp: 60_000,
                    itemundoevents: vec![undo(61_000, 4, 1001, 3006)],
                    ..Default::default()
                },
            ],
            ..Default::default()
        };
        assert_eq!(
            check_timeline(&timeline, &roster()),
            vec![TimelineIssue::OrphanUndo {
                timestamp: 2_500,
                participant_id: 5
            }]
        );
    }

    #[test]
    fn test_participant_without_team_is_unknown() {
        let mut participants = roster();
        participants[0].team_id = 0;
        let timeline = Timeline {
            frames: vec![Frame {
                timestamp: 0,
                itempurchaseevents: vec![item(1_000, 1, 1055)],
                ..Default::default()
            }],
            ..Default::default()
        };
        assert_eq!(
            check_timeline(&timeline, &participants),
            vec![TimelineIssue::UnknownParticipant {
                kind: "ITEM_PURCHASED",
                timestamp: 1_000,
                participant_id: 1
            }]
        );
    }

    #[test]
    fn test_reports_each_issue_kind() {
        let timeline = Timeline {
            frames: vec![
                Frame {
                    timestamp: 60_000,
                    championkillevents: vec![ChampionKillEvent {
                        timestamp: 61_000,
                        killer_id: 12,
                        victim_id: 1,
                        ..Default::default()
                    }],
                    ..Default::default()
                },
                Frame {
                    timestamp: 60_000,
                    itemundoevents: vec![ItemUndoEvent {
                        timestamp: 62_000,
                        participant_id: 3,
                        before_id: 3006,
                        after_id: 0,
                        gold_gain: 0,
                    }],
                    ..Default::default()
                },
            ],
            ..Default::default()
        };

        let issues = check_timeline(&timeline, &roster());
        assert_eq!(
            issues,
            vec![
                TimelineIssue::FrameOutOfOrder {
                    index: 1,
                    timestamp: 60_000
                },
                TimelineIssue::UnknownParticipant {
                    kind: "CHAMPION_KILL",
                    timestamp: 61_000,
                    participant_id: 12
                },
                TimelineIssue::OrphanUndo {
                    timestamp: 62_000,
                    participant_id: 3
                },
            ]
        );
        assert!(issues[2].to_string().contains("participant 3"));
    }

    #[test]
    fn test_empty_inputs() {
        assert!(check_timeline(&Timeline::default(), &[]).is_empty());
    }
}
