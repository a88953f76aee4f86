use crate::api::models::{Frame, ItemEvent, ItemUndoEvent, Timeline};
use std::collections::HashMap;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    Purchased,
    Sold,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildEntry {
    pub item_id: i32,
    pub kind: EntryKind,
    pub count: i64,
}

/// Item changes of one participant inside one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseGroup {
    pub frame_index: usize,
    pub timestamp: i64,
    pub entries: Vec<BuildEntry>,
    /// Another raw group follows, even if it resolved to nothing.
    pub has_successor: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum EntryKey {
    Purchased(i32),
    Sold(i32),
    Undo(i32, i32),
}

#[derive(Debug, Clone, Copy)]
enum ItemChange<'a> {
    Purchased(&'a ItemEvent),
    Sold(&'a ItemEvent),
    Undo(&'a ItemUndoEvent),
}

impl ItemChange<'_> {
    fn timestamp(&self) -> i64 {
        match self {
            ItemChange::Purchased(e) | ItemChange::Sold(e) => e.timestamp,
            ItemChange::Undo(e) => e.timestamp,
        }
    }

    fn key(&self) -> EntryKey {
        match self {
            ItemChange::Purchased(e) => EntryKey::Purchased(e.item_id),
            ItemChange::Sold(e) => EntryKey::Sold(e.item_id),
            ItemChange::Undo(e) => EntryKey::Undo(e.before_id, e.after_id),
        }
    }
}

fn item_changes(frame: &Frame, participant_id: i32) -> Vec<ItemChange<'_>> {
    let mut changes: Vec<ItemChange> = frame
        .itempurchaseevents
        .iter()
        .filter(|e| e.participant_id == participant_id)
        .map(ItemChange::Purchased)
        .chain(
            frame
                .itemsoldevents
                .iter()
                .filter(|e| e.participant_id == participant_id)
                .map(ItemChange::Sold),
        )
        .chain(
            frame
                .itemundoevents
                .iter()
                .filter(|e| e.participant_id == participant_id)
                .map(ItemChange::Undo),
        )
        .collect();

    changes.sort_by_key(|change| change.timestamp());
    changes
}

/// Counts entries, cancels undone purchases and drops what nets to nothing.
fn resolve_group(changes: &[ItemChange]) -> Vec<BuildEntry> {
    // item id -> purchases still to cancel
    let mut pending: HashMap<i32, i64> = HashMap::new();
    for change in changes {
        if let ItemChange::Undo(undo) = change {
            if undo.after_id == 0 {
                *pending.entry(undo.before_id).or_insert(0) += 1;
            } else if undo.before_id == 0 {
                *pending.entry(undo.after_id).or_insert(0) -= 1;
            } else {
                debug!(
                    before_id = undo.before_id,
                    after_id = undo.after_id,
                    "undo swaps two items, not reconciled"
                );
            }
        }
    }

    let mut order: Vec<EntryKey> = Vec::new();
    let mut counts: HashMap<EntryKey, i64> = HashMap::new();
    for change in changes {
        let key = change.key();
        let count = counts.entry(key).or_insert(0);
        if *count == 0 {
            order.push(key);
        }
        *count += 1;
    }

    for change in changes {
        let ItemChange::Purchased(purchase) = change else {
            continue;
        };
        if let Some(remaining) = pending.get_mut(&purchase.item_id) {
            if *remaining > 0 {
                *remaining -= 1;
                if let Some(count) = counts.get_mut(&EntryKey::Purchased(purchase.item_id)) {
                    *count -= 1;
                }
            }
        }
    }

    order
        .into_iter()
        .filter_map(|key| {
            let count = counts.get(&key).copied().unwrap_or(0);
            if count <= 0 {
                return None;
            }
            let (item_id, kind) = match key {
                EntryKey::Purchased(item_id) => (item_id, EntryKind::Purchased),
                EntryKey::Sold(item_id) => (item_id, EntryKind::Sold),
                EntryKey::Undo(..) => return None,
            };
            Some(BuildEntry {
                item_id,
                kind,
                count,
            })
        })
        .collect()
}

/// Replays a participant's purchases, sales and undos into per-frame groups.
pub fn build_order(timeline: &Timeline, participant_id: i32) -> Vec<PurchaseGroup> {
    let raw: Vec<(usize, Vec<ItemChange>)> = timeline
        .frames
        .iter()
        .enumerate()
        .map(|(frame_index, frame)| (frame_index, item_changes(frame, participant_id)))
        .filter(|(_, changes)| !changes.is_empty())
        .collect();

    let raw_len = raw.len();

    raw.into_iter()
        .enumerate()
        .filter_map(|(position, (frame_index, changes))| {
            let entries = resolve_group(&changes);
            if entries.is_empty() {
                debug!(frame_index, participant_id, "purchase group cancelled out");
                return None;
            }
            Some(PurchaseGroup {
                frame_index,
                timestamp: changes[0].timestamp(),
                entries,
                has_successor: position + 1 < raw_len,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn purchase(timestamp: i64, participant_id: i32, item_id: i32) -> ItemEvent {
        ItemEvent {
            timestamp,
            participant_id,
            item_id,
        }
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

    fn timeline_with(frames: Vec<Frame>) -> Timeline {
        Timeline {
            frames,
            ..Default::default()
        }
    }

    fn empty_frame(index: i64) -> Frame {
        Frame {
            timestamp: index * 60_000,
            ..Default::default()
        }
    }

    #[test]
    fn test_purchase_then_undo_leaves_no_group() {
        let mut frames: Vec<Frame> = (0..5).map(empty_frame).collect();
        frames[3].itempurchaseevents = vec![purchase(185_000, 1, 1001)];
        frames[3].itemundoevents = vec![undo(187_000, 1, 1001, 0)];

        assert!(build_order(&timeline_with(frames), 1).is_empty());
    }

    #[test]
    fn test_undo_only_cancels_the_undone_item() {
        let mut frames: Vec<Frame> = (0..2).map(empty_frame).collect();
        frames[1].itempurchaseevents = vec![
            purchase(61_000, 1, 1001),
            purchase(62_000, 1, 2003),
        ];
        frames[1].itemundoevents = vec![undo(63_000, 1, 1001, 0)];

        let groups = build_order(&timeline_with(frames), 1);
        assert_eq!(groups.len(), 1);
        assert_eq!(
            groups[0].entries,
            vec![BuildEntry {
                item_id: 2003,
                kind: EntryKind::Purchased,
                count: 1
            }]
        );
        assert!(groups[0].entries.iter().all(|e| e.item_id != 1001));
    }

    #[test]
    fn test_duplicate_purchases_are_counted() {
        let mut frames: Vec<Frame> = (0..6).map(empty_frame).collect();
        frames[5].itempurchaseevents = vec![
            purchase(301_000, 1, 1001),
            purchase(302_000, 1, 1001),
        ];

        let groups = build_order(&timeline_with(frames), 1);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].frame_index, 5);
        assert_eq!(groups[0].timestamp, 301_000);
        assert_eq!(
            groups[0].entries,
            vec![BuildEntry {
                item_id: 1001,
                kind: EntryKind::Purchased,
                count: 2
            }]
        );
    }

    #[test]
    fn test_one_undo_cancels_one_of_two_purchases() {
        let mut frames = vec![empty_frame(0)];
        frames[0].itempurchaseevents = vec![purchase(1_000, 2, 2003), purchase(2_000, 2, 2003)];
        frames[0].itemundoevents = vec![undo(3_000, 2, 2003, 0)];

        let groups = build_order(&timeline_with(frames), 2);
        assert_eq!(groups[0].entries[0].count, 1);
    }

    #[test]
    fn test_sales_and_other_participants() {
        let mut frames: Vec<Frame> = (0..3).map(empty_frame).collect();
        frames[1].itempurchaseevents = vec![purchase(70_000, 1, 1055), purchase(71_000, 4, 1054)];
        frames[2].itemsoldevents = vec![purchase(130_000, 1, 1055)];
        frames[2].itemundoevents = vec![undo(131_000, 1, 0, 1055)];

        let groups = build_order(&timeline_with(frames), 1);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].entries.len(), 1);
        assert_eq!(groups[0].entries[0].item_id, 1055);
        // sale undo never cancels anything, the sale stays visible
        assert_eq!(groups[1].entries[0].kind, EntryKind::Sold);
        assert_eq!(groups[1].entries[0].count, 1);
    }

    #[test]
    fn test_undo_in_later_frame_is_not_reconciled() {
        let mut frames: Vec<Frame> = (0..3).map(empty_frame).collect();
        frames[1].itempurchaseevents = vec![purchase(119_000, 1, 1001)];
        frames[2].itemundoevents = vec![undo(121_000, 1, 1001, 0)];

        let groups = build_order(&timeline_with(frames), 1);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].frame_index, 1);
        assert_eq!(groups[0].entries[0].count, 1);
        // the undo-only group was dropped but still counts as a successor
        assert!(groups[0].has_successor);
    }

    #[test]
    fn test_has_successor_on_last_group() {
        let mut frames: Vec<Frame> = (0..3).map(empty_frame).collect();
        frames[0].itempurchaseevents = vec![purchase(1_000, 1, 1055)];
        frames[2].itempurchaseevents = vec![purchase(125_000, 1, 3006)];

        let groups = build_order(&timeline_with(frames), 1);
        assert!(groups[0].has_successor);
        assert!(!groups[1].has_successor);
    }

    #[test]
    fn test_rerun_gives_same_result() {
        let mut frames: Vec<Frame> = (0..2).map(empty_frame).collect();
        frames[1].itempurchaseevents = vec![purchase(61_000, 1, 1001), purchase(62_000, 1, 1001)];
        frames[1].itemundoevents = vec![undo(63_000, 1, 1001, 0)];
        let timeline = timeline_with(frames);

        assert_eq!(build_order(&timeline, 1), build_order(&timeline, 1));
    }

    #[test]
    fn test_empty_timeline() {
        assert!(build_order(&Timeline::default(), 1).is_empty());
    }
}
