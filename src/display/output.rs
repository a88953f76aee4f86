use crate::analysis::build_order::{EntryKind, PurchaseGroup};
use crate::analysis::champion_timeline::ChampionTimeline;
use crate::analysis::event_timeline::{EventMarker, MarkerKind};
use crate::analysis::kill_recap::DamageSource;
use crate::analysis::normalizer::FrameSummary;
use crate::analysis::skill_order::{SkillOrder, SkillSlot, MAX_LEVEL};
use crate::api::models::{Event, Participant, Team};
use colored::*;
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
struct GoldRow {
    time: String,
    blue: String,
    red: String,
    advantage: String,
    percent: String,
}

#[derive(Tabled)]
struct BuildRow {
    time: String,
    items: String,
}

#[derive(Tabled)]
struct EventRow {
    time: String,
    kind: String,
    team: String,
    event: String,
}

#[derive(Tabled)]
struct ChampionRow {
    time: String,
    level: String,
    gold: String,
    cs: String,
    #[tabled(rename = "gold/min")]
    gold_per_min: String,
    #[tabled(rename = "cs/min")]
    cs_per_min: String,
}

#[derive(Tabled)]
struct RecapRow {
    source: String,
    physical: String,
    magic: String,
    #[tabled(rename = "true")]
    true_damage: String,
    total: String,
}

pub fn format_clock(timestamp_ms: i64) -> String {
    let seconds = timestamp_ms.max(0) / 1000;
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

fn team_label(team: Option<Team>) -> String {
    match team {
        Some(Team::Blue) => "BLUE".blue().bold().to_string(),
        Some(Team::Red) => "RED".red().bold().to_string(),
        None => "-".dimmed().to_string(),
    }
}

pub fn display_header(title: &str, width: usize) {
    println!("\n{}", title.bold().cyan());
    println!("{}\n", "=".repeat(width).cyan());
}

fn print_table<T: Tabled>(rows: Vec<T>) {
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}\n", table);
}

pub fn display_gold_timeline(frames: &[FrameSummary]) {
    display_header("💰 TEAM GOLD", 60);

    if frames.is_empty() {
        println!("{}", "No frames in this timeline".yellow());
        return;
    }

    let rows = frames
        .iter()
        .map(|f| {
            let advantage = match f.leader() {
                Some(Team::Blue) => format!("+{}", f.team100_adv).blue().to_string(),
                Some(Team::Red) => format!("+{}", f.team200_adv).red().to_string(),
                None => "even".dimmed().to_string(),
            };
            let percent = match f.leader() {
                Some(Team::Blue) => format!("{:.1}%", f.team100_perc_adv),
                Some(Team::Red) => format!("{:.1}%", f.team200_perc_adv),
                None => "0.0%".to_string(),
            };
            GoldRow {
                time: format_clock(f.timestamp),
                blue: f.team100_gold.to_string(),
                red: f.team200_gold.to_string(),
                advantage,
                percent,
            }
        })
        .collect();

    print_table::<GoldRow>(rows);
}

pub fn display_build_order(groups: &[PurchaseGroup], player: &str) {
    display_header(&format!("🛒 BUILD ORDER for {}", player), 60);

    if groups.is_empty() {
        println!("{}", "No item purchases recorded".yellow());
        return;
    }

    let rows = groups
        .iter()
        .map(|group| {
            let items = group
                .entries
                .iter()
                .map(|entry| {
                    let item = match entry.kind {
                        EntryKind::Purchased => entry.item_id.to_string(),
                        EntryKind::Sold => format!("sold {}", entry.item_id).red().to_string(),
                    };
                    if entry.count > 1 {
                        format!("{} x{}", item, entry.count)
                    } else {
                        item
                    }
                })
                .collect::<Vec<_>>()
                .join(", ");
            let arrow = if group.has_successor { " →" } else { "" };
            BuildRow {
                time: format_clock(group.timestamp),
                items: format!("{}{}", items, arrow),
            }
        })
        .collect();

    print_table::<BuildRow>(rows);
}

pub fn display_skill_order(order: &SkillOrder, player: &str) {
    display_header(&format!("📈 SKILL ORDER for {}", player), 60);

    if order.levels_taken() == 0 {
        println!("{}", "No skill level-ups recorded".yellow());
        return;
    }

    let sequence: Vec<&str> = (1..=MAX_LEVEL)
        .map(|level| order.slot_at(level).map_or("-", SkillSlot::letter))
        .collect();
    println!("  {} {}\n", "Order:".bold(), sequence.join(" "));

    let matrix = order.matrix();
    let levels: Vec<String> = (1..=MAX_LEVEL).map(|level| format!("{:>3}", level)).collect();
    println!("      {}", levels.join(""));

    for slot in SkillSlot::ALL {
        let column = (slot.slot() - 1) as usize;
        let cells: Vec<String> = matrix
            .iter()
            .map(|row| {
                if row[column] {
                    format!("{:>3}", slot.letter()).green().bold().to_string()
                } else {
                    format!("{:>3}", "·").dimmed().to_string()
                }
            })
            .collect();
        println!("  {} ({:>2}) {}", slot.letter().bold(), order.points(slot), cells.join(""));
    }

    println!();
}

pub fn display_events(markers: &[EventMarker], participants: &[Participant]) {
    display_header("⚔️ MATCH EVENTS", 70);

    if markers.is_empty() {
        println!("{}", "No major events recorded".yellow());
        return;
    }

    let name_of = |participant_id: i32| {
        participants
            .iter()
            .find(|p| p.participant_id == participant_id)
            .map(|p| p.display_name())
    };

    let rows = markers
        .iter()
        .map(|marker| {
            let event = match (&marker.event, marker.kind) {
                (Event::ChampionKill(kill), MarkerKind::ChampionKill) => {
                    match (name_of(kill.killer_id), name_of(kill.victim_id)) {
                        (Some(killer), Some(victim)) => format!("{} killed {}", killer, victim),
                        _ => marker.label.clone(),
                    }
                }
                _ => marker.label.clone(),
            };
            EventRow {
                time: format_clock(marker.timestamp),
                kind: marker.kind.label().to_string(),
                team: team_label(marker.team),
                event,
            }
        })
        .collect();

    print_table::<EventRow>(rows);
}

pub fn display_champion_timeline(timeline: &ChampionTimeline, player: &str) {
    display_header(&format!("📊 TIMELINE for {}", player), 60);

    if timeline.points.is_empty() {
        println!("{}", "No frames for this participant".yellow());
        return;
    }

    let rows = timeline
        .points
        .iter()
        .map(|p| ChampionRow {
            time: format_clock(p.timestamp),
            level: p.level.to_string(),
            gold: p.total_gold.to_string(),
            cs: p.cs.to_string(),
            gold_per_min: format!("{:.0}", p.gold_per_min),
            cs_per_min: format!("{:.1}", p.cs_per_min),
        })
        .collect();

    print_table::<ChampionRow>(rows);
}

pub fn display_death_recap(timestamp: i64, victim: &str, sources: &[DamageSource]) {
    println!(
        "{} {} died at {}",
        "💀".red(),
        victim.bold(),
        format_clock(timestamp)
    );

    if sources.is_empty() {
        println!("  {}\n", "no damage recorded".dimmed());
        return;
    }

    let rows = sources
        .iter()
        .map(|s| RecapRow {
            source: s.name.clone(),
            physical: s.physical_damage.to_string(),
            magic: s.magic_damage.to_string(),
            true_damage: s.true_damage.to_string(),
            total: s.total().to_string(),
        })
        .collect();

    print_table::<RecapRow>(rows);
}

pub fn display_error(error: &str) {
    eprintln!("{} {}", "❌ Error:".red().bold(), error);
}

pub fn display_info(message: &str) {
    println!("{} {}", "ℹ️".cyan(), message);
}

pub fn display_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

pub fn display_warning(message: &str) {
    println!("{} {}", "⚠️".yellow(), message);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(95_400), "01:35");
        assert_eq!(format_clock(2_700_000), "45:00");
        assert_eq!(format_clock(-5), "00:00");
    }
}
