mod analysis;
mod api;
mod cache;
mod config;
mod display;
mod error;

use analysis::build_order::build_order;
use analysis::champion_timeline::champion_timeline;
use analysis::event_timeline::{event_markers, up_to_frame};
use analysis::kill_recap::death_recap;
use analysis::normalizer::normalize;
use analysis::skill_order::skill_order;
use analysis::teams::TeamLookup;
use analysis::validate::check_timeline;
use anyhow::{Context, Result};
use api::client::MatchApiClient;
use api::models::MatchBundle;
use cache::CachedMatch;
use clap::{Parser, ValueEnum};
use config::Config;
use display::output::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum View {
    Gold,
    Build,
    Skills,
    Events,
    Champion,
    Recap,
    All,
}

impl View {
    fn shows(self, view: View) -> bool {
        self == View::All || self == view
    }
}

#[derive(Parser, Debug)]
#[command(name = "lol_timeline")]
#[command(about = "Gold, build, skill and event views for a League of Legends match timeline", long_about = None)]
struct Args {
    /// Match id to fetch from the match API
    #[arg(required_unless_present = "file")]
    match_id: Option<String>,

    /// Read a match bundle (match_id, participants, timeline) from a JSON file
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Participant whose build, skills and stats are shown
    #[arg(short, long, default_value = "1")]
    participant: i32,

    /// Only list events the selected participant took part in
    #[arg(long)]
    focus: bool,

    /// Which view to print
    #[arg(short, long, value_enum, default_value = "all")]
    view: View,

    /// Stop the gold, champion and event views at this game minute
    #[arg(long)]
    at: Option<u32>,

    /// Force refresh from the match API (ignore cache)
    #[arg(long)]
    refresh: bool,
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lol_timeline=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    if let Err(e) = run(args) {
        display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn load_from_file(path: &Path) -> Result<MatchBundle> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

fn load_from_api(match_id: &str, refresh: bool) -> Result<MatchBundle> {
    let config = Config::from_env()?;
    let cache_dir = CachedMatch::cache_dir();

    if !refresh {
        match CachedMatch::load(&cache_dir, match_id) {
            Ok(Some(cached)) if !cached.is_stale(config.cache_max_age_mins) => {
                info!(match_id, cached_at = %cached.cached_at, "using cached match");
                display_success("⚡ Loaded match from cache");
                return Ok(cached.bundle);
            }
            Ok(Some(_)) => info!(match_id, "cached match is stale"),
            Ok(None) => {}
            Err(e) => warn!(match_id, error = %e, "ignoring unreadable cache entry"),
        }
    }

    display_info(&format!("Fetching match {} from {}", match_id, config.api_url));

    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
        pb.set_style(style);
    }
    pb.set_message("Fetching participants and timeline");
    pb.enable_steady_tick(Duration::from_millis(100));

    let client = MatchApiClient::new(config);
    let fetched = client.get_match_bundle(match_id);
    pb.finish_and_clear();
    let bundle = fetched?;

    display_success(&format!(
        "Fetched {} participants, {} frames",
        bundle.participants.len(),
        bundle.timeline.frames.len()
    ));

    let cached = CachedMatch::new(bundle);
    match cached.save(&cache_dir) {
        Ok(path) => info!(path = %path.display(), "match cached"),
        Err(e) => warn!(error = %e, "failed to cache match"),
    }

    Ok(cached.bundle)
}

fn run(args: Args) -> Result<()> {
    let bundle = match (&args.file, &args.match_id) {
        (Some(path), _) => load_from_file(path)?,
        (None, Some(match_id)) => load_from_api(match_id, args.refresh)?,
        (None, None) => anyhow::bail!("Provide a MATCH_ID or --file"),
    };

    let issues = check_timeline(&bundle.timeline, &bundle.participants);
    for issue in &issues {
        warn!(match_id = %bundle.match_id, "{}", issue);
    }
    if !issues.is_empty() {
        display_warning(&format!(
            "{} timeline inconsistencies found, some views may be incomplete",
            issues.len()
        ));
    }

    let selected = args.participant;
    let player = match bundle
        .participants
        .iter()
        .find(|p| p.participant_id == selected)
    {
        Some(participant) => participant.display_name(),
        None => {
            display_warning(&format!("Participant {} is not in this match", selected));
            format!("Participant {}", selected)
        }
    };

    let teams = TeamLookup::new(&bundle.participants);
    let mut frames = normalize(&bundle.timeline, &bundle.participants);
    let cutoff = args
        .at
        .map(|minute| bundle.timeline.frame_index_at(minute as i64 * 60_000));
    if let Some(last) = cutoff {
        frames.truncate(last.map_or(0, |index| index + 1));
    }

    if args.view.shows(View::Gold) {
        display_gold_timeline(&frames);
    }

    if args.view.shows(View::Build) {
        display_build_order(&build_order(&bundle.timeline, selected), &player);
    }

    if args.view.shows(View::Skills) {
        display_skill_order(&skill_order(&bundle.timeline, selected), &player);
    }

    if args.view.shows(View::Champion) {
        display_champion_timeline(&champion_timeline(&frames, selected), &player);
    }

    if args.view.shows(View::Events) {
        let focus = args.focus.then_some(selected);
        let mut markers = event_markers(&bundle.timeline, &teams, focus);
        if let Some(last) = cutoff {
            markers = up_to_frame(markers, last);
        }
        display_events(&markers, &bundle.participants);
    }

    if args.view.shows(View::Recap) {
        display_header(&format!("💀 DEATHS of {}", player), 60);
        let mut deaths = 0;
        for frame in &bundle.timeline.frames {
            for kill in frame.championkillevents.iter().filter(|k| k.victim_id == selected) {
                display_death_recap(kill.timestamp, &player, &death_recap(kill));
                deaths += 1;
            }
        }
        if deaths == 0 {
            display_success("No deaths");
        }
    }

    Ok(())
}
