//! NeuroTrack CLI
//!
//! Command-line interface for NeuroTrack:
//! - Count habits with trackers
//! - Log sensory input and moods
//! - Manage the daily routine
//! - Render charts and export logs

use anyhow::{bail, Context};
use chrono::{Local, TimeZone};
use clap::{Args, Parser, Subcommand};
use neurotrack::app::{App, NewTracker, SensoryForm};
use neurotrack::catalog;
use neurotrack::chart::{format_value, ChartData, ChartRenderer, SvgSurface};
use neurotrack::config::Config;
use neurotrack::model::{
    DefaultView, RoutineTaskUpdate, SensoryType, Theme, TimeOfDay, TrackerCategory,
};
use neurotrack::stats::{self, Period};
use neurotrack::storage::DirectoryStore;
use neurotrack::views::{shortcut_hints, KeyPress, Platform};
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "neurotrack")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Self-tracking for neurodivergent people")]
#[command(long_about = "NeuroTrack keeps habit counters, a sensory log, a mood log and a daily routine.\nEverything is stored locally as JSON.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Data directory (overrides config)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Config file (default: search the usual locations)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List trackers
    Trackers,

    /// Change tracker counts or add a tracker
    #[command(subcommand)]
    Track(TrackCommand),

    /// Sensory log
    #[command(subcommand)]
    Sensory(SensoryCommand),

    /// Mood log
    #[command(subcommand)]
    Mood(MoodCommand),

    /// Daily routine checklist
    #[command(subcommand)]
    Routine(RoutineCommand),

    /// Show or change preferences
    #[command(subcommand)]
    Prefs(PrefsCommand),

    /// Tracker summary and routine completion
    Stats,

    /// Render a chart as SVG
    Chart(ChartArgs),

    /// Resolve a keyboard shortcut to a view
    View {
        /// Key pressed together with the modifier
        key: String,
        /// Hold Ctrl
        #[arg(long)]
        ctrl: bool,
        /// Hold Cmd / Meta
        #[arg(long)]
        meta: bool,
    },

    /// Export the sensory log (or mood log) as CSV
    Export {
        /// Export moods instead of sensory entries
        #[arg(long)]
        moods: bool,
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum TrackCommand {
    /// Add a tracker
    Add {
        name: String,
        #[arg(long)]
        icon: String,
        #[arg(long)]
        unit: String,
        /// blue, purple, green or a hex colour
        #[arg(long, default_value = "blue")]
        color: String,
        #[arg(long)]
        category: Option<TrackerCategory>,
    },
    /// Add the "New Tracker" placeholder
    Placeholder,
    /// Increment a tracker
    Inc { id: String },
    /// Decrement a tracker (never below zero)
    Dec { id: String },
}

#[derive(Subcommand)]
pub enum SensoryCommand {
    /// Log a sensory event
    Log {
        kind: SensoryType,
        /// 1 (mild) to 10 (intense)
        #[arg(short, long, default_value_t = 5, value_parser = clap::value_parser!(u8).range(1..=10))]
        intensity: u8,
        #[arg(short, long)]
        trigger: Option<String>,
        /// Coping strategy used (repeatable)
        #[arg(short, long)]
        coping: Vec<String>,
        #[arg(short, long)]
        notes: Option<String>,
    },
    /// One-tap log with the preset intensity
    Quick { kind: SensoryType },
    /// Last five entries, newest first
    Recent,
    /// Sensory categories with triggers and coping strategies
    Categories,
}

#[derive(Subcommand)]
pub enum MoodCommand {
    /// Log a mood by id or quick-key
    Log { mood: String },
    /// Last five moods, newest first
    Recent,
    /// Today's mood summary
    Stats,
    /// Available moods
    List,
}

#[derive(Subcommand)]
pub enum RoutineCommand {
    /// Add a task
    Add {
        name: String,
        #[arg(short, long, default_value = "morning")]
        time: TimeOfDay,
    },
    /// Toggle completion
    Toggle { id: String },
    /// Delete a task
    Delete { id: String },
    /// Change fields of a task
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(short, long)]
        time: Option<TimeOfDay>,
        /// Minutes
        #[arg(long)]
        duration: Option<u32>,
        #[arg(long)]
        difficulty: Option<u8>,
        /// Support used for the task (repeatable)
        #[arg(long)]
        supports: Vec<String>,
    },
    /// List tasks by time of day
    List,
}

#[derive(Subcommand)]
pub enum PrefsCommand {
    Show,
    Set {
        #[arg(long)]
        theme: Option<Theme>,
        #[arg(long)]
        view: Option<DefaultView>,
        #[arg(long)]
        notifications: Option<bool>,
        /// HH:MM
        #[arg(long)]
        reminder: Option<String>,
        #[arg(long)]
        transition_alerts: Option<bool>,
    },
}

#[derive(Args)]
pub struct ChartArgs {
    /// Output file, or directory with --frames (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Write every animation frame instead of the final one
    #[arg(long)]
    frames: bool,
    /// Disable the draw-in animation
    #[arg(long)]
    no_animate: bool,
    /// Chart one tracker's history instead of all tracker counts
    #[arg(long, conflicts_with = "sensory")]
    tracker: Option<String>,
    /// Chart sensory entries per period bucket
    #[arg(long)]
    sensory: bool,
    #[arg(short, long, default_value = "week")]
    period: Period,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if let Some(dir) = &cli.data_dir {
        config.storage.data_dir = dir.to_string_lossy().to_string();
    }
    config.logging.init();

    if let Commands::Config { output } = &cli.command {
        return write_output(output.as_deref(), &neurotrack::config::generate_default_config());
    }

    let store = DirectoryStore::open(config.storage.data_path())
        .with_context(|| format!("opening data directory {}", config.storage.data_dir))?;
    let mut app = App::open(store)?;
    let json = cli.format.eq_ignore_ascii_case("json");

    match cli.command {
        Commands::Trackers => {
            if json {
                return print_json(app.trackers());
            }
            println!("{:<4} {:<24} {:>8} {:<14} {:>6}", "ID", "Name", "Count", "Unit", "Trend");
            println!("{}", "-".repeat(60));
            for t in app.trackers() {
                println!(
                    "{:<4} {:<24} {:>8} {:<14} {:>6}",
                    t.id,
                    format!("{} {}", t.icon, t.name),
                    t.count,
                    t.unit,
                    t.trend_label()
                );
            }
        }

        Commands::Track(action) => {
            let (tracker, count) = match action {
                TrackCommand::Add {
                    name,
                    icon,
                    unit,
                    color,
                    category,
                } => {
                    let t = app.add_tracker(NewTracker {
                        name,
                        icon,
                        unit,
                        color,
                        category,
                    })?;
                    println!("Added tracker {} ({})", t.name, t.id);
                    return Ok(());
                }
                TrackCommand::Placeholder => {
                    let t = app.add_placeholder_tracker()?;
                    println!("Added tracker {} ({})", t.name, t.id);
                    return Ok(());
                }
                TrackCommand::Inc { id } => {
                    let count = app.increment(&id)?;
                    (id, count)
                }
                TrackCommand::Dec { id } => {
                    let count = app.decrement(&id)?;
                    (id, count)
                }
            };
            println!("{}: {}", tracker, count);
        }

        Commands::Sensory(action) => match action {
            SensoryCommand::Log {
                kind,
                intensity,
                trigger,
                coping,
                notes,
            } => {
                let entry = app.log_sensory(SensoryForm {
                    kind,
                    intensity,
                    trigger,
                    coping,
                    notes,
                })?;
                println!("Logged {} intensity {} ({})", entry.kind, entry.intensity, entry.id);
            }
            SensoryCommand::Quick { kind } => {
                let entry = app.quick_sensory(kind)?;
                println!("Logged {} intensity {} ({})", entry.kind, entry.intensity, entry.id);
            }
            SensoryCommand::Recent => {
                let recent = app.recent_sensory();
                if json {
                    return print_json(&recent);
                }
                if recent.is_empty() {
                    println!("No sensory entries yet.");
                }
                for e in recent {
                    println!(
                        "{}  {:<14} {:>2}/10  {}",
                        format_time(e.timestamp),
                        e.kind,
                        e.intensity,
                        e.trigger.as_deref().unwrap_or("-")
                    );
                }
            }
            SensoryCommand::Categories => {
                for c in catalog::SENSORY_CATEGORIES {
                    println!("{} {} ({})", c.icon, c.name, c.kind);
                    println!("  {}", c.description);
                    println!("  Triggers: {}", c.common_triggers.join(", "));
                    println!("  Coping:   {}", c.coping_strategies.join(", "));
                }
                println!();
                println!("Quick inputs:");
                for q in catalog::QUICK_SENSORY_INPUTS {
                    println!("  {} {:<10} intensity {}", q.icon, q.name, q.intensity);
                }
            }
        },

        Commands::Mood(action) => match action {
            MoodCommand::Log { mood } => {
                let entry = app.log_mood(&mood)?;
                println!("Logged {} {}", entry.emoji, entry.name);
            }
            MoodCommand::Recent => {
                let recent = app.recent_moods();
                if json {
                    return print_json(&recent);
                }
                if recent.is_empty() {
                    println!("No moods logged yet.");
                }
                for m in recent {
                    println!("{}  {} {}", format_time(m.timestamp), m.emoji, m.name);
                }
            }
            MoodCommand::Stats => {
                let summary = app.mood_summary(Local::now());
                if json {
                    return print_json(&summary);
                }
                println!("Today's moods:     {}", summary.today_count);
                println!("Average intensity: {:.1}", summary.average_intensity);
                match summary.latest {
                    Some(m) => println!("Latest:            {} {}", m.emoji, m.name),
                    None => println!("Latest:            -"),
                }
            }
            MoodCommand::List => {
                for category in catalog::MOOD_CATEGORIES {
                    println!("{}", category.name);
                    for m in category.moods {
                        println!("  [{}] {} {:<10} {:>3}", m.shortcut, m.emoji, m.id, m.intensity);
                    }
                }
            }
        },

        Commands::Routine(action) => match action {
            RoutineCommand::Add { name, time } => {
                let task = app.add_task(&name, time)?;
                println!("Added {} ({}) to {}", task.name, task.id, task.time_of_day);
            }
            RoutineCommand::Toggle { id } => {
                let done = app.toggle_task(&id)?;
                println!("{} {}", id, if done { "completed" } else { "not completed" });
            }
            RoutineCommand::Delete { id } => {
                app.delete_task(&id)?;
                println!("Deleted {}", id);
            }
            RoutineCommand::Update {
                id,
                name,
                time,
                duration,
                difficulty,
                supports,
            } => {
                let update = RoutineTaskUpdate {
                    name,
                    time_of_day: time,
                    duration,
                    difficulty,
                    supports: (!supports.is_empty()).then_some(supports),
                    ..Default::default()
                };
                if update.is_empty() {
                    bail!("nothing to update");
                }
                let task = app.update_task(&id, update)?;
                println!("Updated {} ({})", task.name, task.id);
            }
            RoutineCommand::List => {
                if json {
                    return print_json(app.routine_tasks());
                }
                for status in app.completion() {
                    println!(
                        "{} ({}/{}, {:.0}%)",
                        status.time_of_day, status.completed, status.total, status.percentage
                    );
                    for task in app.routine_tasks().iter().filter(|t| t.time_of_day == status.time_of_day) {
                        let mark = if task.completed { "x" } else { " " };
                        let alert = if app.shows_transition_alert(task) { " ⏰" } else { "" };
                        println!("  [{}] {:<28} {}{}", mark, task.name, task.id, alert);
                    }
                }
            }
        },

        Commands::Prefs(action) => match action {
            PrefsCommand::Show => {
                let prefs = app.preferences();
                if json {
                    return print_json(prefs);
                }
                println!("Theme:         {:?}", prefs.theme);
                println!("Default view:  {:?}", prefs.default_view);
                println!("Notifications: {}", prefs.notifications);
                println!("Reminder:      {}", prefs.effective_reminder().unwrap_or("off"));
                println!("Transitions:   {}", prefs.transition_alerts());
            }
            PrefsCommand::Set {
                theme,
                view,
                notifications,
                reminder,
                transition_alerts,
            } => {
                let mut prefs = app.preferences().clone();
                if let Some(theme) = theme {
                    prefs.theme = theme;
                }
                if let Some(view) = view {
                    prefs.default_view = view;
                }
                if let Some(on) = notifications {
                    prefs.notifications = on;
                }
                if reminder.is_some() {
                    prefs.reminder_time = reminder;
                }
                if let Some(on) = transition_alerts {
                    prefs
                        .routine_preferences
                        .get_or_insert_with(Default::default)
                        .transition_alerts = on;
                }
                app.save_preferences(prefs)?;
                println!("Preferences saved");
            }
        },

        Commands::Stats => {
            let summary = app.tracker_summary();
            let completion = app.completion();
            if json {
                return print_json(&serde_json::json!({
                    "trackers": summary,
                    "averagePerActive": summary.average_per_active(),
                    "routine": completion,
                }));
            }
            println!("Total activities:  {}", summary.total_activities);
            println!("Active trackers:   {}", summary.active_trackers);
            println!("Average/tracker:   {}", format_value(summary.average_per_tracker));
            println!("Average/active:    {}", summary.average_per_active());
            println!("Positive progress: {}", summary.positive_progress);
            println!();
            for status in completion {
                println!(
                    "{:<10} {}/{} ({:.0}%)",
                    status.time_of_day.to_string(),
                    status.completed,
                    status.total,
                    status.percentage
                );
            }
        }

        Commands::Chart(args) => render_chart(&app, &config, args)?,

        Commands::View { key, ctrl, meta } => {
            let mut press = KeyPress::new(key);
            press.ctrl = ctrl;
            press.meta = meta;

            match app.handle_key(&press) {
                Some(view) => {
                    println!("{}", view.title());
                    let wait = app.loading_remaining();
                    if !wait.is_zero() {
                        println!("  (placeholder shown for {} ms)", wait.as_millis());
                    }
                }
                None => {
                    println!("No shortcut. Available:");
                    for hint in shortcut_hints(Platform::current()) {
                        println!("  {}", hint);
                    }
                }
            }
        }

        Commands::Export { moods, output } => {
            let mut buf = Vec::new();
            if moods {
                neurotrack::export::write_mood_csv(app.mood_entries(), &mut buf)?;
            } else {
                neurotrack::export::write_sensory_csv(app.sensory_entries(), &mut buf)?;
            }
            write_output(output.as_deref(), &String::from_utf8(buf)?)?;
        }

        Commands::Config { .. } => {}
    }

    Ok(())
}

fn render_chart(app: &App<DirectoryStore>, config: &Config, args: ChartArgs) -> anyhow::Result<()> {
    let now = Local::now();
    let data = if let Some(id) = &args.tracker {
        let tracker = app
            .trackers()
            .iter()
            .find(|t| &t.id == id)
            .with_context(|| format!("no tracker with id {}", id))?;
        let (values, labels) = stats::tracker_period_series(tracker.count, args.period, now);
        ChartData::new(values, labels, tracker.unit.clone())
    } else if args.sensory {
        let (values, labels) = stats::sensory_period_counts(app.sensory_entries(), args.period, now);
        ChartData::new(values, labels, "entries")
    } else {
        app.activity_chart(true)
    };

    let renderer = ChartRenderer::new(data.animate(!args.no_animate), config.chart.layout());
    tracing::debug!(points = renderer.points().len(), max = renderer.scale().max, "Rendering chart");

    if !args.frames {
        let mut svg = SvgSurface::new();
        renderer.draw(&mut svg, 1.0);
        return write_output(args.output.as_deref(), &svg.finish());
    }

    let Some(dir) = args.output else {
        bail!("--frames needs --output <directory>");
    };
    std::fs::create_dir_all(&dir)?;

    let progress = if renderer.animates() {
        config.chart.animation().frames(config.chart.fps)
    } else {
        vec![1.0]
    };
    for (i, p) in progress.iter().enumerate() {
        let mut svg = SvgSurface::new();
        renderer.draw(&mut svg, *p);
        std::fs::write(dir.join(format!("frame-{:03}.svg", i)), svg.finish())?;
    }
    println!("Wrote {} frames to {:?}", progress.len(), dir);
    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn write_output(path: Option<&Path>, content: &str) -> anyhow::Result<()> {
    match path {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, content)?;
            println!("Written to {:?}", path);
        }
        None => print!("{}", content),
    }
    Ok(())
}

fn format_time(ms: i64) -> String {
    Local
        .timestamp_millis_opt(ms)
        .single()
        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| ms.to_string())
}
