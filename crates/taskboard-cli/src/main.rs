//! Taskboard CLI - drives a board session and renders the read-only surfaces.
//!
//! `demo` runs a scripted session (create, drag, edit, delete) against the
//! in-memory store and writes the column model to a file-backed slot.
//! `dashboard` and `calendar` mount that slot the way the other pages do.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{Datelike, Days};
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use taskboard_core::app::BoardBuilder;
use taskboard_core::board::Columns;
use taskboard_core::config::BoardConfig;
use taskboard_core::domain::{Priority, Status, TaskDraft, TaskEdit};
use taskboard_core::drag::{DragOutcome, DragPayload, PAYLOAD_MEDIA_TYPE, Point, Rect};
use taskboard_core::impls::{FileDurableSlot, FlakyTaskStore, InMemoryTaskStore, StaticIdentity};
use taskboard_core::ports::{Clock, IdGenerator, Identity, SystemClock, UlidGenerator};
use taskboard_core::sync::SyncBus;
use taskboard_core::views::{MonthGrid, Summary, filter_columns};

/// Taskboard - personal Kanban board.
#[derive(Parser)]
#[command(name = "taskboard")]
#[command(about = "Personal Kanban board driver")]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Board config (TOML)
    #[arg(long, global = true, env = "TASKBOARD_CONFIG")]
    config: Option<PathBuf>,

    /// Directory backing the durable slot
    #[arg(long, global = true, env = "TASKBOARD_DATA_DIR", default_value = ".taskboard")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a scripted board session and persist the result
    Demo {
        /// Make the store reject status updates (shows the rollback)
        #[arg(long)]
        fail_moves: bool,

        /// Print the final column model as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show counts and upcoming tasks from the stored board
    Dashboard {
        /// Search query
        #[arg(long, default_value = "")]
        search: String,
    },

    /// Show a month of the stored board by due date
    Calendar {
        #[arg(long)]
        year: Option<i32>,

        #[arg(long)]
        month: Option<u32>,

        /// Search query
        #[arg(long, default_value = "")]
        search: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("taskboard=debug,info")
        } else {
            EnvFilter::new("taskboard=info,warn")
        }
    });

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    let config = match &cli.config {
        Some(path) => BoardConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => BoardConfig::default(),
    };
    let slot = FileDurableSlot::new(&cli.data_dir);

    match cli.command {
        Commands::Demo { fail_moves, json } => run_demo(config, slot, fail_moves, json).await,
        Commands::Dashboard { search } => {
            show_dashboard(&config, slot, &search);
            Ok(())
        }
        Commands::Calendar {
            year,
            month,
            search,
        } => show_calendar(&config, slot, year, month, &search),
    }
}

async fn run_demo(config: BoardConfig, slot: FileDurableSlot, fail_moves: bool, json: bool) -> Result<()> {
    let identity = Identity::new(
        UlidGenerator::new(SystemClock).generate_user_id(),
        "demo@taskboard.local",
    )
    .with_name("Demo");
    let store = Arc::new(FlakyTaskStore::new(InMemoryTaskStore::new()));

    let mut board = BoardBuilder::new(Arc::clone(&store), StaticIdentity::signed_in(identity), slot)
        .config(config)
        .path("/task")
        .build()?;
    board.engine_mut().load().await?;

    for draft in seed_drafts(SystemClock.today()) {
        board.engine_mut().create(draft).await?;
    }

    // three columns side by side
    for (i, status) in Status::ALL.into_iter().enumerate() {
        board
            .drag_mut()
            .register_target(status, Rect::new(i as f64 * 240.0, 0.0, 220.0, 600.0));
    }
    let mut dashboard = board.mount();

    store.fail_updates(fail_moves);
    let task = board
        .engine()
        .columns()
        .column(Status::Todo)
        .first()
        .cloned()
        .context("no task to drag")?;
    info!(task = %task.title, "dragging to In Progress");
    board.drag_mut().press(&task, Point::new(40.0, 40.0))?;
    board.drag_mut().pointer_move(Point::new(300.0, 60.0));
    board.drag_mut().enter(Status::InProgress);
    match board.release(Point::new(300.0, 60.0)).await {
        Some((DragOutcome::Dropped(intent), Some(Ok(moved)))) => {
            info!(to = %intent.to, ?moved, "drop applied")
        }
        Some((_, Some(Err(err)))) => warn!(error = %err, "drop rolled back"),
        other => warn!(?other, "gesture ended without a move"),
    }
    store.fail_updates(false);

    // hand the first upcoming task over from the dashboard list
    if let Some(upcoming) = board.summary("").upcoming.first() {
        let raw = DragPayload::from_task(upcoming).to_json()?;
        if let Some(payload) = DragPayload::from_transfer(PAYLOAD_MEDIA_TYPE, &raw)? {
            info!(media_type = PAYLOAD_MEDIA_TYPE, task = %payload.title, "handover from dashboard");
            board.drag_mut().begin_external(payload, Point::new(0.0, 700.0))?;
            board.drag_mut().enter(Status::InProgress);
            if let Some((_, Some(Err(err)))) = board.release(Point::new(300.0, 60.0)).await {
                warn!(error = %err, "handover drop failed");
            }
        }
    }

    if let Some(done) = board.engine().columns().column(Status::Todo).last().cloned() {
        board.engine_mut().move_task(done.id, Status::Done).await?;
        let mut edit = TaskEdit::from_task(&done);
        edit.description = Some("Shipped from the demo".to_string());
        board.engine_mut().edit(done.id, edit).await?;
    }
    let stale = board
        .engine()
        .columns()
        .iter()
        .find(|t| t.title == "Clean inbox")
        .map(|t| t.id);
    if let Some(stale) = stale {
        board.engine_mut().delete(stale).await?;
    }

    dashboard.refresh();
    if json {
        println!("{}", serde_json::to_string_pretty(dashboard.columns())?);
    } else {
        print_board(dashboard.columns());
        print_summary(&board.summary(""));
    }
    Ok(())
}

fn seed_drafts(today: chrono::NaiveDate) -> Vec<TaskDraft> {
    let in_days = |n: u64| today.checked_add_days(Days::new(n)).unwrap_or(today);
    vec![
        TaskDraft::new("Write design doc")
            .with_description("Board, drag and sync")
            .with_due_date(in_days(2)),
        TaskDraft::new("Review pull requests")
            .with_priority(Priority::High)
            .with_due_date(in_days(1)),
        TaskDraft::new("Clean inbox").with_priority(Priority::Low),
        TaskDraft::new("Plan sprint")
            .with_status(Status::InProgress)
            .with_due_date(in_days(7)),
    ]
}

/// Mounts a read-only surface on the stored board.
fn mount_columns(config: &BoardConfig, slot: FileDurableSlot) -> Columns {
    let bus = SyncBus::new(slot, config.storage_key.clone(), config.broadcast_capacity);
    bus.mount().columns().clone()
}

fn show_dashboard(config: &BoardConfig, slot: FileDurableSlot, search: &str) {
    let columns = mount_columns(config, slot);
    print_summary(&Summary::from_columns(&columns, search, config.upcoming_limit));
}

fn show_calendar(
    config: &BoardConfig,
    slot: FileDurableSlot,
    year: Option<i32>,
    month: Option<u32>,
    search: &str,
) -> Result<()> {
    let clock = SystemClock;
    let current = MonthGrid::current(&clock);
    let grid = MonthGrid::new(year.unwrap_or(current.year()), month.unwrap_or(current.month()))?;
    let columns = filter_columns(&mount_columns(config, slot), search);
    let events = grid.events_in_month(columns.iter());

    println!("{:^28}", grid.title());
    println!(" Su  Mo  Tu  We  Th  Fr  Sa");
    for week in grid.weeks() {
        let row: Vec<String> = week
            .iter()
            .map(|&date| {
                if !grid.in_month(date) {
                    return "   ·".to_string();
                }
                let mark = if events.contains_key(&date) { '*' } else { ' ' };
                if grid.is_today(date, &clock) {
                    format!("[{:>2}]", date.day())
                } else {
                    format!(" {:>2}{mark}", date.day())
                }
            })
            .collect();
        println!("{}", row.concat());
    }
    for (date, tasks) in &events {
        for task in tasks {
            println!("{date}  {} [{}] {}", task.status.label(), task.priority, task.title);
        }
    }
    Ok(())
}

fn print_board(columns: &Columns) {
    for (status, count) in columns.counts() {
        println!("{} ({count})", status.label());
        for task in columns.column(status) {
            match task.due_date {
                Some(due) => println!("  - {} [{}] due {due}", task.title, task.priority),
                None => println!("  - {} [{}]", task.title, task.priority),
            }
        }
    }
}

fn print_summary(summary: &Summary) {
    println!(
        "todo {}  in progress {}  done {}  ({:.0}% complete)",
        summary.todo,
        summary.in_progress,
        summary.done,
        summary.completion() * 100.0
    );
    if summary.upcoming.is_empty() {
        println!("No upcoming tasks");
    }
    for task in &summary.upcoming {
        println!("  - {} [{}]", task.title, task.priority);
    }
}
