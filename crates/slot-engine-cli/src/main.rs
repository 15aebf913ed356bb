//! `slotctl` — compute bookable slots and manage availability windows in a
//! JSON schedule file.
//!
//! A schedule file holds a provider roster's windows and the bookings read
//! from the booking system:
//!
//! ```json
//! { "windows": [ ... ], "bookings": [ ... ] }
//! ```
//!
//! ## Usage
//!
//! ```sh
//! # Bookable 60-minute slots for a week
//! slotctl -s schedule.json slots --provider dr-lee --from 2026-03-16 --to 2026-03-22 --duration 60
//!
//! # Can one more session be booked at 10:00?
//! slotctl -s schedule.json check --provider dr-lee --date 2026-03-16 --time 10:00 --duration 60
//!
//! # Add a Monday window (writes the schedule back in place)
//! slotctl -s schedule.json add-window --provider dr-lee --day 1 --start 09:00 --end 17:00
//!
//! # Shrink it, or write the result elsewhere
//! slotctl -s schedule.json -o out.json update-window --id 0 --end 12:00
//!
//! # Remove it
//! slotctl -s schedule.json delete-window --id 0
//! ```
//!
//! Set `RUST_LOG=debug` for engine diagnostics on stderr.

use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use slot_engine::{
    AvailabilityWindow, Booking, Clock, EngineConfig, FixedClock, InMemoryBookingStore,
    InMemoryWindowStore, NewWindow, SlotQueryService, SystemClock, TimeOfDay, WindowId,
    WindowLifecycleService, WindowPatch,
};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(
    name = "slotctl",
    version,
    about = "Availability windows and bookable slots"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Schedule file with `windows` and `bookings`
    #[arg(short, long)]
    schedule: String,

    /// Where to write the updated schedule (defaults to the schedule file itself)
    #[arg(short, long)]
    output: Option<String>,

    /// Treat this date as today when checking for future bookings
    #[arg(long)]
    today: Option<NaiveDate>,

    /// Engine configuration file (JSON)
    #[arg(long)]
    config: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// List bookable slots in a date range
    Slots {
        #[arg(long)]
        provider: String,
        /// First day (inclusive), YYYY-MM-DD
        #[arg(long)]
        from: NaiveDate,
        /// Last day (inclusive), YYYY-MM-DD
        #[arg(long)]
        to: NaiveDate,
        /// Session length in minutes
        #[arg(long)]
        duration: u32,
    },
    /// Check whether one exact slot can take another booking
    Check {
        #[arg(long)]
        provider: String,
        #[arg(long)]
        date: NaiveDate,
        /// Start time, HH:MM
        #[arg(long)]
        time: TimeOfDay,
        #[arg(long)]
        duration: u32,
    },
    /// Create a weekly availability window
    AddWindow {
        #[arg(long)]
        provider: String,
        /// Day of week, 0 = Sunday .. 6 = Saturday
        #[arg(long)]
        day: u8,
        #[arg(long)]
        start: TimeOfDay,
        #[arg(long)]
        end: TimeOfDay,
        /// Sessions per slot
        #[arg(long, default_value_t = 1)]
        capacity: u32,
        /// Minutes between slots
        #[arg(long, default_value_t = 0)]
        buffer: u32,
    },
    /// Change fields of an existing window
    UpdateWindow {
        #[arg(long)]
        id: u64,
        #[arg(long)]
        day: Option<u8>,
        #[arg(long)]
        start: Option<TimeOfDay>,
        #[arg(long)]
        end: Option<TimeOfDay>,
        #[arg(long)]
        capacity: Option<u32>,
        #[arg(long)]
        buffer: Option<u32>,
        /// Activate (`true`) or deactivate (`false`) the window
        #[arg(long)]
        active: Option<bool>,
    },
    /// Delete a window
    DeleteWindow {
        #[arg(long)]
        id: u64,
    },
}

#[derive(Default, Serialize, Deserialize)]
struct ScheduleFile {
    #[serde(default)]
    windows: Vec<AvailabilityWindow>,
    #[serde(default)]
    bookings: Vec<Booking>,
}

/// Stores loaded from a schedule file, plus the services over them.
struct Workspace {
    windows: Arc<InMemoryWindowStore>,
    bookings: Arc<InMemoryBookingStore>,
    lifecycle: WindowLifecycleService,
    queries: SlotQueryService,
}

impl Workspace {
    fn open(schedule: ScheduleFile, config: EngineConfig, clock: Arc<dyn Clock>) -> Result<Self> {
        let windows = Arc::new(InMemoryWindowStore::with_windows(schedule.windows)?);
        let bookings = Arc::new(InMemoryBookingStore::new(schedule.bookings));
        Ok(Self {
            lifecycle: WindowLifecycleService::new(windows.clone(), bookings.clone(), clock),
            queries: SlotQueryService::new(windows.clone(), bookings.clone(), config),
            windows,
            bookings,
        })
    }

    fn snapshot(&self) -> Result<ScheduleFile> {
        Ok(ScheduleFile {
            windows: self.windows.all()?,
            bookings: self.bookings.all()?,
        })
    }
}

fn main() -> Result<()> {
    init_tracing()?;
    let cli = Cli::parse();

    let config = match cli.config.as_deref() {
        Some(path) => {
            let json = read_file(path)?;
            EngineConfig::from_json_str(&json)
                .with_context(|| format!("Failed to load config: {}", path))?
        }
        None => EngineConfig::default(),
    };
    let clock: Arc<dyn Clock> = match cli.today {
        Some(date) => Arc::new(FixedClock(date)),
        None => Arc::new(SystemClock),
    };

    let schedule: ScheduleFile = serde_json::from_str(&read_file(&cli.schedule)?)
        .with_context(|| format!("Failed to parse schedule: {}", cli.schedule))?;
    let ws = Workspace::open(schedule, config, clock)
        .with_context(|| format!("Invalid schedule: {}", cli.schedule))?;
    let output = cli.output.as_deref().unwrap_or(&cli.schedule);

    match cli.command {
        Commands::Slots {
            provider,
            from,
            to,
            duration,
        } => {
            let slots = ws
                .queries
                .get_slots(&provider, from, to, duration)
                .context("Failed to compute slots")?;
            println!("{}", serde_json::to_string_pretty(&slots)?);
        }
        Commands::Check {
            provider,
            date,
            time,
            duration,
        } => {
            let available = ws
                .queries
                .check_slot(&provider, date, time, duration)
                .context("Failed to check slot")?;
            println!("{}", available);
        }
        Commands::AddWindow {
            provider,
            day,
            start,
            end,
            capacity,
            buffer,
        } => {
            let created = ws
                .lifecycle
                .create_window(NewWindow {
                    provider_id: provider,
                    day_of_week: day,
                    start_time: start,
                    end_time: end,
                    max_sessions_per_slot: capacity,
                    buffer_minutes: buffer,
                })
                .context("Failed to create window")?;
            save(output, &ws.snapshot()?)?;
            println!("{}", serde_json::to_string_pretty(&created)?);
        }
        Commands::UpdateWindow {
            id,
            day,
            start,
            end,
            capacity,
            buffer,
            active,
        } => {
            let patch = WindowPatch {
                day_of_week: day,
                start_time: start,
                end_time: end,
                max_sessions_per_slot: capacity,
                buffer_minutes: buffer,
                active,
            };
            let updated = ws
                .lifecycle
                .update_window(WindowId(id), patch)
                .context("Failed to update window")?;
            save(output, &ws.snapshot()?)?;
            println!("{}", serde_json::to_string_pretty(&updated)?);
        }
        Commands::DeleteWindow { id } => {
            ws.lifecycle
                .delete_window(WindowId(id))
                .context("Failed to delete window")?;
            save(output, &ws.snapshot()?)?;
            println!("{}", serde_json::json!({ "deleted": id }));
        }
    }

    Ok(())
}

fn init_tracing() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow!(err))
}

fn read_file(path: &str) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
}

fn save(path: &str, schedule: &ScheduleFile) -> Result<()> {
    let json = serde_json::to_string_pretty(schedule)?;
    std::fs::write(path, json + "\n").with_context(|| format!("Failed to write file: {}", path))
}
