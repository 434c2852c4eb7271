// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Reading Tracker CLI
//!
//! Loads the local session, applies one action, saves, and prints the
//! resulting progress, level-ups and badges.

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate, Timelike};
use clap::{Parser, Subcommand};
use reading_tracker::{
    config::{Config, LogFormat},
    db::LocalStore,
    models::{
        badge::find_badge, DailyLogInput, Mood, NewBook, OnboardingGoals, ReadingTime, Theme,
    },
    services::{analytics, badges, progress::XP_PER_PAGE, quests},
    time_utils::{format_utc_rfc3339, wall_clock},
    Session, SessionEvents,
};
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "reading-tracker")]
#[command(about = "Track your reading and level up")]
#[command(version)]
struct Cli {
    /// Directory holding the saved state (overrides READING_TRACKER_DATA_DIR)
    #[arg(short, long, global = true)]
    data_dir: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show level, XP, streak and goal progress
    Status,

    /// List books on the shelf
    Books,

    /// Add a book to the shelf
    AddBook {
        #[arg(long)]
        title: String,
        #[arg(long)]
        author: String,
        /// Total number of pages
        #[arg(long)]
        pages: u32,
        /// Target finish date (YYYY-MM-DD)
        #[arg(long)]
        deadline: NaiveDate,
    },

    /// Log pages read today
    Log {
        pages: u32,
        /// Book the pages were read in; advances its current page
        #[arg(long = "book")]
        book_id: Option<u64>,
        /// Hour of day the reading happened (defaults to now)
        #[arg(long)]
        hour: Option<u32>,
        #[arg(long)]
        notes: Option<String>,
        #[arg(long, value_enum)]
        mood: Option<MoodArg>,
    },

    /// Set the current page of a book
    Progress {
        book_id: u64,
        #[arg(allow_hyphen_values = true)]
        page: i64,
    },

    /// Pause a book
    Pause { book_id: u64 },

    /// Resume a paused book
    Resume { book_id: u64 },

    /// Estimate when a book will be finished
    Pace { book_id: u64 },

    /// Show the badge gallery
    Badges,

    /// List quests
    Quests,

    /// Confirm a quest whose target has been reached
    CompleteQuest { quest_id: u64 },

    /// List challenges
    Challenges,

    /// Join a challenge
    JoinChallenge { challenge_id: u64 },

    /// Confirm a joined challenge whose target has been reached
    CompleteChallenge { challenge_id: u64 },

    /// Set your name and reading goals
    Onboard {
        #[arg(long)]
        name: Option<String>,
        #[arg(long, default_value_t = 12)]
        yearly_goal: u32,
        #[arg(long, default_value_t = 20)]
        daily_goal: u32,
        #[arg(long = "genre")]
        genres: Vec<String>,
        #[arg(long, value_enum, default_value_t = ReadingTimeArg::Evening)]
        reading_time: ReadingTimeArg,
    },

    /// Show or toggle the color theme
    Theme {
        #[arg(long)]
        toggle: bool,
    },
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum ReadingTimeArg {
    Morning,
    Afternoon,
    Evening,
    Night,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum MoodArg {
    Great,
    Good,
    Okay,
    Bad,
}

impl From<MoodArg> for Mood {
    fn from(arg: MoodArg) -> Self {
        match arg {
            MoodArg::Great => Mood::Great,
            MoodArg::Good => Mood::Good,
            MoodArg::Okay => Mood::Okay,
            MoodArg::Bad => Mood::Bad,
        }
    }
}

impl From<ReadingTimeArg> for ReadingTime {
    fn from(arg: ReadingTimeArg) -> Self {
        match arg {
            ReadingTimeArg::Morning => ReadingTime::Morning,
            ReadingTimeArg::Afternoon => ReadingTime::Afternoon,
            ReadingTimeArg::Evening => ReadingTime::Evening,
            ReadingTimeArg::Night => ReadingTime::Night,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::from_env().context("Failed to load configuration")?;
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }
    init_logging(config.log_format);

    let store = LocalStore::open(&config.data_dir);
    let now = wall_clock(Local::now());
    let mut session = Session::load(&store, now, config.default_reading_goal);
    let out = Output { json: cli.json };

    match cli.command.unwrap_or(Commands::Status) {
        Commands::Status => out.print(&session.dashboard(), print_dashboard),
        Commands::Books => out.print(&session.books, |books| {
            let today = now.date_naive();
            for book in books {
                println!(
                    "#{} {} by {} [{:?}] {}/{} pages ({:.0}%), {} days left",
                    book.id,
                    book.title,
                    book.author,
                    book.status,
                    book.current_page,
                    book.total_pages,
                    book.percent_complete(),
                    book.days_left(today)
                );
            }
        }),
        Commands::AddBook {
            title,
            author,
            pages,
            deadline,
        } => {
            let book = session
                .add_book(NewBook {
                    title,
                    author,
                    total_pages: pages,
                    deadline,
                })?
                .clone();
            out.print(&book, |b| println!("Added #{} {}", b.id, b.title));
        }
        Commands::Log {
            pages,
            book_id,
            hour,
            notes,
            mood,
        } => {
            let input = DailyLogInput {
                pages,
                hour: hour.unwrap_or_else(|| now.hour()),
                book_id,
                notes,
                mood: mood.map(Mood::from),
            };
            let events = session.log_reading(input, now)?;
            if !cli.json {
                println!(
                    "Read {} pages, earned {} XP",
                    pages,
                    u64::from(pages) * XP_PER_PAGE
                );
            }
            out.print(&events, print_events);
        }
        Commands::Progress { book_id, page } => {
            let events = session.update_book_progress(book_id, page, now)?;
            let book = session.book(book_id)?;
            if !cli.json {
                println!(
                    "#{} {}: {}/{} pages",
                    book.id, book.title, book.current_page, book.total_pages
                );
            }
            out.print(&events, print_events);
        }
        Commands::Pause { book_id } => {
            let book = session.pause_book(book_id)?;
            out.print(book, |b| println!("#{} is {:?}", b.id, b.status));
        }
        Commands::Resume { book_id } => {
            let book = session.resume_book(book_id)?;
            out.print(book, |b| println!("#{} is {:?}", b.id, b.status));
        }
        Commands::Pace { book_id } => {
            let book = session.book(book_id)?;
            let prediction = analytics::predict_pace(book, &session.logs, now.date_naive());
            out.print(&prediction, |p| {
                println!("{}: {:.1} pages/day", p.title, p.pages_per_day);
                match (p.estimated_finish, p.on_track) {
                    (Some(finish), Some(true)) => println!("On track to finish by {}", finish),
                    (Some(finish), _) => println!("At this pace you finish on {}", finish),
                    (None, _) => println!("No estimate yet"),
                }
            });
        }
        Commands::Badges => {
            let gallery = badges::badge_gallery(&session.earned_badges);
            out.print(&gallery, |entries| {
                let earned = entries.iter().filter(|e| e.earned.is_some()).count();
                println!("{}/{} badges earned", earned, entries.len());
                for entry in entries {
                    let mark = if entry.earned.is_some() { "x" } else { " " };
                    println!(
                        "[{}] {} ({:?}, +{} XP): {}",
                        mark, entry.name, entry.rarity, entry.xp_reward, entry.description
                    );
                    if let Some(earned) = &entry.earned {
                        println!("    earned {}", format_utc_rfc3339(earned.earned_at));
                    }
                }
            });
        }
        Commands::Quests => out.print(&session.quests, |list| {
            for quest in list {
                println!(
                    "#{} [{:?}] {} {}/{} (+{} XP) {}{}",
                    quest.id,
                    quest.kind,
                    quest.title,
                    quest.current,
                    quest.target,
                    quest.xp_reward,
                    quests::time_remaining(quest.expires_at, now),
                    if quest.is_completed { " done" } else { "" }
                );
            }
        }),
        Commands::CompleteQuest { quest_id } => {
            let events = session.complete_quest(quest_id, now)?;
            out.print(&events, print_events);
        }
        Commands::Challenges => out.print(&session.challenges, |list| {
            for challenge in list {
                println!(
                    "#{} [{:?}/{:?}] {} {}/{} (+{} XP, {}) until {}",
                    challenge.id,
                    challenge.kind,
                    challenge.state(),
                    challenge.title,
                    challenge.current,
                    challenge.target,
                    challenge.xp_reward,
                    challenge.reward,
                    challenge.deadline
                );
            }
        }),
        Commands::JoinChallenge { challenge_id } => {
            let joined = session.join_challenge(challenge_id)?;
            out.print(&joined, |joined| {
                if *joined {
                    println!("Joined challenge #{}", challenge_id);
                } else {
                    println!("Already in challenge #{}", challenge_id);
                }
            });
        }
        Commands::CompleteChallenge { challenge_id } => {
            let events = session.complete_challenge(challenge_id, now)?;
            out.print(&events, print_events);
        }
        Commands::Onboard {
            name,
            yearly_goal,
            daily_goal,
            genres,
            reading_time,
        } => {
            let goals = OnboardingGoals {
                yearly_book_goal: yearly_goal,
                daily_page_goal: daily_goal,
                preferred_genres: genres,
                reading_time: reading_time.into(),
            };
            session.complete_onboarding(name, goals)?;
            out.print(&session.user, |user| {
                println!("Welcome, {}!", user.display_name());
            });
        }
        Commands::Theme { toggle } => {
            let theme = if toggle {
                session.toggle_theme()
            } else {
                session.theme
            };
            out.print(&theme, |t| {
                println!("{}", if *t == Theme::Dark { "dark" } else { "light" })
            });
        }
    }

    session
        .save(&store)
        .with_context(|| format!("Failed to save to {}", config.data_dir.display()))?;
    Ok(())
}

struct Output {
    json: bool,
}

impl Output {
    fn print<T: Serialize + ?Sized>(&self, value: &T, human: impl FnOnce(&T)) {
        if self.json {
            match serde_json::to_string_pretty(value) {
                Ok(json) => println!("{}", json),
                Err(e) => tracing::error!(error = %e, "Failed to serialize output"),
            }
        } else {
            human(value);
        }
    }
}

fn print_dashboard(summary: &analytics::DashboardSummary) {
    println!(
        "Level {} ({}/500 XP into level, {} XP total)",
        summary.level.level, summary.level.xp_into_level, summary.xp
    );
    println!("Streak: {}", summary.streak);
    println!(
        "Books: {}/{} ({:.0}% of goal), {} in progress",
        summary.books_read, summary.reading_goal, summary.goal_percent, summary.currently_reading
    );
    println!("Pages read: {}", summary.pages_read);
    println!("Badges: {}/{}", summary.badges_earned, summary.badges_total);
    for award in &summary.recent_awards {
        let name = find_badge(&award.badge_id).map_or(award.badge_id.as_str(), |b| b.name);
        println!("  {} ({})", name, format_utc_rfc3339(award.earned_at));
    }
}

fn print_events(events: &SessionEvents) {
    for book_id in &events.completed_books {
        println!("Finished book #{}!", book_id);
    }
    for badge in &events.badges_earned {
        let name = find_badge(&badge.badge_id).map_or(badge.badge_id.as_str(), |b| b.name);
        println!("New badge: {} (+{} XP)", name, badge.xp_awarded);
    }
    if let Some(level) = events.final_level() {
        let gained: u32 = events.level_ups.iter().map(|e| e.levels_gained()).sum();
        if gained > 1 {
            println!("Level up! +{} levels, you reached level {}", gained, level);
        } else {
            println!("Level up! You reached level {}", level);
        }
    }
}

/// Initialize logging to stderr (JSON by default, plain text with `LOG_FORMAT=pretty`).
fn init_logging(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("reading_tracker=info,warn"));

    let json = (format == LogFormat::Json).then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .with_target(false)
            .with_current_span(true)
            .flatten_event(true)
            .with_writer(std::io::stderr)
    });
    let pretty = (format == LogFormat::Pretty).then(|| {
        tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_writer(std::io::stderr)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(json)
        .with(pretty)
        .init();
}
