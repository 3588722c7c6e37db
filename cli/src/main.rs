mod commands;
mod config;
mod store;
mod transport;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use booking_shared::BookingClient;

use crate::config::CliConfig;
use crate::store::FileStore;
use crate::transport::ReqwestTransport;

#[derive(Parser)]
#[command(name = "booking")]
#[command(about = "CLI for the sports club lesson booking site")]
#[command(
    long_about = "A command-line client for the lesson booking backend.\n\n\
    Log in once and the session is kept in a local file. Members can browse\n\
    lessons and sign up; staff can add, import and edit lessons, manage members\n\
    and set the sign-up period."
)]
struct Cli {
    /// Backend server URL, overriding booking.toml and BOOKING_BASE_URL.
    #[arg(short, long, value_name = "URL")]
    base_url: Option<String>,

    /// Configuration file to read instead of ./booking.toml.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and store the access token
    Login {
        username: String,

        /// Read from stdin when not given.
        #[arg(short, long, env = "BOOKING_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// Forget the stored session
    Logout,
    /// Show the username behind the stored token
    Whoami,
    /// Show my registered details
    Me,
    /// Browse and sign up for lessons; staff commands for managing them
    Lessons {
        #[command(subcommand)]
        action: LessonAction,
    },
    /// Lesson sign-up period
    Period {
        #[command(subcommand)]
        action: PeriodAction,
    },
    /// Manage todos
    Todos {
        #[command(subcommand)]
        action: TodoAction,
    },
}

#[derive(Subcommand)]
pub enum LessonAction {
    /// List this season's lessons with my sign-up status
    List {
        /// Use the staff list, available before sign-up opens.
        #[arg(long)]
        admin: bool,
    },
    /// List the lessons I signed up for, with waitlist ranks
    Mine,
    /// Sign up for a lesson (joins the waitlist when it is full)
    Signup { id: i64 },
    /// Cancel my sign-up for a lesson
    Cancel { id: i64 },
    /// Show my position in a lesson's sign-up order
    Position { id: i64 },
    /// Add a lesson
    Create {
        #[arg(long)]
        year: i32,
        #[arg(long)]
        season: i32,
        #[arg(long)]
        number: i32,
        #[arg(long)]
        title: String,
        #[arg(long)]
        teacher: String,
        /// Weekday in Japanese, e.g. 水.
        #[arg(long)]
        day: Option<String>,
        #[arg(long)]
        time: Option<String>,
        /// Fee in yen; commas are allowed.
        #[arg(long)]
        price: Option<String>,
        #[arg(long)]
        description: Option<String>,
        /// Leave out for lessons without a participant limit.
        #[arg(long)]
        capacity: Option<i32>,
        /// Sessions covered by the fee.
        #[arg(long)]
        lessons: Option<i32>,
    },
    /// Add every lesson from a JSON array file
    Import {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    /// Change fields of a lesson; fields not given are kept
    Update {
        id: i64,
        #[arg(long)]
        number: Option<i32>,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        teacher: Option<String>,
        #[arg(long)]
        day: Option<String>,
        #[arg(long)]
        time: Option<String>,
        #[arg(long)]
        price: Option<i64>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        capacity: Option<i32>,
        #[arg(long)]
        lessons: Option<i32>,
    },
    /// Delete a lesson
    Delete { id: i64 },
    /// List who signed up for each lesson
    Members,
    /// Remove a member from a lesson
    RemoveMember {
        username: String,
        #[arg(value_name = "LESSON_ID")]
        lesson_id: i64,
    },
}

#[derive(Subcommand)]
pub enum PeriodAction {
    /// Set when sign-up opens and closes (times are JST)
    Set {
        #[arg(long)]
        year: i32,
        #[arg(long)]
        season: i32,
        /// e.g. 2025-04-01T09:00
        #[arg(long, value_name = "DATETIME")]
        start: String,
        #[arg(long, value_name = "DATETIME")]
        end: String,
    },
}

#[derive(Subcommand)]
pub enum TodoAction {
    /// List all todos
    List,
    /// Create a todo
    Create {
        title: String,
        #[arg(short, long, value_name = "TEXT")]
        content: Option<String>,
    },
    /// Edit a todo; an empty title keeps the current one
    Edit {
        id: i64,
        #[arg(short, long, value_name = "TEXT", default_value = "")]
        title: String,
        #[arg(short, long, value_name = "TEXT", default_value = "")]
        content: String,
    },
    /// Flip a todo between done and not done
    Toggle { id: i64 },
    /// Delete a todo
    Delete { id: i64 },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "booking_cli=info,booking_shared=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    dotenv::dotenv().ok();
    let cli = Cli::parse();
    let config = CliConfig::load(cli.config.as_deref())?.with_base_url(cli.base_url);
    tracing::debug!(base_url = %config.base_url, session_file = %config.session_file.display(), "configuration loaded");

    let client = BookingClient::new(
        ReqwestTransport::new(&config.base_url),
        FileStore::new(&config.session_file),
    );

    match cli.command {
        Commands::Login { username, password } => {
            commands::login(&client, &username, password).await?
        }
        Commands::Logout => commands::logout(&client)?,
        Commands::Whoami => commands::whoami(&client).await?,
        Commands::Me => commands::me(&client).await?,
        Commands::Lessons { action } => commands::handle_lessons(&client, action).await?,
        Commands::Period { action } => commands::handle_period(&client, action).await?,
        Commands::Todos { action } => commands::handle_todos(&client, action).await?,
    }

    Ok(())
}
