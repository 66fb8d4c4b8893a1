//! Socialgram operator tool: schema migrations and record inspection.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use socialgram_common::{AppResult, Config, logging};
use socialgram_db::Repositories;
use socialgram_db::entities::{
    comment::CommentResponse, follow::FollowResponse, like::LikeResponse, post::PostResponse,
    user::UserResponse,
};
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "socialgram")]
#[command(about = "Manage the socialgram database")]
struct Cli {
    /// Configuration file (defaults to `config/default.toml` plus environment)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Apply, roll back or inspect schema migrations
    #[command(subcommand)]
    Migrate(MigrateCommand),

    /// Print the serialized form of a stored record as JSON
    Show {
        /// Kind of record
        #[arg(value_enum)]
        record: Record,

        /// Record id
        id: i32,
    },
}

#[derive(Debug, Subcommand)]
enum MigrateCommand {
    /// Apply pending migrations
    Up {
        /// Number of migrations to apply (all when omitted)
        #[arg(long)]
        steps: Option<u32>,
    },
    /// Roll back applied migrations
    Down {
        /// Number of migrations to roll back (all when omitted)
        #[arg(long)]
        steps: Option<u32>,
    },
    /// Show which migrations are applied
    Status,
    /// Drop all tables and re-apply every migration
    Fresh,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Record {
    User,
    Post,
    Comment,
    Like,
    Follow,
}

/// Serialized form of any record kind.
#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Projection {
    User(UserResponse),
    Post(PostResponse),
    Comment(CommentResponse),
    Like(LikeResponse),
    Follow(FollowResponse),
}

async fn project(repos: &Repositories, record: Record, id: i32) -> AppResult<Projection> {
    Ok(match record {
        Record::User => Projection::User(repos.users.get_by_id(id).await?.serialize()),
        Record::Post => Projection::Post(repos.posts.get_by_id(id).await?.serialize()),
        Record::Comment => Projection::Comment(repos.comments.get_by_id(id).await?.serialize()),
        Record::Like => Projection::Like(repos.likes.get_by_id(id).await?.serialize()),
        Record::Follow => Projection::Follow(repos.follows.get_by_id(id).await?.serialize()),
    })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::load()?,
    };

    logging::init(&config.logging);

    let db = socialgram_db::init(&config).await?;

    match cli.command {
        Command::Migrate(MigrateCommand::Up { steps: None }) => {
            socialgram_db::migrate(&db).await?;
            info!("Migrations applied");
        }
        Command::Migrate(MigrateCommand::Up { steps }) => {
            socialgram_db::migrate_up(&db, steps).await?;
            info!("Migrations applied");
        }
        Command::Migrate(MigrateCommand::Down { steps }) => {
            socialgram_db::rollback(&db, steps).await?;
            info!("Migrations rolled back");
        }
        Command::Migrate(MigrateCommand::Status) => {
            socialgram_db::migration_status(&db).await?;
        }
        Command::Migrate(MigrateCommand::Fresh) => {
            socialgram_db::fresh(&db).await?;
            info!("Database recreated");
        }
        Command::Show { record, id } => {
            let repos = Repositories::new(Arc::new(db));
            let projection = project(&repos, record, id).await?;
            println!("{}", serde_json::to_string_pretty(&projection)?);
        }
    }

    Ok(())
}
