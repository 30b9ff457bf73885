//! Chronicle Engine - Main entry point.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use chronicle_domain::{CharacterId, DerivedStats, Dnd5eSystem, UserId};
use chronicle_engine::infrastructure::{
    character_store::SqliteCharacterRepo, clock::SystemClock, config::EngineConfig,
};
use chronicle_engine::use_cases::character::parse_character_document;
use chronicle_engine::App;

#[derive(Parser)]
#[command(name = "chronicle-engine", about = "Character progression and derived stats")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the derived stats of a character document as JSON
    Sheet {
        /// Path to an exported character document
        file: PathBuf,
    },
    /// Create a character in the configured database and print its id
    New {
        name: String,
        /// Owning user; a new id is generated when omitted
        #[arg(long)]
        user: Option<UserId>,
    },
    /// Print a stored character as a standalone document
    Export { id: CharacterId },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment from repo root so `cargo run -p chronicle-engine` works anywhere.
    load_dotenv_from_repo_root();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chronicle_engine=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = EngineConfig::from_env();

    match cli.command {
        Command::Sheet { file } => {
            let json = std::fs::read_to_string(&file)
                .with_context(|| format!("reading {}", file.display()))?;
            let character = parse_character_document(&json)?;
            let derived = DerivedStats::compute(&Dnd5eSystem::new(), &character, config.rules);
            println!("{}", serde_json::to_string_pretty(&derived)?);
        }
        Command::New { name, user } => {
            let app = connect(config).await?;
            let user_id = user.unwrap_or_default();
            let record = app
                .use_cases
                .character
                .create
                .execute(user_id, &name)
                .await?;
            println!("{}", record.id());
        }
        Command::Export { id } => {
            let app = connect(config).await?;
            let document = app.use_cases.character.export.execute(id).await?;
            println!("{document}");
        }
    }

    Ok(())
}

async fn connect(config: EngineConfig) -> anyhow::Result<App> {
    tracing::info!(database_url = %config.database_url, "Opening character store");
    let repo = SqliteCharacterRepo::new(&config.database_url).await?;
    Ok(App::new(config, Arc::new(repo), Arc::new(SystemClock::new())))
}

fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}
