pub mod commands;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::config::AppConfig;

#[derive(Parser)]
#[command(name = "comptrack")]
#[command(about = "CompTrack - complaint tracking API server")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Run the HTTP server (default when no command is given)")]
    Serve,

    #[command(about = "Apply database migrations to DATABASE_URL")]
    Migrate,

    #[command(about = "Create a user with a hashed password")]
    CreateUser {
        #[arg(long, help = "Unique username")]
        username: String,
        #[arg(long, help = "Unique email address")]
        email: String,
        #[arg(long, help = "Plain-text password, stored as an Argon2 hash")]
        password: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli, config: &AppConfig) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => commands::serve::handle(config).await,
        Commands::Migrate => commands::migrate::handle(config).await,
        Commands::CreateUser {
            username,
            email,
            password,
        } => commands::user::create(config, username, email, password, output_format).await,
    }
}
