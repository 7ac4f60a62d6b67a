pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "profilectl")]
#[command(about = "Profile CLI - inspect, validate and update a profile server")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in human-readable text format")]
    pub text: bool,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[arg(long, global = true, help = "Profile server base URL (overrides PROFILE_API_URL)")]
    pub url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Read and update the remote profile")]
    Profile {
        #[command(subcommand)]
        cmd: commands::profile::ProfileCommands,
    },

    #[command(about = "Validate a profile payload locally")]
    Validate {
        #[arg(help = "JSON payload, or '-' / omitted to read stdin")]
        payload: Option<String>,
        #[arg(long, help = "Section key to validate against (bankDetail, tax, insurance)")]
        section: Option<String>,
        #[arg(long, help = "Require a complete record instead of a partial one", conflicts_with = "section")]
        complete: bool,
    },

    #[command(about = "Show the default profile a new form starts from")]
    Defaults,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
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

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);

    match cli.command {
        Commands::Profile { cmd } => commands::profile::handle(cmd, cli.url, output_format).await,
        Commands::Validate {
            payload,
            section,
            complete,
        } => commands::validate::handle(payload, section, complete, output_format),
        Commands::Defaults => commands::validate::defaults(output_format),
    }
}
