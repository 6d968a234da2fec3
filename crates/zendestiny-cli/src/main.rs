use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Debug, Parser)]
#[command(name = "zendestiny")]
#[command(about = "BaZi four-pillars chart toolkit")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Birth data shared by the chart-deriving commands.
#[derive(Debug, Args)]
struct BirthArgs {
    /// Birth date as YYYY-MM-DD.
    #[arg(long)]
    date: String,
    /// Birth time as HH:MM.
    #[arg(long)]
    time: String,
    /// Gender: male or female.
    #[arg(long)]
    gender: String,
    /// Birth place, free text.
    #[arg(long)]
    place: String,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Derive and print the four-pillars chart.
    Chart {
        #[command(flatten)]
        birth: BirthArgs,
        /// Save the profile to the history (deduplicated).
        #[arg(long)]
        save: bool,
    },
    /// Print the chart plus today's fortune (cached per day).
    Fortune {
        #[command(flatten)]
        birth: BirthArgs,
        /// Bypass the cache read and fetch a fresh fortune.
        #[arg(long)]
        refresh: bool,
        /// Output language: en or zh.
        #[arg(long)]
        lang: Option<String>,
    },
    /// Interactive consultation chat about the chart.
    Chat {
        #[command(flatten)]
        birth: BirthArgs,
        /// Output language: en or zh.
        #[arg(long)]
        lang: Option<String>,
    },
    /// Saved-profile history.
    Profiles {
        #[command(subcommand)]
        command: ProfilesCommands,
    },
}

#[derive(Debug, Subcommand)]
enum ProfilesCommands {
    /// List all saved profiles.
    List,
    /// Delete a saved profile by id.
    Delete { id: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = zendestiny_core::load_app_config()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone())),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Chart { birth, save } => commands::run_chart(&config, &birth, save),
        Commands::Fortune { birth, refresh, lang } => {
            commands::run_fortune(&config, &birth, refresh, lang.as_deref()).await
        }
        Commands::Chat { birth, lang } => {
            commands::run_chat(&config, &birth, lang.as_deref()).await
        }
        Commands::Profiles { command } => match command {
            ProfilesCommands::List => commands::run_profiles_list(&config),
            ProfilesCommands::Delete { id } => commands::run_profiles_delete(&config, &id),
        },
    }
}

#[cfg(test)]
mod tests;
