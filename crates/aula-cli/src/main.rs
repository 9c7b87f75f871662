use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "aula-cli", version, about = "Aula classroom session CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Pairing picker control
    Pairing {
        #[command(subcommand)]
        action: commands::pairing::PairingAction,
    },
    /// Countdown timer control
    Timer {
        #[command(subcommand)]
        action: commands::timer::TimerAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Combined session state
    Session {
        #[command(subcommand)]
        action: commands::session::SessionAction,
    },
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Pairing { action } => commands::pairing::run(action),
        Commands::Timer { action } => commands::timer::run(action),
        Commands::Config { action } => commands::config::run(action),
        Commands::Session { action } => commands::session::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
