use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "rhythm", version, about = "Rhythm daily planner")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile rulesets into day schedules
    Schedule {
        #[command(subcommand)]
        action: commands::schedule::ScheduleAction,
    },
    /// Preview or reset a day's plan
    Plan {
        #[command(subcommand)]
        action: commands::plan::PlanAction,
    },
    /// Ruleset file management
    Rules {
        #[command(subcommand)]
        action: commands::rules::RulesAction,
    },
    /// List Google task lists
    Tasklists,
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Interactive shell
    Shell,
}

fn main() {
    rhythm_core::logging::init("warn");

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Schedule { action } => commands::schedule::run(action),
        Commands::Plan { action } => commands::plan::run(action),
        Commands::Rules { action } => commands::rules::run(action),
        Commands::Tasklists => commands::tasklists::run(),
        Commands::Config { action } => commands::config::run(action),
        Commands::Shell => commands::shell::run(),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
