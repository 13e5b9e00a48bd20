//! docvault CLI
//!
//! Command-line access to the canonical document and its snapshots

use clap::{Parser, Subcommand};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "docvault")]
#[command(about = "docvault - single YAML document with timestamped backups", long_about = None)]
struct Cli {
    #[command(flatten)]
    store: commands::StoreArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print the current document (creating the default one if absent)
    Show,
    /// Check a file for YAML syntax errors
    Validate(commands::validate::ValidateArgs),
    /// Replace the document with a file's content, backing up the current one
    Save(commands::save::SaveArgs),
    /// List snapshots, newest first
    Backups,
    /// Replace the document with a snapshot, backing up the current one
    Restore(commands::restore::RestoreArgs),
}

fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Show => commands::show::execute(&cli.store),
        Commands::Validate(args) => commands::validate::execute(args),
        Commands::Save(args) => commands::save::execute(&cli.store, args),
        Commands::Backups => commands::backups::execute(&cli.store),
        Commands::Restore(args) => commands::restore::execute(&cli.store, args),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
