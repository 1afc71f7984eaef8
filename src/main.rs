mod catalog;
mod commands;
mod config;
mod diagnostics;
mod error;
mod slots;
mod table;
mod watch;

use std::process::ExitCode;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "msgident",
    about = "Resolve protocol message names to build-specific ids via stable content hashes"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Reconcile all sections and report unresolved names (exit 0/1)
    Check,
    /// Print the id and hash for one name
    Lookup {
        /// Section the name belongs to
        section: String,
        /// Curated message name
        name: String,
    },
    /// List name=id pairs in a section
    Names {
        /// Section to list
        section: String,
        /// Only list names matching this regex
        #[arg(long)]
        filter: Option<String>,
    },
    /// Reconcile all sections and write the resolved name=id snapshot
    Resolve,
    /// Re-run check whenever the curated file or catalog changes
    Watch,
    /// Reverse-look up a resolved id or content hash
    Whois {
        /// Section to search
        section: String,
        /// A numeric id or a content hash
        key: String,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Check => commands::check(),
        Commands::Lookup { section, name } => commands::lookup(&section, &name),
        Commands::Names { section, filter } => commands::names(&section, filter.as_deref()),
        Commands::Resolve => commands::resolve(),
        Commands::Watch => watch::run(),
        Commands::Whois { section, key } => commands::whois(&section, &key),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            diagnostics::print_error(&e);
            ExitCode::from(2)
        },
    }
}
