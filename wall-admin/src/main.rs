// wall-admin/src/main.rs

use clap::{Parser, Subcommand};

mod admin_cli;

use admin_cli::session_commands::{SessionAction, handle_session_command};
use admin_cli::user_commands::{UserAction, handle_user_command};
use admin_cli::utils::establish_connection;

pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

#[derive(Parser)]
#[command(name = "wall-admin")]
#[command(about = "Maintenance CLI for the suggestion wall database")]
#[command(version)]
struct Cli {
    /// Show extended version information
    #[arg(long, action = clap::ArgAction::SetTrue)]
    version_info: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Manage admin accounts")]
    User {
        #[command(subcommand)]
        action: UserAction,
    },
    #[command(about = "Inspect and revoke sessions")]
    Session {
        #[command(subcommand)]
        action: SessionAction,
    },
}

fn main() {
    let cli = Cli::parse();

    if cli.version_info {
        println!("wall-admin {}", built_info::PKG_VERSION);
        println!("Built: {}", built_info::BUILT_TIME_UTC);
        if let Some(commit) = built_info::GIT_COMMIT_HASH {
            println!("Git commit: {}", commit);
        }
        return;
    }

    let Some(command) = cli.command else {
        eprintln!("No command given; see --help");
        std::process::exit(2);
    };

    let mut conn = match establish_connection() {
        Ok(conn) => conn,
        Err(e) => {
            eprintln!("Error connecting to database: {}", e);
            std::process::exit(1);
        }
    };

    let result = match command {
        Commands::User { action } => handle_user_command(&mut conn, action),
        Commands::Session { action } => handle_session_command(&mut conn, action),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
