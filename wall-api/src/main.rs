// wall-api/src/main.rs

use clap::Parser;
use rocket::error;
use rocket::info;
use std::env;

use wall_api::built_info;

#[derive(Parser)]
#[command(name = "wall-api")]
#[command(about = "Suggestion wall API server")]
#[command(version)]
struct Cli {
    /// Show extended version information
    #[arg(long, action = clap::ArgAction::SetTrue)]
    version_info: bool,
}

#[rocket::main]
async fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // Handle --version-info flag
    if cli.version_info {
        println!("wall-api {}", built_info::PKG_VERSION);
        println!("Built: {}", built_info::BUILT_TIME_UTC);
        if let Some(commit) = built_info::GIT_COMMIT_HASH {
            println!("Git commit: {}", commit);
        }
        return;
    }

    match env::current_dir() {
        Ok(path) => info!("Current directory: {}", path.display()),
        Err(e) => error!("Error getting current directory: {}", e),
    };

    info!("wall-api v{} starting", built_info::PKG_VERSION);
    info!("Built: {}", built_info::BUILT_TIME_UTC);
    if let Some(commit) = built_info::GIT_COMMIT_HASH {
        info!("Git commit: {}", commit);
    }

    wall_api::rocket()
        .launch()
        .await
        .expect("Rocket server failed to launch");
}
