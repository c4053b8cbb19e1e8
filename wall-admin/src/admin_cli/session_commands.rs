use chrono::Utc;
use clap::Subcommand;
use diesel::sqlite::SqliteConnection;

use wall_api::orm::login::list_all_sessions;
use wall_api::orm::logout::revoke_session;

#[derive(Subcommand)]
pub enum SessionAction {
    #[command(about = "List sessions, newest first")]
    Ls {
        #[arg(long, help = "Only show sessions that are currently usable")]
        active: bool,
    },
    #[command(about = "Revoke a session by token")]
    Revoke {
        #[arg(help = "Session token to revoke")]
        token: String,
    },
}

pub fn handle_session_command(
    conn: &mut SqliteConnection,
    action: SessionAction,
) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        SessionAction::Ls { active } => list_sessions_impl(conn, active),
        SessionAction::Revoke { token } => revoke_session_impl(conn, &token),
    }
}

fn list_sessions_impl(
    conn: &mut SqliteConnection,
    active_only: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let now = Utc::now().naive_utc();
    let sessions: Vec<_> = list_all_sessions(conn)?
        .into_iter()
        .filter(|s| !active_only || s.is_usable(now))
        .collect();

    if sessions.is_empty() {
        println!("No sessions found.");
        return Ok(());
    }

    println!("Sessions:");
    for session in sessions {
        let state = if session.revoked {
            "revoked"
        } else if session.expires_at <= now {
            "expired"
        } else {
            "active"
        };
        println!(
            "  {} admin={} created={} expires={} [{}]",
            session.id,
            session.admin_id,
            session.created_at.format("%Y-%m-%d %H:%M:%S"),
            session.expires_at.format("%Y-%m-%d %H:%M:%S"),
            state
        );
    }
    Ok(())
}

fn revoke_session_impl(
    conn: &mut SqliteConnection,
    token: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let revoked = revoke_session(conn, token)?;
    if revoked == 0 {
        return Err("No usable session with that token".into());
    }
    println!("Session revoked.");
    Ok(())
}
