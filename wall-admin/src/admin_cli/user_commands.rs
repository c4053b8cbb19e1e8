use clap::Subcommand;
use diesel::sqlite::SqliteConnection;
use regex::Regex;

use wall_api::models::NewAdminUser;
use wall_api::orm::admin_user::{
    delete_admin, get_admin_by_username, insert_admin, list_all_admins, update_password_hash,
};
use wall_api::orm::login::hash_password;

use super::utils::{confirm, prompt_for_password};

#[derive(Subcommand)]
pub enum UserAction {
    #[command(about = "Add a new admin account")]
    Add {
        #[arg(short, long, help = "Username")]
        username: String,
        #[arg(short, long, help = "Password (will be prompted securely if not provided)")]
        password: Option<String>,
        #[arg(short, long, default_value = "admin", help = "Role")]
        role: String,
    },
    #[command(about = "Change an admin's password")]
    ChangePassword {
        #[arg(short, long, help = "Username")]
        username: String,
        #[arg(short, long, help = "New password (will be prompted securely if not provided)")]
        password: Option<String>,
    },
    #[command(about = "List admin accounts, optionally filtered by search term")]
    Ls {
        #[arg(help = "Search term (regex by default, use -F for fixed string)")]
        search_term: Option<String>,
        #[arg(
            short = 'F',
            long = "fixed-string",
            help = "Treat search term as fixed string instead of regex"
        )]
        fixed_string: bool,
    },
    #[command(about = "Remove admin accounts matching search term")]
    Rm {
        #[arg(help = "Search term to match accounts for removal (regex by default, use -F for fixed string)")]
        search_term: String,
        #[arg(
            short = 'F',
            long = "fixed-string",
            help = "Treat search term as fixed string instead of regex"
        )]
        fixed_string: bool,
        #[arg(short = 'y', long = "yes", help = "Skip confirmation prompt")]
        yes: bool,
    },
}

pub fn handle_user_command(
    conn: &mut SqliteConnection,
    action: UserAction,
) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        UserAction::Add {
            username,
            password,
            role,
        } => add_admin_impl(conn, &username, password, &role),
        UserAction::ChangePassword { username, password } => {
            change_password_impl(conn, &username, password)
        }
        UserAction::Ls {
            search_term,
            fixed_string,
        } => list_admins_impl(conn, search_term, fixed_string),
        UserAction::Rm {
            search_term,
            fixed_string,
            yes,
        } => remove_admins_impl(conn, &search_term, fixed_string, yes),
    }
}

fn add_admin_impl(
    conn: &mut SqliteConnection,
    username: &str,
    password: Option<String>,
    role: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    if get_admin_by_username(conn, username)?.is_some() {
        return Err(format!("Admin '{}' already exists", username).into());
    }

    let password = match password {
        Some(p) => p,
        None => prompt_for_password()?,
    };

    let created = insert_admin(
        conn,
        NewAdminUser {
            username: username.to_string(),
            password_hash: hash_password(&password),
            role: role.to_string(),
            last_login: None,
        },
    )?;

    println!("Admin created successfully!");
    println!("ID: {}", created.id);
    println!("Username: {}", created.username);
    println!("Role: {}", created.role);
    Ok(())
}

fn change_password_impl(
    conn: &mut SqliteConnection,
    username: &str,
    password: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let admin = get_admin_by_username(conn, username)?
        .ok_or_else(|| format!("Admin '{}' not found", username))?;

    let password = match password {
        Some(p) => p,
        None => prompt_for_password()?,
    };

    update_password_hash(conn, admin.id, &hash_password(&password))?;
    println!("Password changed successfully for admin: {}", username);
    Ok(())
}

fn matching_admins(
    conn: &mut SqliteConnection,
    search_term: Option<&str>,
    fixed_string: bool,
) -> Result<Vec<wall_api::models::AdminUser>, Box<dyn std::error::Error>> {
    let admins = list_all_admins(conn)?;
    let filtered = match search_term {
        None => admins,
        Some(term) if fixed_string => admins
            .into_iter()
            .filter(|a| a.username.contains(term))
            .collect(),
        Some(term) => {
            let regex = Regex::new(term)
                .map_err(|e| format!("Invalid regex pattern '{}': {}", term, e))?;
            admins
                .into_iter()
                .filter(|a| regex.is_match(&a.username))
                .collect()
        }
    };
    Ok(filtered)
}

fn list_admins_impl(
    conn: &mut SqliteConnection,
    search_term: Option<String>,
    fixed_string: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let admins = matching_admins(conn, search_term.as_deref(), fixed_string)?;

    if admins.is_empty() {
        println!("No admins found.");
        return Ok(());
    }

    println!("Admins:");
    for admin in admins {
        let last_login = admin
            .last_login
            .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| "never".to_string());
        println!(
            "  {} {} (role: {}, last login: {})",
            admin.id, admin.username, admin.role, last_login
        );
    }
    Ok(())
}

fn remove_admins_impl(
    conn: &mut SqliteConnection,
    search_term: &str,
    fixed_string: bool,
    yes: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let admins = matching_admins(conn, Some(search_term), fixed_string)?;

    if admins.is_empty() {
        println!("No admins match '{}'.", search_term);
        return Ok(());
    }

    println!("The following admins will be removed:");
    for admin in &admins {
        println!("  {} {}", admin.id, admin.username);
    }

    if !yes && !confirm("Proceed?")? {
        println!("Aborted.");
        return Ok(());
    }

    for admin in admins {
        // Sessions cascade via the foreign key.
        delete_admin(conn, admin.id)?;
        println!("Removed admin: {}", admin.username);
    }
    Ok(())
}
