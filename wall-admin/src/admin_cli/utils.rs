use diesel::{prelude::*, sqlite::SqliteConnection};
use dotenvy::dotenv;
use std::io::{self, Write};

pub fn establish_connection() -> Result<SqliteConnection, Box<dyn std::error::Error>> {
    dotenv().ok();
    let database_url =
        std::env::var("DATABASE_URL").map_err(|_| "DATABASE_URL must be set")?;
    let conn = SqliteConnection::establish(&database_url)?;
    Ok(conn)
}

/// Prompts twice for a password on the terminal, without echo.
pub fn prompt_for_password() -> Result<String, Box<dyn std::error::Error>> {
    print!("Password: ");
    io::stdout().flush()?;
    let password = rpassword::read_password()?;

    print!("Confirm password: ");
    io::stdout().flush()?;
    let confirmation = rpassword::read_password()?;

    if password != confirmation {
        return Err("Passwords do not match".into());
    }
    if password.is_empty() {
        return Err("Password must not be empty".into());
    }
    Ok(password)
}

/// Asks for a y/N confirmation on stdin.
pub fn confirm(prompt: &str) -> Result<bool, Box<dyn std::error::Error>> {
    print!("{} [y/N] ", prompt);
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}
