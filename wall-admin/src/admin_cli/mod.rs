pub mod session_commands;
pub mod user_commands;
pub mod utils;
