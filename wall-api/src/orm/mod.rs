pub mod admin_user;
mod db;
pub mod login;
pub mod logout;
pub mod stats;
pub mod submission;
pub mod testing;

pub use db::*;
