pub mod admin_user;
pub mod session;
pub mod submission;

// Re-export models for easier access
pub use admin_user::*;
pub use session::*;
pub use submission::*;
