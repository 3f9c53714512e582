//! Domain models
//!
//! This module contains the domain models shared by the API and the client.

pub mod dashboard;
pub mod feedback;
pub mod problem;
pub mod progress;
pub mod submission;
pub mod user;

pub use dashboard::*;
pub use feedback::*;
pub use problem::*;
pub use progress::*;
pub use submission::*;
pub use user::*;
