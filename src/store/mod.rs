//! In-memory stores
//!
//! Stores hold the transient submission, session and progress records served
//! by the stub API. Every store is bounded and nothing survives a restart.

pub mod profile_store;
pub mod session_store;
pub mod submission_store;

pub use profile_store::ProfileStore;
pub use session_store::SessionStore;
pub use submission_store::{StoredSubmission, SubmissionStore};
