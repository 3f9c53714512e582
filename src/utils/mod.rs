//! Utility functions

pub mod crypto;
pub mod validation;

pub use crypto::{generate_secure_token, generate_submission_id};
pub use validation::{
    validate_email, validate_source_code, validate_submission_id, SubmissionIdError,
};
