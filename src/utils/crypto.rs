//! Token generation utilities

use rand::RngCore;

/// Generate a random hex token of `length` characters
pub fn generate_secure_token(length: usize) -> String {
    let mut bytes = vec![0u8; length.div_ceil(2)];
    rand::rng().fill_bytes(&mut bytes);

    let mut token = hex::encode(bytes);
    token.truncate(length);
    token
}

/// Generate a fresh submission identifier
pub fn generate_submission_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}
