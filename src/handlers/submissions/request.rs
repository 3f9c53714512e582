//! Run/submit request DTOs

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::constants::{MAX_PROBLEM_ID_LENGTH, MAX_SOURCE_CODE_SIZE};

/// Body shared by `/run` and `/submit`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CodeRequest {
    /// Source code
    #[validate(length(min = 1, max = MAX_SOURCE_CODE_SIZE))]
    pub code: String,

    /// Problem the code is written for
    #[validate(length(min = 1, max = MAX_PROBLEM_ID_LENGTH))]
    pub problem_id: String,
}
