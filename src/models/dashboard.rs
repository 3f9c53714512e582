//! Dashboard model

use serde::{Deserialize, Serialize};

use super::Problem;

/// Everything the dashboard screen shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub problems: Vec<Problem>,
    pub recommendations: Vec<Recommendation>,
    /// Percentage of problems solved (0..=100)
    pub progress: u8,
    pub problems_solved: u32,
    pub total_problems: u32,
}

/// Study recommendation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub id: String,
    pub title: String,
    pub description: String,
    pub impact: Impact,
}

/// Expected impact of following a recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    Low,
    Medium,
    High,
}

/// Compute the progress percentage, clamped to 100
pub fn progress_percent(solved: u32, total: u32) -> u8 {
    if total == 0 {
        return 0;
    }
    let percent = (u64::from(solved) * 100) / u64::from(total);
    percent.min(100) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_percent() {
        assert_eq!(progress_percent(0, 0), 0);
        assert_eq!(progress_percent(1, 3), 33);
        assert_eq!(progress_percent(3, 3), 100);
        assert_eq!(progress_percent(5, 3), 100);
    }
}
