//! Weakness profile model

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{Impact, Severity};

/// Weakness category detected in submitted code
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pattern {
    EdgeCaseMissing,
    SuboptimalTimeComplexity,
    WrongDataStructure,
}

impl Pattern {
    pub const ALL: [Pattern; 3] = [
        Pattern::EdgeCaseMissing,
        Pattern::SuboptimalTimeComplexity,
        Pattern::WrongDataStructure,
    ];

    /// Identifier as used in explanations and recommendation ids
    pub fn key(self) -> &'static str {
        match self {
            Self::EdgeCaseMissing => "edge_case_missing",
            Self::SuboptimalTimeComplexity => "suboptimal_time_complexity",
            Self::WrongDataStructure => "wrong_data_structure",
        }
    }

    /// Human-readable area name
    pub fn label(self) -> String {
        self.key().replace('_', " ")
    }

    pub fn severity(self) -> Severity {
        match self {
            Self::EdgeCaseMissing => Severity::High,
            Self::SuboptimalTimeComplexity => Severity::Medium,
            Self::WrongDataStructure => Severity::Low,
        }
    }

    /// Mastery a new user starts with
    fn initial_mastery(self) -> u8 {
        match self {
            Self::EdgeCaseMissing => 45,
            Self::SuboptimalTimeComplexity => 60,
            Self::WrongDataStructure => 50,
        }
    }
}

/// Direction a mastery score moved after a submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Improving,
    Declining,
    Stable,
}

/// Mastery per pattern (0..=100) for one user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeaknessProfile {
    mastery: BTreeMap<Pattern, u8>,
}

impl Default for WeaknessProfile {
    fn default() -> Self {
        Self {
            mastery: Pattern::ALL
                .into_iter()
                .map(|pattern| (pattern, pattern.initial_mastery()))
                .collect(),
        }
    }
}

impl WeaknessProfile {
    pub fn mastery(&self, pattern: Pattern) -> u8 {
        self.mastery
            .get(&pattern)
            .copied()
            .unwrap_or_else(|| pattern.initial_mastery())
    }

    /// Lowest mastery first; ties keep declaration order
    pub fn weakest(&self) -> Vec<Pattern> {
        let mut patterns = Pattern::ALL.to_vec();
        patterns.sort_by_key(|p| (self.mastery(*p), *p));
        patterns
    }

    /// Mean mastery over all patterns
    pub fn overall(&self) -> u8 {
        let total: u32 = Pattern::ALL.iter().map(|p| u32::from(self.mastery(*p))).sum();
        (total / Pattern::ALL.len() as u32) as u8
    }

    /// Fold in the outcome of one submission
    pub fn record(&mut self, detected: &[Pattern], solved: bool) -> Vec<(Pattern, Trend)> {
        Pattern::ALL
            .into_iter()
            .map(|pattern| {
                let current = self.mastery(pattern);
                let (next, trend) = if detected.contains(&pattern) {
                    (current.saturating_sub(5), Trend::Declining)
                } else if solved {
                    ((current + 3).min(100), Trend::Improving)
                } else {
                    (current, Trend::Stable)
                };
                self.mastery.insert(pattern, next);
                (pattern, trend)
            })
            .collect()
    }
}

/// Recommendation impact for a mastery score
pub fn impact_for(mastery: u8) -> Impact {
    match mastery {
        0..50 => Impact::High,
        50..70 => Impact::Medium,
        _ => Impact::Low,
    }
}
