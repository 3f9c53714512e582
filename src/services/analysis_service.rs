//! Rule-based code review
//!
//! Stands in for a model-backed reviewer. Nothing is executed: every rule is a
//! text check over the submission, so the same code always gets the same
//! review.

use std::sync::LazyLock;

use regex::Regex;

use crate::{
    fixtures,
    models::{
        impact_for, Difficulty, Feedback, Issue, Pattern, Problem, Recommendation, RunReport,
        RunResult, Severity, WeaknessProfile,
    },
    utils::validation::meaningful_lines,
};

static LOOP_KEYWORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(for|while)\b").expect("loop pattern is valid"));

/// Substrings that count as an empty-input guard
const EMPTY_INPUT_GUARDS: [&str; 4] = ["if not", "len(", ".length", "if (!"];

/// Examples that pass for any non-empty snippet
const LENIENT_EXAMPLES: usize = 2;

const WRONG_ANSWER: &str = "Wrong Answer";

/// Everything derived from one submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Review {
    pub report: RunReport,
    pub patterns: Vec<Pattern>,
    pub feedback: Feedback,
}

/// Estimated asymptotic cost
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Complexity {
    pub time: &'static str,
    pub space: &'static str,
}

/// Code review service
pub struct AnalysisService;

impl AnalysisService {
    /// Check the code against every example of a problem
    pub fn run_examples(problem: &Problem, code: &str) -> RunReport {
        let has_body = meaningful_lines(code).next().is_some();
        let guarded = guards_empty_input(code);

        let results: Vec<RunResult> = problem
            .examples
            .iter()
            .enumerate()
            .map(|(i, example)| {
                let passed = has_body && (i < LENIENT_EXAMPLES || guarded);
                let output = match (passed, has_body) {
                    (true, _) => example.output.clone(),
                    (false, true) => WRONG_ANSWER.to_string(),
                    (false, false) => String::new(),
                };
                RunResult {
                    input: example.input.clone(),
                    output,
                    expected: example.output.clone(),
                    passed,
                }
            })
            .collect();

        RunReport {
            passed: results.iter().filter(|r| r.passed).count() as u32,
            total: results.len() as u32,
            results,
        }
    }

    /// Weakness patterns present in the code
    pub fn detect_patterns(code: &str) -> Vec<Pattern> {
        let mut patterns = Vec::new();
        if !guards_empty_input(code) {
            patterns.push(Pattern::EdgeCaseMissing);
        }
        if loop_count(code) >= 2 {
            patterns.push(Pattern::SuboptimalTimeComplexity);
        }
        if code.contains("in range") && code.contains('[') && !code.contains('{') {
            patterns.push(Pattern::WrongDataStructure);
        }
        patterns
    }

    pub fn estimate_complexity(code: &str) -> Complexity {
        let time = match loop_count(code) {
            0 => "O(1)",
            1 => "O(n)",
            _ => "O(n²)",
        };
        let space = if code.contains('{') || code.contains("[]") {
            "O(n)"
        } else {
            "O(1)"
        };
        Complexity { time, space }
    }

    /// Review a submission and build its feedback
    pub fn review(submission_id: &str, problem: &Problem, code: &str) -> Review {
        let report = Self::run_examples(problem, code);
        let patterns = Self::detect_patterns(code);
        let complexity = Self::estimate_complexity(code);

        let feedback = Feedback {
            submission_id: submission_id.to_string(),
            score: score(&report, &patterns),
            corrected_code: fixtures::reference_solution(&problem.id)
                .unwrap_or_default()
                .to_string(),
            issues: patterns.iter().map(|p| issue(*p, code)).collect(),
            strengths: strengths(&report, &patterns, complexity),
            recommendations: advice(&patterns),
            explanation: explanation(&report, &patterns, complexity),
        };

        Review {
            report,
            patterns,
            feedback,
        }
    }

    /// Dashboard recommendations for a profile
    ///
    /// A problem aimed at the weakest pattern comes first, followed by a study
    /// tip for the same pattern.
    pub fn recommendations(
        profile: &WeaknessProfile,
        problems: &[Problem],
        problems_solved: u32,
    ) -> Vec<Recommendation> {
        let Some(target) = profile.weakest().first().copied() else {
            return Vec::new();
        };
        let mastery = profile.mastery(target);
        let impact = impact_for(mastery);

        let difficulty = match problems_solved {
            0 => Difficulty::Easy,
            1 => Difficulty::Medium,
            _ => Difficulty::Hard,
        };

        let mut recommendations = Vec::with_capacity(2);
        if let Some(problem) = problems
            .iter()
            .find(|p| p.difficulty == difficulty)
            .or_else(|| problems.first())
        {
            recommendations.push(Recommendation {
                id: problem.id.clone(),
                title: format!("Try {}", problem.title),
                description: format!(
                    "This problem targets your weakest area: {}. Your current mastery: {}/100",
                    target.label(),
                    mastery
                ),
                impact,
            });
        }

        recommendations.push(Recommendation {
            id: target.key().replace('_', "-"),
            title: tip_title(target).to_string(),
            description: tip(target).to_string(),
            impact,
        });
        recommendations
    }
}

fn guards_empty_input(code: &str) -> bool {
    EMPTY_INPUT_GUARDS.iter().any(|guard| code.contains(guard))
}

fn loop_count(code: &str) -> usize {
    LOOP_KEYWORD.find_iter(code).count()
}

fn pattern_description(pattern: Pattern) -> &'static str {
    match pattern {
        Pattern::EdgeCaseMissing => "Code doesn't check for empty or null inputs",
        Pattern::SuboptimalTimeComplexity => "Nested loops detected - may have O(n²) complexity",
        Pattern::WrongDataStructure => "Using list when hash map might be more efficient",
    }
}

fn issue(pattern: Pattern, code: &str) -> Issue {
    let (title, line) = match pattern {
        Pattern::EdgeCaseMissing => ("Missing edge-case handling", None),
        Pattern::SuboptimalTimeComplexity => (
            "Nested loops",
            // The second loop is the nested one
            line_of(code, |line| LOOP_KEYWORD.is_match(line), 1),
        ),
        Pattern::WrongDataStructure => (
            "List used for lookups",
            line_of(code, |line| line.contains("in range"), 0),
        ),
    };

    Issue {
        title: title.to_string(),
        description: pattern_description(pattern).to_string(),
        severity: pattern.severity(),
        line,
    }
}

/// 1-based number of the `nth` line matching `matches`
fn line_of(code: &str, matches: impl Fn(&str) -> bool, nth: usize) -> Option<u32> {
    code.lines()
        .enumerate()
        .filter(|(_, line)| matches(*line))
        .nth(nth)
        .map(|(i, _)| i as u32 + 1)
}

fn score(report: &RunReport, patterns: &[Pattern]) -> u8 {
    let failed = i32::try_from(report.total - report.passed).unwrap_or(i32::MAX / 15);
    let penalty: i32 = patterns
        .iter()
        .map(|p| match p.severity() {
            Severity::High => 25,
            Severity::Medium => 15,
            Severity::Low => 5,
        })
        .sum();

    (100 - failed.saturating_mul(15) - penalty).clamp(0, 100) as u8
}

fn strengths(report: &RunReport, patterns: &[Pattern], complexity: Complexity) -> Vec<String> {
    let mut strengths = Vec::new();
    if report.all_passed() {
        strengths.push("Passes every example".to_string());
    }
    if !patterns.contains(&Pattern::EdgeCaseMissing) {
        strengths.push("Guards against empty input".to_string());
    }
    if !patterns.contains(&Pattern::SuboptimalTimeComplexity) {
        strengths.push(format!("Runs in {} time", complexity.time));
    }
    strengths
}

fn advice(patterns: &[Pattern]) -> Vec<String> {
    if patterns.is_empty() {
        return vec!["Try a harder problem next".to_string()];
    }
    patterns.iter().map(|p| tip(*p).to_string()).collect()
}

fn tip_title(pattern: Pattern) -> &'static str {
    match pattern {
        Pattern::EdgeCaseMissing => "Practice edge cases",
        Pattern::SuboptimalTimeComplexity => "Flatten nested loops",
        Pattern::WrongDataStructure => "Reach for hash maps",
    }
}

fn tip(pattern: Pattern) -> &'static str {
    match pattern {
        Pattern::EdgeCaseMissing => "Return early when the input is empty",
        Pattern::SuboptimalTimeComplexity => "Replace the inner loop with a hash map lookup",
        Pattern::WrongDataStructure => "Use a hash map for constant-time lookups",
    }
}

fn explanation(report: &RunReport, patterns: &[Pattern], complexity: Complexity) -> String {
    let mut text = if report.all_passed() && patterns.is_empty() {
        "Great job! Your solution passes all tests and shows good coding practices.".to_string()
    } else {
        let mut text = String::from("Here's what I noticed:\n\n");
        if !report.all_passed() {
            text.push_str("Some test cases failed. Focus on edge cases like empty inputs.\n\n");
        }
        if !patterns.is_empty() {
            text.push_str("Detected patterns:\n");
            for pattern in patterns {
                text.push_str(&format!("- {}: {}\n", pattern.key(), pattern_description(*pattern)));
            }
        }
        text.push_str("\nNext steps: Try to handle edge cases first, then optimize complexity.");
        text
    };

    text.push_str(&format!(
        "\n\nEstimated complexity: time {}, space {}.",
        complexity.time, complexity.space
    ));
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_sum() -> Problem {
        fixtures::problem("two-sum").unwrap()
    }

    const GUARDED: &str = "function twoSum(nums, target) {\n\
                           \x20 if (!nums) return [];\n\
                           \x20 const seen = new Map();\n\
                           \x20 for (let i = 0; i < nums.length; i++) {}\n\
                           }";

    const NESTED: &str = "for i in range(len(nums)):\n\
                          \x20   for j in range(i):\n\
                          \x20       if nums[i] + nums[j] == target:\n\
                          \x20           return [j, i]";

    #[test]
    fn test_unguarded_code_fails_last_example() {
        let report = AnalysisService::run_examples(&two_sum(), "return [0, 1];");
        assert_eq!(report.total, 3);
        assert_eq!(report.passed, 2);
        assert!(!report.all_passed());
        assert_eq!(report.results[2].output, WRONG_ANSWER);
        assert_eq!(report.results[0].output, report.results[0].expected);
    }

    #[test]
    fn test_guarded_code_passes_everything() {
        let report = AnalysisService::run_examples(&two_sum(), GUARDED);
        assert!(report.all_passed());
    }

    #[test]
    fn test_comment_only_code_fails_everything() {
        let report = AnalysisService::run_examples(&two_sum(), "// Write your code here\n\n");
        assert_eq!(report.passed, 0);
        assert!(report.results.iter().all(|r| r.output.is_empty()));
    }

    #[test]
    fn test_detect_patterns() {
        assert_eq!(
            AnalysisService::detect_patterns("return [0, 1];"),
            vec![Pattern::EdgeCaseMissing]
        );
        assert_eq!(
            AnalysisService::detect_patterns(NESTED),
            vec![Pattern::SuboptimalTimeComplexity, Pattern::WrongDataStructure]
        );
        assert!(AnalysisService::detect_patterns(GUARDED).is_empty());
        // "format" and "before" are not loops
        assert!(
            !AnalysisService::detect_patterns("if not x: format(before)")
                .contains(&Pattern::SuboptimalTimeComplexity)
        );
    }

    #[test]
    fn test_estimate_complexity() {
        assert_eq!(
            AnalysisService::estimate_complexity("return 1"),
            Complexity {
                time: "O(1)",
                space: "O(1)"
            }
        );
        assert_eq!(AnalysisService::estimate_complexity(GUARDED).time, "O(n)");
        assert_eq!(AnalysisService::estimate_complexity(GUARDED).space, "O(n)");
        assert_eq!(AnalysisService::estimate_complexity(NESTED).time, "O(n²)");
    }

    #[test]
    fn test_review_of_clean_code() {
        let review = AnalysisService::review("s1", &two_sum(), GUARDED);
        let feedback = review.feedback;

        assert_eq!(feedback.submission_id, "s1");
        assert_eq!(feedback.score, 100);
        assert!(feedback.issues.is_empty());
        assert!(feedback.explanation.starts_with("Great job!"));
        assert!(feedback.explanation.ends_with("time O(n), space O(n)."));
        assert_eq!(
            Some(feedback.corrected_code.as_str()),
            fixtures::reference_solution("two-sum")
        );
    }

    #[test]
    fn test_review_of_weak_code() {
        let review = AnalysisService::review("s2", &two_sum(), "return [0, 1];");
        let feedback = review.feedback;

        // One failed example plus one high-severity issue
        assert_eq!(feedback.score, 60);
        assert_eq!(review.patterns, vec![Pattern::EdgeCaseMissing]);
        assert_eq!(feedback.issues[0].severity, Severity::High);
        assert!(feedback.explanation.contains("Some test cases failed"));
        assert!(feedback.explanation.contains("- edge_case_missing:"));
        assert_eq!(feedback.recommendations, vec![tip(Pattern::EdgeCaseMissing)]);
    }

    #[test]
    fn test_nested_loop_issue_points_at_inner_loop() {
        let review = AnalysisService::review("s3", &two_sum(), NESTED);
        let nested = review
            .feedback
            .issues
            .iter()
            .find(|i| i.severity == Severity::Medium)
            .unwrap();
        assert_eq!(nested.line, Some(2));
    }

    #[test]
    fn test_recommendations_follow_profile() {
        let problems = fixtures::problems();
        let profile = WeaknessProfile::default();

        let fresh = AnalysisService::recommendations(&profile, &problems, 0);
        assert_eq!(fresh.len(), 2);
        assert_eq!(fresh[0].id, "two-sum");
        assert_eq!(
            fresh[0].description,
            "This problem targets your weakest area: edge case missing. Your current mastery: 45/100"
        );
        assert_eq!(fresh[1].id, "edge-case-missing");

        let mut improved = profile;
        for _ in 0..10 {
            improved.record(&[Pattern::WrongDataStructure], false);
        }
        let later = AnalysisService::recommendations(&improved, &problems, 1);
        assert_eq!(later[0].id, "valid-parentheses");
        assert!(later[0].description.contains("wrong data structure"));
    }
}
