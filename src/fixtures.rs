//! Canned payloads served by the stub API and the mock gateway

use crate::models::{Difficulty, Example, Feedback, Issue, Problem, Severity};

/// Problems listed on the dashboard
pub fn problems() -> Vec<Problem> {
    vec![
        Problem {
            id: "two-sum".to_string(),
            title: "Two Sum".to_string(),
            description: "Given an array of integers nums and an integer target, return the \
                          indices of the two numbers that add up to target."
                .to_string(),
            difficulty: Difficulty::Easy,
            category: Some("Arrays".to_string()),
            examples: vec![
                Example {
                    input: "nums = [2,7,11,15], target = 9".to_string(),
                    output: "[0,1]".to_string(),
                    explanation: Some("nums[0] + nums[1] == 9".to_string()),
                },
                Example {
                    input: "nums = [3,2,4], target = 6".to_string(),
                    output: "[1,2]".to_string(),
                    explanation: None,
                },
                Example {
                    input: "nums = [3,3], target = 6".to_string(),
                    output: "[0,1]".to_string(),
                    explanation: Some("Both entries share a value".to_string()),
                },
            ],
            constraints: vec![
                "2 <= nums.length <= 10^4".to_string(),
                "Exactly one valid answer exists".to_string(),
            ],
        },
        Problem {
            id: "valid-parentheses".to_string(),
            title: "Valid Parentheses".to_string(),
            description: "Given a string containing only brackets, determine whether every \
                          bracket is closed in the correct order."
                .to_string(),
            difficulty: Difficulty::Medium,
            category: Some("Stacks".to_string()),
            examples: vec![
                Example {
                    input: "s = \"()[]{}\"".to_string(),
                    output: "true".to_string(),
                    explanation: None,
                },
                Example {
                    input: "s = \"(]\"".to_string(),
                    output: "false".to_string(),
                    explanation: Some("The bracket types do not match".to_string()),
                },
                Example {
                    input: "s = \"(\"".to_string(),
                    output: "false".to_string(),
                    explanation: Some("An opening bracket is never closed".to_string()),
                },
            ],
            constraints: vec!["1 <= s.length <= 10^4".to_string()],
        },
        Problem {
            id: "merge-intervals".to_string(),
            title: "Merge Intervals".to_string(),
            description: "Merge all overlapping intervals and return the non-overlapping \
                          intervals that cover the input."
                .to_string(),
            difficulty: Difficulty::Hard,
            category: None,
            examples: vec![
                Example {
                    input: "intervals = [[1,3],[2,6],[8,10]]".to_string(),
                    output: "[[1,6],[8,10]]".to_string(),
                    explanation: Some("[1,3] and [2,6] overlap".to_string()),
                },
                Example {
                    input: "intervals = [[1,4],[4,5]]".to_string(),
                    output: "[[1,5]]".to_string(),
                    explanation: Some("Touching intervals merge".to_string()),
                },
                Example {
                    input: "intervals = [[1,4]]".to_string(),
                    output: "[[1,4]]".to_string(),
                    explanation: None,
                },
            ],
            constraints: vec!["1 <= intervals.length <= 10^4".to_string()],
        },
    ]
}

/// Look up a single problem by id
pub fn problem(id: &str) -> Option<Problem> {
    problems().into_iter().find(|p| p.id == id)
}

/// Reference solution shown as corrected code
pub fn reference_solution(problem_id: &str) -> Option<&'static str> {
    let solution = match problem_id {
        "two-sum" => {
            "function twoSum(nums, target) {\n\
             \x20 if (!nums || nums.length < 2) return [];\n\
             \x20 const seen = new Map();\n\
             \x20 for (let i = 0; i < nums.length; i++) {\n\
             \x20   const j = seen.get(target - nums[i]);\n\
             \x20   if (j !== undefined) return [j, i];\n\
             \x20   seen.set(nums[i], i);\n\
             \x20 }\n\
             \x20 return [];\n\
             }"
        }
        "valid-parentheses" => {
            "function isValid(s) {\n\
             \x20 if (!s) return true;\n\
             \x20 const pairs = { ')': '(', ']': '[', '}': '{' };\n\
             \x20 const stack = [];\n\
             \x20 for (const c of s) {\n\
             \x20   if (!pairs[c]) stack.push(c);\n\
             \x20   else if (stack.pop() !== pairs[c]) return false;\n\
             \x20 }\n\
             \x20 return stack.length === 0;\n\
             }"
        }
        "merge-intervals" => {
            "function merge(intervals) {\n\
             \x20 if (!intervals || intervals.length === 0) return [];\n\
             \x20 const sorted = [...intervals].sort((a, b) => a[0] - b[0]);\n\
             \x20 const merged = [sorted[0]];\n\
             \x20 for (const [start, end] of sorted.slice(1)) {\n\
             \x20   const last = merged[merged.length - 1];\n\
             \x20   if (start <= last[1]) last[1] = Math.max(last[1], end);\n\
             \x20   else merged.push([start, end]);\n\
             \x20 }\n\
             \x20 return merged;\n\
             }"
        }
        _ => return None,
    };
    Some(solution)
}

/// Canned feedback of the sample submission
pub fn feedback(submission_id: &str) -> Feedback {
    Feedback {
        submission_id: submission_id.to_string(),
        score: 85,
        corrected_code: "// corrected example code\nfunction example(){ return true; }"
            .to_string(),
        issues: vec![Issue {
            title: "Missing edge-case handling".to_string(),
            description: "Does not handle empty input".to_string(),
            severity: Severity::Medium,
            line: Some(3),
        }],
        strengths: vec!["Clear naming".to_string(), "Modular functions".to_string()],
        recommendations: vec![
            "Add input validation".to_string(),
            "Use hashmap to optimize".to_string(),
        ],
        explanation: "Your solution works for typical cases but fails on empty inputs. \
                      Add a guard clause at the top."
            .to_string(),
    }
}
