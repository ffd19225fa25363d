//! Static problem catalog.
//!
//! Each record supplies everything the UI needs to present a problem and
//! everything the grader needs to derive an evaluation configuration:
//! description, constraints, worked examples, a starter template, per-problem
//! structure requirements, and reference test cases. Reference test cases and
//! the sample solution are never serialized to clients.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::{EvaluationConfig, StructureRequirements, TestCase, TestCaseKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// Worked example shown alongside the problem statement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Example {
    pub input: String,
    pub output: Value,
}

/// Reference test case used for local checking of a canonical solution.
/// Not exposed to submitters at grading time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceTestCase {
    pub input: Vec<Value>,
    pub expected_output: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Problem {
    pub id: u32,
    pub title: String,
    pub difficulty: Difficulty,
    pub category: String,
    pub description: String,
    pub constraints: Vec<String>,
    pub examples: Vec<Example>,
    pub hints: Vec<String>,
    /// Skeleton handed to the editor when the problem is opened.
    pub starter_template: String,
    /// Structure requirements applied to submissions for this problem.
    pub structure: StructureRequirements,
    #[serde(skip_serializing)]
    pub sample_solution: String,
    #[serde(skip_serializing)]
    pub test_cases: Vec<ReferenceTestCase>,
}

impl Problem {
    /// Expected printed value of the first reference test case, used when a
    /// submission is graded against a single expected output.
    pub fn primary_expected_output(&self) -> Option<String> {
        self.test_cases.first().map(|tc| printed_form(&tc.expected_output))
    }

    /// Expected printed values of all reference test cases, in order.
    pub fn expected_outputs(&self) -> Vec<String> {
        self.test_cases.iter().map(|tc| printed_form(&tc.expected_output)).collect()
    }

    /// Derive the grading configuration for this problem.
    ///
    /// All reference expectations are checked against the single captured
    /// output of one execution, so each expected value becomes a containment
    /// check; the reported input mirrors the reference arguments.
    pub fn evaluation_config(&self, time_limit_ms: u64) -> EvaluationConfig {
        let test_cases = self
            .test_cases
            .iter()
            .map(|tc| TestCase {
                kind: TestCaseKind::Contains,
                expected: printed_form(&tc.expected_output),
                input: Some(
                    tc.input
                        .iter()
                        .map(printed_form)
                        .collect::<Vec<_>>()
                        .join(", "),
                ),
            })
            .collect();

        EvaluationConfig {
            test_cases,
            structure_checks: self.structure.clone(),
            time_limit_ms,
            ..Default::default()
        }
    }
}

/// How a JSON value appears on the print channel when a submission logs it.
pub fn printed_form(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Look up a problem by id.
pub fn find(id: u32) -> Option<Problem> {
    catalog().into_iter().find(|p| p.id == id)
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn example(input: &str, output: Value) -> Example {
    Example { input: input.to_string(), output }
}

fn reference(input: Vec<Value>, expected_output: Value) -> ReferenceTestCase {
    ReferenceTestCase { input, expected_output }
}

/// The full catalog, id order.
pub fn catalog() -> Vec<Problem> {
    vec![
        Problem {
            id: 1,
            title: "Sum of Two Numbers".to_string(),
            difficulty: Difficulty::Easy,
            category: "Mathematics".to_string(),
            description: "Write a function that takes two numbers as input and returns \
                          their sum. This is a basic problem to get started with function \
                          writing and understanding input/output in programming."
                .to_string(),
            constraints: strings(&[
                "Numbers can be positive or negative",
                "Numbers can be integers or decimals",
            ]),
            examples: vec![
                example("2, 3", Value::from(5)),
                example("-5, 10", Value::from(5)),
            ],
            hints: strings(&["Use the addition operator (+)", "Return the result directly"]),
            starter_template: "// Define sumTwoNumbers(a, b) and print a result\n\
                               function sumTwoNumbers(a, b) {\n  // your code here\n}\n\n\
                               console.log(sumTwoNumbers(2, 3));\n"
                .to_string(),
            structure: StructureRequirements {
                requires_functions: true,
                ..Default::default()
            },
            sample_solution: "function sumTwoNumbers(a, b) {\n  return a + b;\n}\n\n\
                              console.log(sumTwoNumbers(2, 3));\n"
                .to_string(),
            test_cases: vec![
                reference(vec![Value::from(2), Value::from(3)], Value::from(5)),
                reference(vec![Value::from(-5), Value::from(10)], Value::from(5)),
                reference(vec![Value::from(0), Value::from(0)], Value::from(0)),
                reference(vec![Value::from(-10), Value::from(-5)], Value::from(-15)),
            ],
        },
        Problem {
            id: 2,
            title: "Check if Number is Even".to_string(),
            difficulty: Difficulty::Easy,
            category: "Conditional Logic".to_string(),
            description: "Write a function that determines whether a given number is even \
                          or odd. Return true if the number is even, false if it's odd. \
                          This problem teaches you about conditional statements and the \
                          modulo operator."
                .to_string(),
            constraints: strings(&["Input will be an integer", "Can be positive or negative"]),
            examples: vec![
                example("4", Value::from(true)),
                example("7", Value::from(false)),
            ],
            hints: strings(&[
                "Use the modulo operator (%) to find remainder",
                "If remainder is 0, the number is even",
            ]),
            starter_template: "// Define isEven(num) and print a result\n\
                               function isEven(num) {\n  // your code here\n}\n\n\
                               console.log(isEven(4));\n"
                .to_string(),
            structure: StructureRequirements {
                requires_functions: true,
                requires_conditionals: false,
                ..Default::default()
            },
            sample_solution: "function isEven(num) {\n  return num % 2 === 0;\n}\n\n\
                              console.log(isEven(4));\n"
                .to_string(),
            test_cases: vec![
                reference(vec![Value::from(4)], Value::from(true)),
                reference(vec![Value::from(7)], Value::from(false)),
                reference(vec![Value::from(0)], Value::from(true)),
                reference(vec![Value::from(-2)], Value::from(true)),
            ],
        },
        Problem {
            id: 5,
            title: "Factorial of a Number".to_string(),
            difficulty: Difficulty::Medium,
            category: "Mathematics".to_string(),
            description: "Write a function that calculates the factorial of a given number. \
                          The factorial of n (denoted as n!) is the product of all positive \
                          integers less than or equal to n. Example: 5! = 5 x 4 x 3 x 2 x 1 \
                          = 120. This problem teaches you about loops and mathematical \
                          computations."
                .to_string(),
            constraints: strings(&[
                "Input will be a non-negative integer",
                "0! = 1 (by definition)",
                "Factorial grows very quickly",
            ]),
            examples: vec![
                example("5", Value::from(120)),
                example("0", Value::from(1)),
            ],
            hints: strings(&[
                "Handle the base cases (0! = 1, 1! = 1)",
                "Use a loop to multiply numbers from 1 to n",
                "You can also solve this recursively",
            ]),
            starter_template: "// Define factorial(n) and print factorial(5)\n\
                               function factorial(n) {\n  // your code here\n}\n\n\
                               console.log(factorial(5));\n"
                .to_string(),
            structure: StructureRequirements {
                requires_functions: true,
                requires_loops: true,
                ..Default::default()
            },
            sample_solution: "function factorial(n) {\n  if (n === 0 || n === 1) return 1;\n\
                              \n  let result = 1;\n  for (let i = 2; i <= n; i++) {\n    \
                              result *= i;\n  }\n\n  return result;\n}\n\n\
                              console.log(factorial(5));\n"
                .to_string(),
            test_cases: vec![
                reference(vec![Value::from(5)], Value::from(120)),
                reference(vec![Value::from(0)], Value::from(1)),
                reference(vec![Value::from(3)], Value::from(6)),
                reference(vec![Value::from(10)], Value::from(3_628_800)),
            ],
        },
        Problem {
            id: 6,
            title: "Reverse a String".to_string(),
            difficulty: Difficulty::Easy,
            category: "String Manipulation".to_string(),
            description: "Write a function that takes a string and returns a new string \
                          with the characters in reverse order. Example: \"hello\" becomes \
                          \"olleh\". This problem helps you understand string operations \
                          and loops."
                .to_string(),
            constraints: strings(&[
                "Empty string should return empty string",
                "String can contain spaces and special characters",
            ]),
            examples: vec![
                example("hello", Value::from("olleh")),
                example("JavaScript", Value::from("tpircSavaJ")),
            ],
            hints: strings(&[
                "You can use split(), reverse(), and join() methods",
                "Alternatively, use a loop to iterate backwards",
            ]),
            starter_template: "// Define reverseString(str) and print a result\n\
                               function reverseString(str) {\n  // your code here\n}\n\n\
                               console.log(reverseString('hello'));\n"
                .to_string(),
            structure: StructureRequirements {
                requires_functions: true,
                ..Default::default()
            },
            sample_solution: "function reverseString(str) {\n  \
                              return str.split('').reverse().join('');\n}\n\n\
                              console.log(reverseString('hello'));\n"
                .to_string(),
            test_cases: vec![
                reference(vec![Value::from("hello")], Value::from("olleh")),
                reference(vec![Value::from("JavaScript")], Value::from("tpircSavaJ")),
                reference(vec![Value::from("")], Value::from("")),
                reference(vec![Value::from("Hello World")], Value::from("dlroW olleH")),
            ],
        },
        Problem {
            id: 8,
            title: "Find the Sum of Array Elements".to_string(),
            difficulty: Difficulty::Easy,
            category: "Arrays".to_string(),
            description: "Write a function that takes an array of numbers and returns the \
                          sum of all elements in the array. Example: [1, 2, 3, 4, 5] \
                          returns 15. This problem helps you practice array iteration."
                .to_string(),
            constraints: strings(&[
                "Array can contain positive and negative numbers",
                "Empty array should return 0",
            ]),
            examples: vec![
                example("[1, 2, 3, 4, 5]", Value::from(15)),
                example("[-1, -2, 3]", Value::from(0)),
            ],
            hints: strings(&[
                "Use a loop to iterate through the array",
                "Accumulate the sum in a variable",
                "You can use reduce() for a more functional approach",
            ]),
            starter_template: "// Define sumArray(arr) and print a result\n\
                               function sumArray(arr) {\n  // your code here\n}\n\n\
                               console.log(sumArray([1, 2, 3, 4, 5]));\n"
                .to_string(),
            structure: StructureRequirements {
                requires_functions: true,
                requires_loops: true,
                ..Default::default()
            },
            sample_solution: "function sumArray(arr) {\n  \
                              return arr.reduce(function (sum, num) { return sum + num; }, 0);\n\
                              }\n\nconsole.log(sumArray([1, 2, 3, 4, 5]));\n"
                .to_string(),
            test_cases: vec![
                reference(vec![Value::from(vec![1, 2, 3, 4, 5])], Value::from(15)),
                reference(vec![Value::from(vec![-1, -2, 3])], Value::from(0)),
                reference(vec![Value::from(Vec::<i64>::new())], Value::from(0)),
                reference(vec![Value::from(vec![10, 20, 30])], Value::from(60)),
            ],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_ids_unique_and_sorted() {
        let ids: Vec<u32> = catalog().iter().map(|p| p.id).collect();
        let mut sorted = ids.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(ids, sorted);
    }

    #[test]
    fn test_find_known_and_unknown() {
        assert_eq!(find(5).map(|p| p.title), Some("Factorial of a Number".to_string()));
        assert!(find(999).is_none());
    }

    #[test]
    fn test_every_problem_has_reference_tests_and_template() {
        for problem in catalog() {
            assert!(!problem.test_cases.is_empty(), "problem {} has no tests", problem.id);
            assert!(!problem.starter_template.is_empty());
            assert!(!problem.sample_solution.is_empty());
        }
    }

    #[test]
    fn test_primary_expected_output_uses_printed_form() {
        let factorial = find(5).unwrap();
        assert_eq!(factorial.primary_expected_output().as_deref(), Some("120"));

        let reverse = find(6).unwrap();
        // Strings print without JSON quoting.
        assert_eq!(reverse.primary_expected_output().as_deref(), Some("olleh"));
    }

    #[test]
    fn test_evaluation_config_maps_reference_tests_to_contains_cases() {
        let factorial = find(5).unwrap();
        let config = factorial.evaluation_config(2000);

        assert_eq!(config.time_limit_ms, 2000);
        assert_eq!(config.test_cases.len(), factorial.test_cases.len());
        assert!(config
            .test_cases
            .iter()
            .all(|tc| tc.kind == TestCaseKind::Contains));
        assert_eq!(config.test_cases[0].expected, "120");
        assert_eq!(config.test_cases[0].input.as_deref(), Some("5"));
        assert!(config.structure_checks.requires_functions);
        assert!(config.expected_output.is_none());
    }

    #[test]
    fn test_solutions_and_reference_tests_not_serialized() {
        let json = serde_json::to_value(find(1).unwrap()).unwrap();
        assert!(json.get("sample_solution").is_none());
        assert!(json.get("test_cases").is_none());
        assert!(json.get("starter_template").is_some());
    }
}
