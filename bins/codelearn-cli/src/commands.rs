// CLI commands for browsing the catalog and grading submissions locally
use anyhow::{bail, Context, Result};
use std::fs;
use std::path::Path;

use codelearn_common::problems;
use codelearn_common::types::EvaluationConfig;
use codelearn_engine::report;

/// List all problems in the catalog
pub fn list_problems() -> Result<()> {
    let catalog = problems::catalog();

    println!("📋 Problem Catalog:\n");
    println!("{:<5} {:<35} {:<10} {:<20} {:<6}", "Id", "Title", "Level", "Category", "Tests");
    println!("{}", "─".repeat(80));

    for problem in &catalog {
        println!(
            "{:<5} {:<35} {:<10} {:<20} {:<6}",
            problem.id,
            problem.title,
            format!("{:?}", problem.difficulty),
            problem.category,
            problem.test_cases.len()
        );
    }

    println!("\n✅ Total: {} problem(s)", catalog.len());

    Ok(())
}

/// Show a problem's full statement
pub fn show_problem(id: u32) -> Result<()> {
    let problem = problems::find(id)
        .ok_or_else(|| anyhow::anyhow!("Problem {} not found in catalog", id))?;

    println!("📘 #{} {} [{:?}] — {}", problem.id, problem.title, problem.difficulty, problem.category);
    println!("\n{}", problem.description);

    if !problem.constraints.is_empty() {
        println!("\nConstraints:");
        for constraint in &problem.constraints {
            println!("  - {}", constraint);
        }
    }

    if !problem.examples.is_empty() {
        println!("\nExamples:");
        for example in &problem.examples {
            println!("  Input: {:<20} Output: {}", example.input, example.output);
        }
    }

    if !problem.hints.is_empty() {
        println!("\nHints:");
        for hint in &problem.hints {
            println!("  💡 {}", hint);
        }
    }

    println!("\nStarter template:");
    println!("{}", "─".repeat(60));
    println!("{}", problem.starter_template.trim_end());
    println!("{}", "─".repeat(60));

    Ok(())
}

/// Evaluate a submission file and print the report
pub async fn evaluate_file(
    file: &str,
    problem_id: Option<u32>,
    expected: Option<&str>,
    time_limit_ms: u64,
    json: bool,
) -> Result<()> {
    let path = Path::new(file);
    if !path.exists() {
        bail!("Submission file not found: {}", file);
    }

    let code = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", file))?;

    let config = match problem_id {
        Some(id) => {
            let problem = problems::find(id)
                .ok_or_else(|| anyhow::anyhow!("Problem {} not found in catalog", id))?;
            println!("🎯 Grading against: #{} {}\n", problem.id, problem.title);
            problem.evaluation_config(time_limit_ms)
        }
        None => EvaluationConfig {
            expected_output: expected.map(|s| s.to_string()),
            time_limit_ms,
            ..Default::default()
        },
    };

    let result = codelearn_engine::evaluate(&code, &config)
        .await
        .context("Evaluation setup failed")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{}", report::format_result(&result));
    }

    Ok(())
}
