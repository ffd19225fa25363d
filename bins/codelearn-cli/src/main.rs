mod commands;

use clap::{Parser, Subcommand};
use anyhow::Result;

#[derive(Parser)]
#[command(name = "codelearn-cli")]
#[command(about = "CodeLearn CLI - Browse problems and evaluate submissions locally", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all problems in the catalog
    Problems,

    /// Show a problem's full statement
    Show {
        /// Problem id
        #[arg(short, long)]
        id: u32,
    },

    /// Evaluate a submission file
    Evaluate {
        /// Path to the JavaScript source file
        #[arg(short, long)]
        file: String,

        /// Grade against a catalog problem's reference tests
        #[arg(short, long)]
        problem: Option<u32>,

        /// Expected output (ignored when --problem is given)
        #[arg(short, long)]
        expected: Option<String>,

        /// Execution time limit in milliseconds
        #[arg(short, long, default_value = "5000")]
        time_limit: u64,

        /// Print the raw evaluation result as JSON instead of a report
        #[arg(long, default_value = "false")]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Problems => {
            commands::list_problems()?;
        }
        Commands::Show { id } => {
            commands::show_problem(id)?;
        }
        Commands::Evaluate {
            file,
            problem,
            expected,
            time_limit,
            json,
        } => {
            commands::evaluate_file(&file, problem, expected.as_deref(), time_limit, json).await?;
        }
    }

    Ok(())
}
