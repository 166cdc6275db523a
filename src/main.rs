use aggregator::{Aggregator, EvaluationResult};
use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use configuration::{Config, OutputFormat};
use core_types::{DecisionProblem, ErrorKind};
use evaluator::MatrixEvaluator;
use indicatif::{ProgressBar, ProgressStyle};
use problem_store::ProblemRepository;
use rayon::prelude::*;
use report::ReportStyle;
use std::path::{Path, PathBuf};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

mod report;

/// The main entry point for the AHP evaluation tool.
fn main() -> Result<()> {
    // Parse command-line arguments
    let cli = Cli::parse();

    let mut config = configuration::load_config(cli.config.as_deref())
        .context("Failed to load configuration")?;
    if let Some(format) = cli.format {
        config.output.format = format;
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.filter));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    tracing::debug!(?config, "Configuration loaded");

    // Execute the appropriate command
    match cli.command {
        Commands::Evaluate(args) => handle_evaluate(args, config),
        Commands::Matrix(args) => handle_matrix(args, config),
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Analytic Hierarchy Process evaluation: priority vectors, consistency ratios
/// and overall solution rankings from pairwise-comparison matrices.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to a configuration file (defaults to ./ahp.toml when present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Overrides the configured output format.
    #[arg(long, global = true, value_enum)]
    format: Option<OutputFormat>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate one or more decision problems (TOML or JSON).
    Evaluate(EvaluateArgs),
    /// Evaluate a single comparison matrix stored under the `matrix` key.
    Matrix(MatrixArgs),
}

#[derive(Parser)]
struct EvaluateArgs {
    /// The decision problem files to evaluate.
    #[arg(required = true)]
    problems: Vec<PathBuf>,

    /// Directory to write `<problem>.result.json` files into.
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Evaluate the matrices of each problem one after another.
    #[arg(long)]
    sequential: bool,
}

#[derive(Parser)]
struct MatrixArgs {
    /// Path to the matrix document.
    path: PathBuf,
}

// ==============================================================================
// Evaluate Command Logic
// ==============================================================================

/// A problem that was loaded and evaluated successfully.
struct Evaluated {
    path: PathBuf,
    problem: DecisionProblem,
    result: EvaluationResult,
}

/// Handles the orchestration of one or many problem evaluations.
fn handle_evaluate(args: EvaluateArgs, mut config: Config) -> Result<()> {
    if args.sequential {
        config.engine.parallel = false;
    }
    let repository = ProblemRepository::new(args.output.clone());
    let aggregator = Aggregator::new(config.engine.clone());

    let outcomes: Vec<Result<Evaluated>> = if args.problems.len() == 1 {
        vec![evaluate_problem(&repository, &aggregator, &args.problems[0])]
    } else {
        let progress_bar = ProgressBar::new(args.problems.len() as u64);
        progress_bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
                .progress_chars("=>-"),
        );

        let outcomes: Vec<Result<Evaluated>> = args
            .problems
            .par_iter()
            .map(|path| {
                let outcome = evaluate_problem(&repository, &aggregator, path);
                progress_bar.inc(1);
                outcome
            })
            .collect();

        progress_bar.finish_with_message("Evaluation complete.");
        outcomes
    };

    let total = outcomes.len();
    let mut failures = 0;
    for outcome in outcomes {
        match outcome {
            Ok(evaluated) => {
                print_result(&evaluated, &config)?;
                if args.output.is_some() {
                    repository
                        .save_result(&evaluated.path, &evaluated.result)
                        .with_context(|| format!("Failed to save the result of {:?}", evaluated.path))?;
                }
            }
            Err(e) => {
                failures += 1;
                eprintln!("Error: {:#}", e);
            }
        }
    }

    if failures > 0 {
        bail!("{} of {} problems failed to evaluate", failures, total);
    }
    Ok(())
}

fn evaluate_problem(
    repository: &ProblemRepository,
    aggregator: &Aggregator,
    path: &Path,
) -> Result<Evaluated> {
    let problem = repository
        .load_problem(path)
        .with_context(|| format!("Failed to load {:?}", path))?;

    let result = aggregator
        .evaluate(&problem)
        .map_err(|e| with_kind(e.kind(), e))
        .with_context(|| format!("Failed to evaluate {:?}", path))?;

    Ok(Evaluated {
        path: path.to_path_buf(),
        problem,
        result,
    })
}

/// Prefixes an engine error with its Domain/Shape kind, keeping its source chain.
fn with_kind<E>(kind: ErrorKind, error: E) -> anyhow::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    anyhow::Error::new(error).context(kind)
}

fn print_result(evaluated: &Evaluated, config: &Config) -> Result<()> {
    match config.output.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&evaluated.result)?);
        }
        OutputFormat::Table => {
            println!("=== {} ===", evaluated.path.display());
            println!(
                "{}\n",
                report::render_result(&evaluated.result, &evaluated.problem.labels, report_style(config))
            );
        }
    }
    Ok(())
}

// ==============================================================================
// Matrix Command Logic
// ==============================================================================

fn handle_matrix(args: MatrixArgs, config: Config) -> Result<()> {
    let matrix = ProblemRepository::default()
        .load_matrix(&args.path)
        .with_context(|| format!("Failed to load {:?}", args.path))?;

    let report = MatrixEvaluator::new()
        .evaluate(&matrix, matrix.dim())
        .map_err(|e| with_kind(e.kind(), e))
        .with_context(|| format!("Failed to evaluate {:?}", args.path))?;

    match config.output.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Table => println!("{}", report::render_matrix(&report, report_style(&config))),
    }
    Ok(())
}

fn report_style(config: &Config) -> ReportStyle {
    ReportStyle {
        precision: config.output.precision,
        consistency_threshold: config.engine.consistency_threshold,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aggregator::AggregatorError;
    use core_types::MatrixRole;
    use evaluator::EvaluatorError;

    #[test]
    fn test_error_kind_keeps_the_source_chain() {
        let error = AggregatorError::Evaluation {
            role: MatrixRole::Objectives,
            source: EvaluatorError::UndefinedConsistency(2),
        };
        let wrapped = with_kind(error.kind(), error);

        assert_eq!(wrapped.to_string(), "DomainError");
        assert_eq!(wrapped.chain().count(), 3);
        assert_eq!(
            wrapped.root_cause().downcast_ref::<EvaluatorError>(),
            Some(&EvaluatorError::UndefinedConsistency(2))
        );

        let rendered = format!("{:#}", wrapped);
        assert!(rendered.starts_with("DomainError: Failed to evaluate the "));
        assert!(rendered.ends_with(&EvaluatorError::UndefinedConsistency(2).to_string()));
    }
}
