use crate::error::StoreError;
use aggregator::EvaluationResult;
use core_types::{ComparisonMatrix, DecisionProblem};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Suffix appended to a problem's file stem to name its result file.
const RESULT_SUFFIX: &str = ".result.json";

/// A document holding a single comparison matrix under the `matrix` key.
#[derive(Debug, Deserialize)]
struct MatrixDocument {
    matrix: ComparisonMatrix,
}

/// The `ProblemRepository` provides file-level access to decision problems
/// and their evaluation results.
#[derive(Debug, Clone, Default)]
pub struct ProblemRepository {
    output_dir: Option<PathBuf>,
}

impl ProblemRepository {
    /// Creates a repository. Results are written next to their problem file
    /// unless an `output_dir` is given.
    pub fn new(output_dir: Option<PathBuf>) -> Self {
        Self { output_dir }
    }

    /// Reads a `DecisionProblem` from a TOML or JSON document.
    pub fn load_problem(&self, path: &Path) -> Result<DecisionProblem, StoreError> {
        let problem: DecisionProblem = read_document(path)?;
        check_labels(path, &problem)?;

        tracing::debug!(
            path = %path.display(),
            objectives = problem.params.objectives,
            solutions = problem.params.solutions,
            "Loaded decision problem."
        );
        Ok(problem)
    }

    /// Reads a single comparison matrix stored under the `matrix` key.
    pub fn load_matrix(&self, path: &Path) -> Result<ComparisonMatrix, StoreError> {
        let document: MatrixDocument = read_document(path)?;
        Ok(document.matrix)
    }

    /// The file a problem's result is written to: `<stem>.result.json`.
    pub fn result_path(&self, problem_path: &Path) -> PathBuf {
        let stem = problem_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "problem".to_string());
        let file_name = format!("{}{}", stem, RESULT_SUFFIX);

        match &self.output_dir {
            Some(dir) => dir.join(file_name),
            None => problem_path.with_file_name(file_name),
        }
    }

    /// Writes the result of `problem_path` as pretty JSON and returns where it went.
    pub fn save_result(
        &self,
        problem_path: &Path,
        result: &EvaluationResult,
    ) -> Result<PathBuf, StoreError> {
        let path = self.result_path(problem_path);
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let file = File::create(&path).map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, result)?;
        // Dropping the writer would discard a failed final flush.
        writer.flush().map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })?;

        tracing::info!(path = %path.display(), "Saved evaluation result.");
        Ok(path)
    }

    /// Reads back a result written by `save_result`.
    pub fn load_result(&self, path: &Path) -> Result<EvaluationResult, StoreError> {
        let file = File::open(path).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }
}

fn read_document<T: DeserializeOwned>(path: &Path) -> Result<T, StoreError> {
    let format = match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("toml") => config::FileFormat::Toml,
        Some(ext) if ext.eq_ignore_ascii_case("json") => config::FileFormat::Json,
        _ => return Err(StoreError::UnsupportedFormat(path.to_path_buf())),
    };

    let to_parse_error = |source: config::ConfigError| StoreError::Parse {
        path: path.to_path_buf(),
        source,
    };

    config::Config::builder()
        .add_source(config::File::from(path).format(format))
        .build()
        .map_err(to_parse_error)?
        .try_deserialize::<T>()
        .map_err(to_parse_error)
}

/// Labels are optional, but when present they must name every item.
fn check_labels(path: &Path, problem: &DecisionProblem) -> Result<(), StoreError> {
    let labels = &problem.labels;
    let checks = [
        ("objectives", labels.objectives.len(), problem.params.objectives),
        ("solutions", labels.solutions.len(), problem.params.solutions),
    ];

    for (name, given, expected) in checks {
        if given != 0 && given != expected {
            return Err(StoreError::Labels {
                path: path.to_path_buf(),
                message: format!("{} {} labels given, {} expected", given, name, expected),
            });
        }
    }
    Ok(())
}
