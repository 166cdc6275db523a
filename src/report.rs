use aggregator::EvaluationResult;
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Cell, Color, Table};
use core_types::{ConsistencyRatio, Labels};
use evaluator::MatrixReport;

/// Rendering options shared by every table.
#[derive(Debug, Clone, Copy)]
pub struct ReportStyle {
    pub precision: usize,
    pub consistency_threshold: f64,
}

impl ReportStyle {
    fn number(&self, value: f64) -> String {
        format!("{:.*}", self.precision, value)
    }

    fn ratio_cell(&self, cr: ConsistencyRatio) -> Cell {
        let cell = Cell::new(self.number(cr.value()));
        if cr.is_acceptable(self.consistency_threshold) {
            cell.fg(Color::Green)
        } else {
            cell.fg(Color::Red)
        }
    }
}

fn new_table(header: Vec<Cell>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(header);
    table
}

/// Renders every statistic of a decision problem: consistency ratios,
/// objective weights, per-objective solution weights and the overall preference.
pub fn render_result(result: &EvaluationResult, labels: &Labels, style: ReportStyle) -> String {
    let p = result.params.objectives;
    let n = result.params.solutions;

    // Consistency ratios
    let mut ratios = new_table(vec![
        Cell::new("Matrix").fg(Color::Cyan),
        Cell::new("CR").fg(Color::Cyan),
    ]);
    ratios.add_row(vec![
        Cell::new("Objectives"),
        style.ratio_cell(result.objectives_ratio()),
    ]);
    for (i, cr) in result.solution_ratios().into_iter().enumerate() {
        ratios.add_row(vec![
            Cell::new(format!("Solutions: {}", labels.objective(i))),
            style.ratio_cell(cr),
        ]);
    }

    // Objective weights
    let mut objectives = new_table(vec![
        Cell::new("Objective").fg(Color::Cyan),
        Cell::new("Weight").fg(Color::Cyan),
    ]);
    for (i, weight) in result.objective_weights().weights().iter().enumerate() {
        objectives.add_row(vec![Cell::new(labels.objective(i)), Cell::new(style.number(*weight))]);
    }

    // Solution weights per objective, then the overall preference
    let mut header = vec![Cell::new("Solution").fg(Color::Cyan)];
    header.extend((0..p).map(|i| Cell::new(labels.objective(i)).fg(Color::Cyan)));
    header.push(Cell::new("Overall").fg(Color::Green));
    let mut solutions = new_table(header);

    for j in 0..n {
        let mut row = vec![Cell::new(labels.solution(j))];
        row.extend(result.solutions.iter().map(|r| {
            Cell::new(style.number(r.priorities.get(j).unwrap_or_default()))
        }));
        let overall = Cell::new(style.number(result.preference.get(j).unwrap_or_default()));
        row.push(if j == result.best {
            overall.fg(Color::Green)
        } else {
            overall
        });
        solutions.add_row(row);
    }

    let ranking: Vec<String> = result
        .ranking()
        .into_iter()
        .map(|j| labels.solution(j))
        .collect();

    format!(
        "{}\n{}\n{}\nRanking: {}\nThe best solution is {} ({}).",
        ratios,
        objectives,
        solutions,
        ranking.join(" > "),
        result.best + 1,
        labels.solution(result.best)
    )
}

/// Renders the statistics of a single comparison matrix.
pub fn render_matrix(report: &MatrixReport, style: ReportStyle) -> String {
    let cr = report.consistency_ratio;
    let verdict = if cr.is_acceptable(style.consistency_threshold) {
        Cell::new("acceptable").fg(Color::Green)
    } else {
        Cell::new("inconsistent").fg(Color::Red)
    };

    let mut summary = new_table(vec![
        Cell::new("Statistic").fg(Color::Cyan),
        Cell::new("Value").fg(Color::Cyan),
    ]);
    summary.add_row(vec![Cell::new("Dimension"), Cell::new(report.dimension.to_string())]);
    summary.add_row(vec![Cell::new("Lambda max"), Cell::new(style.number(report.lambda_max))]);
    summary.add_row(vec![Cell::new("CI"), Cell::new(style.number(report.consistency_index))]);
    summary.add_row(vec![Cell::new("CR"), style.ratio_cell(cr)]);
    summary.add_row(vec![Cell::new("Verdict"), verdict]);

    let mut priorities = new_table(vec![
        Cell::new("Item").fg(Color::Cyan),
        Cell::new("Priority").fg(Color::Cyan),
    ]);
    for (i, weight) in report.priorities.weights().iter().enumerate() {
        priorities.add_row(vec![Cell::new(i + 1), Cell::new(style.number(*weight))]);
    }

    format!("{}\n{}", summary, priorities)
}
