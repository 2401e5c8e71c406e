//! Plain-text rendering of traces and results.
//!
//! Nothing here takes part in the solve; it only formats what the pipeline
//! recorded.

use crate::context::{Branch, Solution};
use crate::core::traits::Real;
use crate::dominance::DominanceReport;
use crate::error::JacobiError;
use crate::utils::trace::{MatrixStage, TraceEvent};
use std::fmt::Write;

fn f<T: Real>(v: T) -> f64 {
    v.to_f64().unwrap_or(f64::NAN)
}

pub fn render_matrix<T: Real>(rows: &[Vec<T>]) -> String {
    let mut out = String::new();
    for row in rows {
        for &v in row {
            let _ = write!(out, "{:<15.6}", f(v));
        }
        out.push('\n');
    }
    out
}

pub fn render_dominance<T: Real>(report: &DominanceReport<T>) -> String {
    let mut out = String::from("|a_ii| :");
    for &d in &report.diagonal {
        let _ = write!(out, " {}", f(d));
    }
    out.push_str("\n   sum :");
    for &s in &report.off_diagonal_sums {
        let _ = write!(out, " {}", f(s));
    }
    out.push('\n');
    out
}

/// Progress table: one line per pass, pass 0 being the initial guess.
pub fn render_iteration_table<T: Real>(events: &[TraceEvent<T>]) -> String {
    let mut out = String::new();
    for event in events {
        match event {
            TraceEvent::IterationStarted { x } => {
                let _ = write!(out, "{:>4}|", "k");
                for i in 0..x.len() {
                    let _ = write!(out, "{:<20}|", format!("x_{}", i + 1));
                }
                let _ = writeln!(out, "{:<20}", "error");
                push_row(&mut out, 0, x, 0.0);
            }
            TraceEvent::Pass(rec) => push_row(&mut out, rec.iteration, &rec.x, f(rec.abs_err)),
            _ => {}
        }
    }
    out
}

fn push_row<T: Real>(out: &mut String, k: usize, x: &[T], err: f64) {
    let _ = write!(out, "{:>4}|", k);
    for &v in x {
        let _ = write!(out, "{:<20.10}|", f(v));
    }
    let _ = writeln!(out, "{:<20.10}", err);
}

/// Result table: value, last-pass change and residual per variable.
pub fn render_results_table<T: Real>(solution: &Solution<T>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Solution found after {} iterations", solution.iterations);
    let _ = writeln!(out, "{:<5}|{:<32}|{:<32}|{:<32}", "x_i", "value", "error", "residual");
    for i in 0..solution.x.len() {
        let _ = writeln!(
            out,
            "{:<5}|{:<32.16}|{:<32.16}|{:<32.16}",
            format!("x_{}", i + 1),
            f(solution.x[i]),
            f(solution.errors[i]),
            f(solution.residuals[i])
        );
    }
    out
}

pub fn render_failure(err: &JacobiError) -> String {
    let hint = if err.is_transformation_failure() {
        "diagonal dominance cannot be reached by reordering the equations"
    } else if err.is_iteration_failure() {
        "the iteration did not meet the requested accuracy"
    } else {
        "the system cannot be solved as given"
    };
    format!("No solution: {} ({})\n", err, hint)
}

/// Full report: every traced stage, then the result or the failure.
pub fn render<T: Real>(events: &[TraceEvent<T>], result: &Result<Solution<T>, JacobiError>) -> String {
    let mut out = String::new();
    for event in events {
        match event {
            TraceEvent::ReductionUnavailable { row } => {
                let _ = writeln!(out, "Zero on the diagonal in row {}, the original matrix cannot be reduced.", row);
            }
            TraceEvent::DominanceChecked { stage, report } => {
                let _ = writeln!(out, "Diagonal dominance check ({}):", stage_name(*stage));
                out.push_str(&render_dominance(report));
            }
            TraceEvent::MatrixSnapshot { stage, rows } => {
                let _ = writeln!(out, "{} matrix:", stage_name(*stage));
                out.push_str(&render_matrix(rows));
            }
            TraceEvent::ColumnFallback { row } => {
                let _ = writeln!(out, "Row {} has no dominant coefficient, assuming column 1.", row);
            }
            TraceEvent::NormChecked { norm } => {
                let _ = writeln!(out, "||C||_inf = {}", f(*norm));
            }
            TraceEvent::BranchTaken(Branch::Direct) => {
                out.push_str("The original matrix satisfies the convergence condition.\n");
            }
            TraceEvent::BranchTaken(Branch::Transformed) => {
                out.push_str("After reordering, the matrix satisfies the convergence condition.\n");
            }
            _ => {}
        }
    }
    out.push_str(&render_iteration_table(events));
    match result {
        Ok(solution) => out.push_str(&render_results_table(solution)),
        Err(e) => out.push_str(&render_failure(e)),
    }
    out
}

fn stage_name(stage: MatrixStage) -> &'static str {
    match stage {
        MatrixStage::Original => "original",
        MatrixStage::Transformed => "transformed",
        MatrixStage::Reduced => "reduced",
    }
}
