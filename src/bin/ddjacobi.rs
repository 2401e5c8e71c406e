use clap::{Parser, ValueEnum};
use ddjacobi::config::{ColumnFallback, ProblemDescription};
use ddjacobi::context::SolveContext;
use ddjacobi::report;
use ddjacobi::utils::TraceEvent;
use std::path::PathBuf;
use std::process;

#[derive(Parser, Debug)]
#[command(name = "ddjacobi", about = "Solve a square linear system by Jacobi iteration")]
struct Cli {
    /// JSON problem description (matrixOrder, matrix, accuracy, optional M)
    input: PathBuf,

    /// Override the accuracy from the input file
    #[arg(long)]
    accuracy: Option<f64>,

    /// Override the iteration cap from the input file
    #[arg(long)]
    max_iterations: Option<usize>,

    /// Handling of rows with no dominant coefficient during reordering
    #[arg(long, value_enum)]
    fallback: Option<CliFallback>,

    /// Print only the result, not the stages and iteration table
    #[arg(long)]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliFallback {
    Reject,
    FirstColumn,
}

impl From<CliFallback> for ColumnFallback {
    fn from(c: CliFallback) -> Self {
        match c {
            CliFallback::Reject => ColumnFallback::Reject,
            CliFallback::FirstColumn => ColumnFallback::FirstColumn,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    let mut problem = ProblemDescription::from_file(&cli.input)?;
    if let Some(accuracy) = cli.accuracy {
        problem.accuracy = accuracy;
    }
    if let Some(m) = cli.max_iterations {
        problem.max_iterations = Some(m);
    }
    if let Some(fallback) = cli.fallback {
        problem.column_fallback = fallback.into();
    }
    let (matrix, config) = problem.into_parts()?;

    let mut events: Vec<TraceEvent<f64>> = Vec::new();
    let result = SolveContext::new(config).solve(&matrix, &mut events);

    if cli.quiet {
        match &result {
            Ok(solution) => print!("{}", report::render_results_table(solution)),
            Err(e) => print!("{}", report::render_failure(e)),
        }
    } else {
        print!("{}", report::render(&events, &result));
    }

    if result.is_err() {
        process::exit(1);
    }
    Ok(())
}
