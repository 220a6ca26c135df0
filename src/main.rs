use clap::Parser;
use log::{error, info, warn};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;
use u_bitga::experiment::report::{Chart, TaskSummary};
use u_bitga::experiment::{
    AllResults, ArraySearch, Experiment, ExperimentError, FunctionOptimization, ParamGrid, Task,
    TrialRunner,
};

/// Sweep GA hyperparameters over the benchmark tasks and save the results.
#[derive(Parser, Debug)]
#[command(name = "u-bitga")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Result file
    #[arg(short, long, value_name = "FILE", default_value = "results.json")]
    output: PathBuf,

    /// Independent trials per configuration
    #[arg(short, long, default_value_t = 5)]
    runs: usize,

    /// Seed of the first trial and of the generated array data
    #[arg(short, long, default_value_t = 42)]
    seed: u64,

    /// Number of samples in the array-search task
    #[arg(long, default_value_t = 1_000_000)]
    array_size: usize,

    /// Use a small grid instead of the full one
    #[arg(long)]
    quick: bool,

    /// Directory for the SVG charts
    #[arg(long, value_name = "DIR", default_value = ".")]
    chart_dir: PathBuf,

    /// Skip chart rendering
    #[arg(long)]
    no_charts: bool,
}

fn run(cli: &Cli) -> Result<(), ExperimentError> {
    let grid = if cli.quick {
        ParamGrid::quick()
    } else {
        ParamGrid::default()
    };
    let trials = TrialRunner {
        runs: cli.runs,
        base_seed: cli.seed,
    };
    info!(
        "{} configurations x {} trials per task",
        grid.len(),
        trials.runs
    );

    info!("generating {} gaussian samples", cli.array_size);
    let array = ArraySearch::gaussian(cli.array_size, 0.0, 100.0, cli.seed)?;
    let function = FunctionOptimization::default();
    let tasks: [&dyn Task; 2] = [&array, &function];

    let results = Experiment::new(grid, trials).run(&tasks)?;
    results.save_json(&cli.output)?;
    info!("results saved to {}", cli.output.display());

    summarize(&results);
    if !cli.no_charts {
        render_charts(&results, cli)?;
    }
    Ok(())
}

fn summarize(results: &AllResults) {
    for s in TaskSummary::all(results) {
        info!(
            "task {}: GA {:.3} ms vs linear {:.3} ms (speedup {:.2}x), efficiency GA {:.1} / linear {:.1}",
            s.task_name,
            s.ga_mean_time_ms,
            s.linear_time_ms,
            s.speedup,
            s.ga_efficiency,
            s.linear_efficiency
        );
    }
}

/// A chart that fails to render is reported and skipped.
fn render_charts(results: &AllResults, cli: &Cli) -> Result<(), ExperimentError> {
    std::fs::create_dir_all(&cli.chart_dir)?;
    for chart in Chart::ALL {
        let path = cli.chart_dir.join(chart.file_name());
        match chart.render(results, &path) {
            Ok(()) => info!("{} written", path.display()),
            Err(e) => warn!("could not render {}: {e}", path.display()),
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let start = Instant::now();
    match run(&cli) {
        Ok(()) => {
            info!("experiments finished in {:.2?}", start.elapsed());
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
