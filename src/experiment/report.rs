//! Summaries and charts over a finished sweep.
//!
//! The efficiency index scores an algorithm by accuracy per unit of time:
//!
//! ```text
//! efficiency = (100 - error%) / time_ms * 1000
//! ```
//!
//! with the mean time floored at [`MIN_TIME_MS`], the error percentage
//! clamped to `[0.1, 99]` and the score capped at [`MAX_EFFICIENCY`]. The
//! exhaustive baseline is exact by construction and scores `100 / time_ms * 1000`.
//!
//! With the `charts` feature, [`Chart`] renders four SVG reports from
//! [`AllResults`]: GA vs. linear-search time, convergence curves, the
//! accuracy/time scatter, and the efficiency comparison.

use super::{AllResults, ExperimentResult};
use crate::stats::mean;

/// Floor applied to mean times before dividing by them.
pub const MIN_TIME_MS: f64 = 0.001;

/// Cap on the efficiency index.
pub const MAX_EFFICIENCY: f64 = 100_000.0;

const MIN_ERROR_PERCENT: f64 = 0.1;
const MAX_ERROR_PERCENT: f64 = 99.0;

/// Efficiency index of an approximate method.
///
/// ```
/// use u_bitga::experiment::report::efficiency_index;
///
/// // 1% error in 10 ms
/// assert!((efficiency_index(1.0, 10.0) - 9_900.0).abs() < 1e-9);
/// // near-zero time hits the cap
/// assert_eq!(efficiency_index(0.0, 0.0), 100_000.0);
/// ```
pub fn efficiency_index(error_percent: f64, time_ms: f64) -> f64 {
    let time = time_ms.max(MIN_TIME_MS);
    let error = error_percent.clamp(MIN_ERROR_PERCENT, MAX_ERROR_PERCENT);
    ((100.0 - error) / time * 1000.0).min(MAX_EFFICIENCY)
}

/// Efficiency index of the GA on `task`, from the mean time and mean
/// relative error over all of its grid points.
///
/// Returns 0 when the task has no GA results or they took no time at all.
/// Results without a relative error are left out of the error mean.
pub fn ga_efficiency(results: &AllResults, task: &str) -> f64 {
    let records: Vec<&ExperimentResult> = ga_results_for(results, task).collect();
    let times: Vec<f64> = records.iter().map(|r| r.execution_time_ms).collect();
    if times.is_empty() || times.iter().sum::<f64>() == 0.0 {
        return 0.0;
    }
    let errors: Vec<f64> = records
        .iter()
        .filter_map(|r| r.relative_error)
        .map(|e| e * 100.0)
        .collect();
    efficiency_index(mean(&errors), mean(&times))
}

/// Efficiency index of the exhaustive baseline on `task`; 0 when there is
/// no baseline or it took no time.
pub fn linear_efficiency(results: &AllResults, task: &str) -> f64 {
    results
        .linear_search_results
        .iter()
        .find(|r| r.task_name == task)
        .filter(|r| r.execution_time_ms != 0.0)
        .map_or(0.0, |r| 100.0 / r.execution_time_ms * 1000.0)
}

/// `linear_ms / ga_ms`, with the GA time floored at [`MIN_TIME_MS`].
///
/// Above 1 the GA was faster.
pub fn speedup(linear_ms: f64, ga_ms: f64) -> f64 {
    linear_ms / ga_ms.max(MIN_TIME_MS)
}

fn ga_results_for<'a>(
    results: &'a AllResults,
    task: &'a str,
) -> impl Iterator<Item = &'a ExperimentResult> + 'a {
    results.ga_results.iter().filter(move |r| r.task_name == task)
}

/// Per-task comparison of the GA against its exhaustive baseline.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskSummary {
    pub task_name: String,

    /// Mean trial time over all grid points.
    pub ga_mean_time_ms: f64,
    pub linear_time_ms: f64,
    pub speedup: f64,
    pub ga_efficiency: f64,
    pub linear_efficiency: f64,
}

impl TaskSummary {
    /// Summarizes `task`. A task with no baseline record gets a zero
    /// baseline time.
    pub fn new(results: &AllResults, task: &str) -> Self {
        let times: Vec<f64> = ga_results_for(results, task)
            .map(|r| r.execution_time_ms)
            .collect();
        let ga_mean_time_ms = mean(&times);
        let linear_time_ms = results
            .linear_search_results
            .iter()
            .find(|r| r.task_name == task)
            .map_or(0.0, |r| r.execution_time_ms);

        Self {
            task_name: task.to_string(),
            ga_mean_time_ms,
            linear_time_ms,
            speedup: speedup(linear_time_ms, ga_mean_time_ms),
            ga_efficiency: ga_efficiency(results, task),
            linear_efficiency: linear_efficiency(results, task),
        }
    }

    /// One summary per baseline record, in sweep order.
    pub fn all(results: &AllResults) -> Vec<Self> {
        results
            .linear_search_results
            .iter()
            .map(|r| Self::new(results, &r.task_name))
            .collect()
    }
}

#[cfg(feature = "charts")]
pub use self::charts::{Chart, CONVERGENCE_CURVES};

#[cfg(feature = "charts")]
mod charts {
    use super::{AllResults, ExperimentResult, TaskSummary, MIN_TIME_MS};
    use crate::experiment::{ArraySearch, ExperimentError};
    use plotters::prelude::*;
    use std::path::Path;

    /// Number of grid points drawn on the convergence chart.
    pub const CONVERGENCE_CURVES: usize = 6;

    const BAR_COLORS: [RGBColor; 4] = [
        RGBColor(34, 139, 34),
        RGBColor(220, 20, 60),
        RGBColor(0, 191, 255),
        RGBColor(255, 69, 0),
    ];

    const CURVE_COLORS: [RGBColor; CONVERGENCE_CURVES] = [
        RGBColor(255, 0, 0),
        RGBColor(0, 128, 0),
        RGBColor(0, 0, 255),
        RGBColor(255, 165, 0),
        RGBColor(128, 0, 128),
        RGBColor(0, 191, 255),
    ];

    /// The reports rendered after a sweep.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Chart {
        /// Mean GA time vs. linear-search time, per task.
        TimeComparison,
        /// Best-fitness history of the first array-search grid points.
        Convergence,
        /// Relative error vs. time for every grid point.
        AccuracyVsTime,
        /// Efficiency index of the GA and the baseline, per task.
        Efficiency,
    }

    impl Chart {
        /// Every chart, in rendering order.
        pub const ALL: [Chart; 4] = [
            Chart::TimeComparison,
            Chart::Convergence,
            Chart::AccuracyVsTime,
            Chart::Efficiency,
        ];

        /// Output file name.
        pub fn file_name(self) -> &'static str {
            match self {
                Chart::TimeComparison => "time_comparison.svg",
                Chart::Convergence => "convergence_array.svg",
                Chart::AccuracyVsTime => "accuracy_vs_time.svg",
                Chart::Efficiency => "efficiency_comparison.svg",
            }
        }

        /// Renders this chart from `results` into an SVG file at `path`.
        pub fn render(self, results: &AllResults, path: &Path) -> Result<(), ExperimentError> {
            match self {
                Chart::TimeComparison => time_comparison(results, path),
                Chart::Convergence => convergence(results, ArraySearch::NAME, path),
                Chart::AccuracyVsTime => accuracy_vs_time(results, path),
                Chart::Efficiency => efficiency(results, path),
            }
        }
    }

    fn time_comparison(results: &AllResults, path: &Path) -> Result<(), ExperimentError> {
        let summaries = TaskSummary::all(results);
        let mut bars = Vec::with_capacity(2 * summaries.len());
        let mut verdicts = Vec::with_capacity(summaries.len());
        for s in &summaries {
            bars.push((format!("GA ({})", s.task_name), s.ga_mean_time_ms));
            bars.push((format!("Linear ({})", s.task_name), s.linear_time_ms));
            verdicts.push(format!("{}: GA {}", s.task_name, describe_speedup(s.speedup)));
        }
        let caption = format!("Execution time: {}", verdicts.join(", "));
        bar_chart(path, (1200, 800), &caption, "Execution time (ms)", &bars)
    }

    fn describe_speedup(speedup: f64) -> String {
        if speedup > 1.0 {
            format!("{speedup:.1}x faster")
        } else if speedup > 0.1 {
            format!("{:.1}x slower", 1.0 / speedup)
        } else {
            "much slower".to_string()
        }
    }

    fn efficiency(results: &AllResults, path: &Path) -> Result<(), ExperimentError> {
        let mut bars = Vec::new();
        for s in TaskSummary::all(results) {
            bars.push((format!("GA ({})", s.task_name), s.ga_efficiency));
            bars.push((format!("Linear ({})", s.task_name), s.linear_efficiency));
        }
        let scores: Vec<String> = bars.iter().map(|(l, v)| format!("{l}: {v:.1}")).collect();
        let caption = format!(
            "Efficiency = (100 - error%) / time_ms x 1000 | {}",
            scores.join(" | ")
        );
        bar_chart(path, (1400, 1000), &caption, "Efficiency index", &bars)
    }

    fn bar_chart(
        path: &Path,
        size: (u32, u32),
        caption: &str,
        y_desc: &str,
        bars: &[(String, f64)],
    ) -> Result<(), ExperimentError> {
        let root = SVGBackend::new(path, size).into_drawing_area();
        root.fill(&WHITE)?;

        let top = bars
            .iter()
            .map(|&(_, v)| v)
            .filter(|v| v.is_finite())
            .fold(0.0, f64::max);
        let y_max = if top > 0.0 { top * 1.1 } else { 1.0 };
        let slots = bars.len().max(1) as u32;

        let mut chart = ChartBuilder::on(&root)
            .caption(caption, ("sans-serif", 20))
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(80)
            .build_cartesian_2d((0..slots).into_segmented(), 0.0..y_max)?;

        let label = |v: &SegmentValue<u32>| match v {
            SegmentValue::CenterOf(i) => bars
                .get(*i as usize)
                .map(|(l, _)| l.clone())
                .unwrap_or_default(),
            _ => String::new(),
        };
        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(bars.len().max(1))
            .x_label_formatter(&label)
            .y_desc(y_desc)
            .draw()?;

        chart.draw_series(
            Histogram::vertical(&chart)
                .style_func(|x, _| {
                    let i = match x {
                        SegmentValue::Exact(i) | SegmentValue::CenterOf(i) => *i as usize,
                        SegmentValue::Last => 0,
                    };
                    BAR_COLORS[i % BAR_COLORS.len()].filled()
                })
                .margin(30)
                .data(bars.iter().enumerate().map(|(i, &(_, v))| (i as u32, v))),
        )?;

        root.present()?;
        Ok(())
    }

    fn convergence(results: &AllResults, task: &str, path: &Path) -> Result<(), ExperimentError> {
        let curves: Vec<&ExperimentResult> = results
            .ga_results
            .iter()
            .filter(|r| r.task_name == task && !r.convergence.is_empty())
            .take(CONVERGENCE_CURVES)
            .collect();
        let generations = curves.iter().map(|r| r.convergence.len()).max().unwrap_or(1);
        let (lo, hi) = padded_range(curves.iter().flat_map(|r| r.convergence.iter().copied()));

        let root = SVGBackend::new(path, (1400, 1000)).into_drawing_area();
        root.fill(&WHITE)?;
        let mut chart = ChartBuilder::on(&root)
            .caption(
                format!("GA convergence ({task}): high mutation explores, low mutation converges fast"),
                ("sans-serif", 20),
            )
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(80)
            .build_cartesian_2d(0.0..generations as f64, lo..hi)?;
        chart
            .configure_mesh()
            .x_desc("Generation")
            .y_desc("Best fitness")
            .draw()?;

        for (i, r) in curves.iter().enumerate() {
            let color = CURVE_COLORS[i % CURVE_COLORS.len()];
            let points: Vec<(f64, f64)> = r
                .convergence
                .iter()
                .enumerate()
                .map(|(g, &v)| (g as f64, v))
                .collect();
            chart
                .draw_series(LineSeries::new(points.clone(), color.stroke_width(3)))?
                .label(curve_label(r))
                .legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(3))
                });
            chart.draw_series(points.into_iter().map(|p| Circle::new(p, 2, color.filled())))?;
        }

        if !curves.is_empty() {
            chart
                .configure_series_labels()
                .position(SeriesLabelPosition::LowerRight)
                .background_style(&WHITE.mix(0.8))
                .border_style(&BLACK)
                .draw()?;
        }
        root.present()?;
        Ok(())
    }

    fn curve_label(r: &ExperimentResult) -> String {
        let mutation = if r.config.mutation_rate >= 0.05 { "high" } else { "low" };
        format!(
            "{mutation} mutation {:.2} | {} crossover | population {}",
            r.config.mutation_rate, r.config.crossover, r.config.population_size
        )
    }

    fn accuracy_vs_time(results: &AllResults, path: &Path) -> Result<(), ExperimentError> {
        let mut tasks: Vec<&str> = Vec::new();
        for r in &results.ga_results {
            if !tasks.contains(&r.task_name.as_str()) {
                tasks.push(&r.task_name);
            }
        }
        let points = |task: &str| -> Vec<(f64, f64)> {
            results
                .ga_results
                .iter()
                .filter(|r| r.task_name == task)
                .filter_map(|r| r.relative_error.map(|e| (r.execution_time_ms, e * 100.0)))
                .filter(|&(t, e)| t.is_finite() && e.is_finite())
                .collect()
        };

        let all: Vec<(f64, f64)> = tasks.iter().flat_map(|&t| points(t)).collect();
        let x_max = all.iter().map(|p| p.0).fold(MIN_TIME_MS, f64::max) * 1.05;
        let y_min = all.iter().map(|p| p.1).fold(0.0, f64::min);
        let y_max = all.iter().map(|p| p.1).fold(5.5, f64::max) * 1.05;

        let root = SVGBackend::new(path, (1400, 1000)).into_drawing_area();
        root.fill(&WHITE)?;
        let mut chart = ChartBuilder::on(&root)
            .caption(
                "Accuracy vs. time: fast and exact is ideal",
                ("sans-serif", 20),
            )
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(80)
            .build_cartesian_2d(0.0..x_max, y_min..y_max)?;
        chart
            .configure_mesh()
            .x_desc("Execution time (ms)")
            .y_desc("Relative error (% of optimum)")
            .draw()?;

        let zones = [
            (0.0, 2.0, GREEN.mix(0.2), "Excellent (0-2% error)"),
            (2.0, 5.0, YELLOW.mix(0.2), "Good (2-5% error)"),
        ];
        for (lo, hi, color, label) in zones {
            chart
                .draw_series(std::iter::once(Rectangle::new(
                    [(0.0, lo), (x_max, hi)],
                    color.filled(),
                )))?
                .label(label)
                .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 20, y + 5)], color.filled()));
        }

        for (i, &task) in tasks.iter().enumerate() {
            let series = points(task);
            if i % 2 == 0 {
                let style = RED.mix(0.7).filled();
                chart
                    .draw_series(series.into_iter().map(|p| Circle::new(p, 4, style)))?
                    .label(task)
                    .legend(move |(x, y)| Circle::new((x + 10, y), 4, style));
            } else {
                let style = BLUE.mix(0.7).filled();
                chart
                    .draw_series(series.into_iter().map(|p| TriangleMarker::new(p, 5, style)))?
                    .label(task)
                    .legend(move |(x, y)| TriangleMarker::new((x + 10, y), 5, style));
            }
        }

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()?;
        root.present()?;
        Ok(())
    }

    /// Finite min/max of `values` with some headroom; `(0, 1)` if there are none.
    fn padded_range(values: impl Iterator<Item = f64>) -> (f64, f64) {
        let (lo, hi) = values
            .filter(|v| v.is_finite())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v), hi.max(v))
            });
        if lo > hi {
            (0.0, 1.0)
        } else if lo == hi {
            (lo - 1.0, hi + 1.0)
        } else {
            let pad = (hi - lo) * 0.05;
            (lo - pad, hi + pad)
        }
    }

}
