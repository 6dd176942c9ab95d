/// Benchmark command report: timings and work counters per sort variant,
/// plus a cross-check that every variant produced the same ranking.
///
/// Every variant runs on its own copy of the same scored store, so the
/// numbers are directly comparable.
use std::time::Duration;

use bayesrank_core::{BenchmarkReport, SortStats, is_descending};
use serde::Serialize;

use crate::error::{CliError, Result};

/// Above this many records the exchange variant takes minutes, not milliseconds.
pub const EXCHANGE_WARN_THRESHOLD: usize = 50_000;

#[derive(Serialize)]
struct JsonRun {
    algorithm: &'static str,
    elapsed_ms: f64,
    stats: SortStats,
}

#[derive(Serialize)]
struct JsonBenchmark {
    records: usize,
    prior: f64,
    scoring_ms: f64,
    runs: Vec<JsonRun>,
    runs_agree: bool,
}

fn ms(d: Duration) -> f64 {
    d.as_secs_f64() * 1000.0
}

fn yes_no(b: bool) -> &'static str {
    if b { "yes" } else { "no" }
}

/// True when every run lists the names in exactly the same order.
/// Runs can agree as multisets and still differ here when ties are broken differently.
fn same_order(report: &BenchmarkReport) -> bool {
    match report.runs.split_first() {
        Some((first, rest)) => rest.iter().all(|run| {
            run.records
                .iter()
                .zip(&first.records)
                .all(|(a, b)| a.name == b.name)
        }),
        None => true,
    }
}

/// Fails when any run holds a different multiset of records than the first.
pub fn ensure_agreement(report: &BenchmarkReport) -> Result<()> {
    if report.runs_agree() {
        return Ok(());
    }
    let names: Vec<&str> = report.runs.iter().map(|r| r.algorithm.name()).collect();
    Err(CliError::VariantsDisagree(names.join(", ")))
}

pub fn format_report(report: &BenchmarkReport, record_count: usize) -> String {
    let mut out = Vec::new();

    out.push("── Dataset ─────────────────────────────────────".to_string());
    out.push(format!("Records:               {record_count}"));
    out.push(format!("Prior C:               {:.4}", report.prior));
    out.push(format!("Scoring:               {:.2} ms", ms(report.scoring_elapsed)));

    out.push(String::new());
    out.push("── Timing ──────────────────────────────────────".to_string());
    let fastest = report.runs.iter().map(|r| r.elapsed).min().unwrap_or_default();
    for run in &report.runs {
        let relative = if fastest.is_zero() {
            1.0
        } else {
            run.elapsed.as_secs_f64() / fastest.as_secs_f64()
        };
        out.push(format!(
            "{:<12} {:>12.2} ms  {:>8.1}x",
            run.algorithm.name(),
            ms(run.elapsed),
            relative,
        ));
    }

    out.push(String::new());
    out.push("── Work ────────────────────────────────────────".to_string());
    out.push(format!("{:<12} {:>14} {:>14} {:>10}", "", "comparisons", "swaps", "passes"));
    for run in &report.runs {
        out.push(format!(
            "{:<12} {:>14} {:>14} {:>10}",
            run.algorithm.name(),
            run.stats.comparisons,
            run.stats.swaps,
            run.stats.passes,
        ));
    }

    out.push(String::new());
    out.push("── Agreement ───────────────────────────────────".to_string());
    let all_descending = report.runs.iter().all(|r| is_descending(&r.records));
    out.push(format!("All runs descending:   {}", yes_no(all_descending)));
    out.push(format!("Same records:          {}", yes_no(report.runs_agree())));
    out.push(format!("Same tie order:        {}", yes_no(same_order(report))));

    out.join("\n")
}

pub fn print_report(report: &BenchmarkReport, record_count: usize) {
    println!("{}", format_report(report, record_count));
}

pub fn render_json(report: &BenchmarkReport, record_count: usize) -> serde_json::Result<String> {
    let output = JsonBenchmark {
        records: record_count,
        prior: report.prior,
        scoring_ms: ms(report.scoring_elapsed),
        runs: report
            .runs
            .iter()
            .map(|run| JsonRun {
                algorithm: run.algorithm.name(),
                elapsed_ms: ms(run.elapsed),
                stats: run.stats,
            })
            .collect(),
        runs_agree: report.runs_agree(),
    };
    serde_json::to_string_pretty(&output)
}

pub fn print_json(report: &BenchmarkReport, record_count: usize) -> Result<()> {
    println!("{}", render_json(report, record_count)?);
    Ok(())
}
