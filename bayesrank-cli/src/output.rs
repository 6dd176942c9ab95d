/// Output formatting: ranked CSV, terminal table and JSON.
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::time::Duration;

use bayesrank_core::{RankSummary, Record, SortStats, top_unique};
use serde::Serialize;

use crate::error::{CliError, Result};

/// Header of the ranked CSV.
pub const RANKED_HEADER: [&str; 5] = ["Position", "Name", "Rating", "NumberReview", "Score"];

/// Width of the name column in the terminal table.
const NAME_WIDTH: usize = 40;
/// Names longer than this are cut and suffixed with "..".
const NAME_KEEP: usize = 37;

#[derive(Serialize)]
struct JsonRankedItem<'a> {
    rank: usize,
    name: &'a str,
    rating: f64,
    review_count: u32,
    score: f64,
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    items: Vec<JsonRankedItem<'a>>,
    prior: f64,
    algorithm: &'static str,
    total_records: usize,
    stats: SortStats,
}

/// Write every record, in store order, as ranked CSV rows.
pub fn write_ranked_csv(path: &Path, records: &[Record]) -> Result<()> {
    let file = File::create(path).map_err(|e| CliError::io(path, e))?;
    render_ranked_csv(file, records).map_err(|e| CliError::csv(path, e))
}

/// Positions are 1-based. Rating is printed with 2 decimals, score with 4.
pub fn render_ranked_csv<W: Write>(writer: W, records: &[Record]) -> csv::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(RANKED_HEADER)?;
    for (i, r) in records.iter().enumerate() {
        let position = (i + 1).to_string();
        let rating = format!("{:.2}", r.rating);
        let count = r.review_count.to_string();
        let score = format!("{:.4}", r.score);
        wtr.write_record([position.as_str(), r.name.as_str(), rating.as_str(), count.as_str(), score.as_str()])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Cut long names to fit the table's name column.
pub fn truncate_name(name: &str) -> String {
    if name.chars().count() > NAME_KEEP {
        let head: String = name.chars().take(NAME_KEEP).collect();
        format!("{head}..")
    } else {
        name.to_string()
    }
}

/// Top-`top_n` unique names as a fixed-width table.
pub fn format_table(records: &[Record], top_n: usize) -> String {
    let mut lines = vec![
        format!("{:<5} {:<NAME_WIDTH$} {:>7} {:>8} {:>8}", "Pos", "Organization", "Rating", "Reviews", "Score"),
        "-".repeat(5 + 1 + NAME_WIDTH + 1 + 7 + 1 + 8 + 1 + 8),
    ];
    for (i, r) in top_unique(records, top_n).enumerate() {
        lines.push(format!(
            "{:<5} {:<NAME_WIDTH$} {:>7.2} {:>8} {:>8.4}",
            i + 1,
            truncate_name(&r.name),
            r.rating,
            r.review_count,
            r.score,
        ));
    }
    lines.join("\n")
}

fn format_summary(summary: &RankSummary, elapsed: Duration) -> String {
    format!(
        "{} records ranked with {} in {:.2} ms (prior C = {:.4}, {} comparisons, {} swaps)",
        summary.record_count,
        summary.algorithm,
        elapsed.as_secs_f64() * 1000.0,
        summary.prior,
        summary.stats.comparisons,
        summary.stats.swaps,
    )
}

/// Print the top-N table followed by a one-line run summary.
pub fn print_table(records: &[Record], summary: &RankSummary, top_n: usize, elapsed: Duration) {
    println!("Top {top_n} restaurants by composite score:\n");
    println!("{}", format_table(records, top_n));
    println!("\n{}", format_summary(summary, elapsed));
}

/// Top-`top_n` unique names plus run metadata, pretty-printed.
pub fn render_json(records: &[Record], summary: &RankSummary, top_n: usize) -> serde_json::Result<String> {
    let items = top_unique(records, top_n)
        .enumerate()
        .map(|(i, r)| JsonRankedItem {
            rank: i + 1,
            name: &r.name,
            rating: r.rating,
            review_count: r.review_count,
            score: r.score,
        })
        .collect();

    let output = JsonOutput {
        items,
        prior: summary.prior,
        algorithm: summary.algorithm.name(),
        total_records: summary.record_count,
        stats: summary.stats,
    };
    serde_json::to_string_pretty(&output)
}

pub fn print_json(records: &[Record], summary: &RankSummary, top_n: usize) -> Result<()> {
    println!("{}", render_json(records, summary, top_n)?);
    Ok(())
}
