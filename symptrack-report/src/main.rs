//! symptrack-report - symptom pattern report CLI
//!
//! Summarize an exported episode journal: what hurts, when, during what, and
//! what helped.

use anyhow::{Context, Result};
use chrono::DateTime;
use clap::Parser;
use std::path::PathBuf;
use symptrack_core::analytics::{
    AnalyticsResult, FixedClock, LabelFrequencies, OffsetClock, TimePatterns,
};
use symptrack_core::{journal, AnalyticsEngine, AnalyticsWindow, Config, SymptomEntry};

/// Ranked rows shown per frequency table
const TOP_N: usize = 5;

#[derive(Parser, Debug)]
#[command(name = "symptrack-report")]
#[command(about = "Symptom pattern report for your episode journal")]
#[command(version)]
struct Args {
    /// Journal export to read (JSON array or JSON lines; default: data dir entries.json)
    #[arg(long)]
    input: Option<PathBuf>,

    /// Window in days, or "all" (default: from config, else 30)
    #[arg(long)]
    window: Option<String>,

    /// Measure the window from this instant instead of now (RFC 3339)
    #[arg(long)]
    now: Option<String>,

    /// Export format (md = markdown, json = JSON)
    #[arg(long)]
    export: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = Config::load().context("failed to load configuration")?;
    let _log_guard = symptrack_core::logging::init(&config.logging).ok();

    let entries = load_entries(args.input.as_ref())?;

    let window = match &args.window {
        Some(raw) => raw
            .parse::<AnalyticsWindow>()
            .with_context(|| format!("Invalid window: {}", raw))?,
        None => config.analytics.default_window,
    };

    let result = match &args.now {
        Some(raw) => {
            let now = DateTime::parse_from_rfc3339(raw)
                .with_context(|| format!("Invalid --now timestamp: {}", raw))?;
            AnalyticsEngine::with_clock(FixedClock::new(now)).compute_window(&entries, window)
        }
        None => {
            let offset = config
                .analytics
                .utc_offset()
                .context("invalid analytics.utc_offset_minutes")?;
            AnalyticsEngine::with_clock(OffsetClock::new(offset)).compute_window(&entries, window)
        }
    };

    match args.export.as_deref() {
        Some("json") => print_json(&result)?,
        Some("md") => print_markdown(&result),
        Some(other) => anyhow::bail!("Unknown export format: {}. Use 'md' or 'json'", other),
        None => print_terminal(&result),
    }

    Ok(())
}

/// An explicit `--input` must exist; a missing default journal is an empty log.
fn load_entries(input: Option<&PathBuf>) -> Result<Vec<SymptomEntry>> {
    let path = match input {
        Some(path) => path.clone(),
        None => {
            let path = Config::journal_path();
            if !path.exists() {
                return Ok(Vec::new());
            }
            path
        }
    };

    let read = journal::read_entries(&path)
        .with_context(|| format!("failed to read journal {}", path.display()))?;
    if read.skipped > 0 {
        eprintln!(
            "warning: skipped {} unreadable record{} in {}",
            read.skipped,
            plural(read.skipped as u64),
            path.display()
        );
    }
    Ok(read.entries)
}

fn print_terminal(result: &AnalyticsResult) {
    let title = format!("Symptom Patterns: {}", result.window.display_name());

    // Header
    println!();
    println!("╭{}╮", "─".repeat(60));
    println!("│{:^60}│", title);
    println!("╰{}╯", "─".repeat(60));
    println!();

    if result.overview.total_entries == 0 {
        println!("  No episodes logged in this window.");
        println!();
        return;
    }

    let overview = &result.overview;
    println!("OVERVIEW");
    println!(
        "   Episodes: {:<12} Per day: {:.1}",
        overview.total_entries, overview.daily_average
    );
    println!(
        "   Intensity: {:<11} Incomplete: {}",
        overview
            .average_intensity
            .map(|i| format!("{:.1}/10", i))
            .unwrap_or_else(|| "-".to_string()),
        overview.malformed_entries
    );
    println!();

    if !result.insights.is_empty() {
        println!("INSIGHTS");
        for insight in &result.insights {
            println!("   • {}", insight);
        }
        println!();
    }

    print_terminal_ranking("TOP BODY PARTS", &result.frequencies.body_parts);
    print_terminal_ranking("TOP SENSATIONS", &result.frequencies.sensations);

    let patterns = &result.time_patterns;
    if patterns.dated_entries > 0 {
        println!("TIME PATTERNS");
        if let Some(peak) = patterns.peak_hour() {
            println!("   Peak hour:    {}", TimePatterns::hour_display(peak.hour));
        }
        if let Some(day) = patterns.peak_days.first() {
            println!("   Busiest day:  {}", day.name);
        }
        let tod = &patterns.time_of_day;
        println!(
            "   Morning {}  │  Afternoon {}  │  Evening {}  │  Night {}",
            tod.morning, tod.afternoon, tod.evening, tod.night
        );
        println!();
    }

    if !result.activity_correlations.is_empty() {
        println!("ACTIVITIES");
        for correlation in result.activity_correlations.iter().take(3) {
            println!(
                "   {:<16} {:>4}  {}",
                correlation.activity,
                correlation.count,
                correlation.top_body_part.as_deref().unwrap_or("-")
            );
        }
        println!();
    }

    let relief = &result.relief_effectiveness;
    if !relief.methods.is_empty() {
        println!("RELIEF");
        for method in relief.methods.iter().take(TOP_N) {
            println!(
                "   {:<16} {:>4}  {:>5.1}% of {} episode{}",
                method.label,
                method.count,
                method.percentage,
                relief.entries_with_relief,
                plural(relief.entries_with_relief as u64)
            );
        }
        println!();
    }

    if !result.weekly_trends.is_empty() {
        println!("WEEKLY TRENDS");
        for bucket in &result.weekly_trends {
            println!("   {:<14} {:>4}", bucket.label, bucket.count);
        }
        println!();
    }
}

fn print_terminal_ranking(heading: &str, frequencies: &LabelFrequencies) {
    if frequencies.ranked.is_empty() {
        return;
    }
    println!("{}", heading);
    for (i, row) in frequencies.ranked.iter().take(TOP_N).enumerate() {
        println!(
            "   {}. {:<16} {:>4}  {:>5.1}%",
            i + 1,
            row.label,
            row.count,
            row.percentage
        );
    }
    println!();
}

fn print_markdown(result: &AnalyticsResult) {
    println!("# Symptom Patterns: {}", result.window.display_name());
    println!();

    if result.overview.total_entries == 0 {
        println!("*No episodes logged in this window.*");
        return;
    }

    let overview = &result.overview;
    println!("## Summary");
    println!();
    println!("| Metric | Value |");
    println!("|--------|-------|");
    println!("| Episodes | {} |", overview.total_entries);
    println!("| Per day | {:.1} |", overview.daily_average);
    if let Some(intensity) = overview.average_intensity {
        println!("| Average intensity | {:.1} |", intensity);
    }
    println!("| Incomplete entries | {} |", overview.malformed_entries);
    println!();

    if !result.insights.is_empty() {
        println!("## Insights");
        println!();
        for insight in &result.insights {
            println!("- {}", insight);
        }
        println!();
    }

    print_markdown_ranking("Body Parts", &result.frequencies.body_parts);
    print_markdown_ranking("Sensations", &result.frequencies.sensations);
    print_markdown_ranking("Activities", &result.frequencies.activities);
    print_markdown_ranking("Relief Methods", &result.frequencies.relief_methods);

    let patterns = &result.time_patterns;
    if patterns.dated_entries > 0 {
        println!("## Time Patterns");
        println!();
        for peak in patterns.peak_hours.iter().filter(|p| p.count > 0) {
            println!(
                "- **{}:** {} episode{}",
                TimePatterns::hour_display(peak.hour),
                peak.count,
                plural(peak.count)
            );
        }
        if let Some(day) = patterns.peak_days.first() {
            println!("- **Busiest day:** {}", day.name);
        }
        println!();
    }

    if !result.weekly_trends.is_empty() {
        println!("## Weekly Trends");
        println!();
        println!("| Week | Episodes |");
        println!("|------|----------|");
        for bucket in &result.weekly_trends {
            println!("| {} | {} |", bucket.label, bucket.count);
        }
        println!();
    }

    println!("---");
    println!("*Generated by symptrack-report*");
}

fn print_markdown_ranking(heading: &str, frequencies: &LabelFrequencies) {
    if frequencies.ranked.is_empty() {
        return;
    }
    println!("## {}", heading);
    println!();
    for (i, row) in frequencies.ranked.iter().take(TOP_N).enumerate() {
        println!(
            "{}. **{}** - {} ({:.1}%)",
            i + 1,
            row.label,
            row.count,
            row.percentage
        );
    }
    println!();
}

fn print_json(result: &AnalyticsResult) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(result)?);
    Ok(())
}

fn plural(count: u64) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}
