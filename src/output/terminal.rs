// Colored terminal output for verdicts and batch reports.
//
// This module handles all terminal-specific formatting: colors, tables,
// summaries. The main.rs display paths delegate here.

use colored::{ColoredString, Colorize};

use crate::batch::BatchReport;
use crate::classify::cascade::{RiskLabel, Verdict};
use crate::lexicon::Lexicon;
use crate::output::truncate_chars;

/// Display a single verdict in detail.
pub fn display_verdict(verdict: &Verdict) {
    println!("\n{}", "=== Verdict ===".bold());
    println!("  Label:  {}", colorize_label(verdict.label));
    println!("  Score:  {}/100", verdict.score);
    println!("  Method: {}", verdict.method.name());
    if let Some(matched) = verdict.method.matched() {
        println!("  Matched: {:?}", matched);
    }
    println!("  Text:   {}", truncate_chars(&verdict.text, 120).dimmed());
}

/// Display a ranked batch report: table, summary, high-risk detail.
pub fn display_batch_report(report: &BatchReport, high_risk_only: bool) {
    if report.items.is_empty() {
        println!("Nothing to classify — the batch was empty.");
        return;
    }

    println!(
        "\n{}",
        format!("=== Batch Report ({} items) ===", report.summary.total).bold()
    );
    println!();

    // Header
    println!(
        "  {:>4}  {:>5}  {:<10}  {:<18}  {}",
        "Rank".dimmed(),
        "Score".dimmed(),
        "Label".dimmed(),
        "Method".dimmed(),
        "Text".dimmed(),
    );
    println!("  {}", "-".repeat(78).dimmed());

    for (i, item) in report.items.iter().enumerate() {
        if high_risk_only && item.risk_score <= crate::batch::HIGH_RISK_SCORE {
            continue;
        }
        println!(
            "  {:>4}. {:>5}  {:<10}  {:<18}  {}",
            i + 1,
            item.risk_score,
            colorize_label(item.classification),
            item.analysis.method.name(),
            truncate_chars(&item.text, 50),
        );
    }

    println!();

    // Summary
    let s = &report.summary;
    println!(
        "  {} flagged ({:.2}%), {} suspicious ({:.2}%), {} safe ({:.2}%)",
        s.flagged, s.flagged_pct, s.suspicious, s.suspicious_pct, s.safe, s.safe_pct,
    );

    let high = report.high_risk();
    if !high.is_empty() {
        println!(
            "\n  {} {} high-risk items (score > {}):",
            "!!".red().bold(),
            high.len(),
            crate::batch::HIGH_RISK_SCORE,
        );
        for item in high {
            let who = item.author.as_deref().unwrap_or("unknown");
            println!(
                "    [{:>3}] @{}: {}",
                item.risk_score,
                who,
                truncate_chars(&item.text, 80),
            );
            if let Some(matched) = item.analysis.method.matched() {
                println!("          matched: {:?}", matched);
            }
        }
    }
}

/// Display the loaded lexicon: category, script groups, counts.
pub fn display_lexicon(lexicon: &Lexicon) {
    println!("\n{}", "=== Lexicon ===".bold());
    for (category, groups) in lexicon.groups() {
        let total: usize = groups.iter().map(|g| g.phrases.len()).sum();
        println!("\n  {} ({} entries)", category.bold(), total);
        for group in groups {
            println!("    {:<16} {}", group.script.dimmed(), group.phrases.len());
        }
    }
    println!();
}

fn colorize_label(label: RiskLabel) -> ColoredString {
    match label {
        RiskLabel::Flagged => label.as_str().red().bold(),
        RiskLabel::Suspicious => label.as_str().yellow(),
        RiskLabel::Safe => label.as_str().green(),
    }
}
