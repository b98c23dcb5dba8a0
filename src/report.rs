//! Rendering of command results for the `nsdebug` binary

use crate::filter::{FilterTable, NameMatcher, Verdict};
use colored::Colorize;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, ContentArrangement, Table};
use serde_json::json;
use std::fmt::Write as _;

fn create_styled_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(headers.iter().map(|h| Cell::new(h)));
    table
}

fn verdict_label(enabled: bool) -> String {
    if enabled {
        "enabled".green().bold().to_string()
    } else {
        "disabled".red().to_string()
    }
}

/// A table with one row per resolved name
pub fn format_verdicts_text(table: &FilterTable, verdicts: &[Verdict]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} {:?}", "Specification:".bold(), table.source());

    let mut rows = create_styled_table(&["Name", "Verdict", "Include", "Exclude"]);
    for verdict in verdicts {
        rows.add_row(vec![
            Cell::new(&verdict.name),
            Cell::new(verdict_label(verdict.enabled)),
            Cell::new(verdict.include.as_deref().unwrap_or("-")),
            Cell::new(verdict.exclude.as_deref().unwrap_or("-")),
        ]);
    }
    let _ = writeln!(out, "{rows}");

    let enabled = verdicts.iter().filter(|v| v.enabled).count();
    let _ = writeln!(out, "{enabled} of {} names enabled", verdicts.len());
    out
}

pub fn format_verdicts_json(table: &FilterTable, verdicts: &[Verdict]) -> String {
    serde_json::to_string_pretty(&json!({
        "spec": table.source(),
        "verdicts": verdicts,
    }))
    .unwrap_or_else(|_| "{\"error\":\"failed to serialize verdicts\"}".to_string())
}

/// A step-by-step account of how one name was resolved
pub fn format_explain_text(verdict: &Verdict) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} {}", "Name:".bold(), verdict.name);

    match &verdict.include {
        Some(glob) => {
            let _ = writeln!(out, "  include: matched {:?}", glob);
        }
        None => {
            let _ = writeln!(out, "  include: no pattern matched");
            let _ = writeln!(out, "  exclude: not consulted");
        }
    }
    if verdict.include.is_some() {
        match &verdict.exclude {
            Some(glob) => {
                let _ = writeln!(out, "  exclude: matched {:?}", glob);
            }
            None => {
                let _ = writeln!(out, "  exclude: no pattern matched");
            }
        }
    }

    let _ = writeln!(out, "{} {}", "Verdict:".bold(), verdict_label(verdict.enabled));
    out
}

pub fn format_explain_json(verdict: &Verdict) -> String {
    serde_json::to_string_pretty(verdict)
        .unwrap_or_else(|_| "{\"error\":\"failed to serialize verdict\"}".to_string())
}

fn add_pattern_rows(rows: &mut Table, kind: &str, matchers: &[NameMatcher]) {
    for (index, matcher) in matchers.iter().enumerate() {
        rows.add_row(vec![
            Cell::new(kind),
            Cell::new(index),
            Cell::new(format!("{:?}", matcher.glob())),
            Cell::new(matcher.regex_source()),
        ]);
    }
}

pub fn format_patterns_text(table: &FilterTable) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} {:?}", "Specification:".bold(), table.source());

    let mut rows = create_styled_table(&["Kind", "#", "Glob", "Regex"]);
    add_pattern_rows(&mut rows, "include", table.includes());
    add_pattern_rows(&mut rows, "exclude", table.excludes());
    let _ = writeln!(out, "{rows}");
    out
}

pub fn format_patterns_json(table: &FilterTable) -> String {
    let describe = |matchers: &[NameMatcher]| -> Vec<serde_json::Value> {
        matchers
            .iter()
            .map(|m| json!({ "glob": m.glob(), "regex": m.regex_source() }))
            .collect()
    };

    serde_json::to_string_pretty(&json!({
        "spec": table.source(),
        "includes": describe(table.includes()),
        "excludes": describe(table.excludes()),
    }))
    .unwrap_or_else(|_| "{\"error\":\"failed to serialize patterns\"}".to_string())
}
