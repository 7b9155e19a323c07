// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Subcommand implementations.

use std::collections::BTreeMap;
use std::io::{self, BufRead};

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use blogsift::{
    parse_index, source_for, EngineOptions, HtmlResultsList, MatchEngine, QueryResult,
    RenderedList, ResultsView, SearchController, SearchIndex, SearchStatus, SiteSettings,
    MIN_QUERY_CHARS, NO_RESULTS_TEXT,
};

use super::display::*;

/// Controller over `view`, initialized from `location`.
///
/// A failed load is reported but not fatal: the controller is returned in
/// `Failed` so callers behave like a page whose index is missing.
async fn load_controller<V: ResultsView>(
    settings: &SiteSettings,
    options: EngineOptions,
    location: &str,
    view: V,
) -> Result<SearchController<V>> {
    let source = source_for(location, Some(settings.fetch_timeout))?;
    let mut controller = SearchController::new(options, view)?;
    if let Err(err) = controller.initialize(source.as_ref()).await {
        eprintln!("{} {}", themed(RED, &[BOLD], "search disabled:"), err);
    }
    Ok(controller)
}

fn is_gated(query: &str) -> bool {
    query.chars().count() < MIN_QUERY_CHARS
}

// ═══════════════════════════════════════════════════════════════════════════
// SEARCH
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Serialize)]
struct SearchOutput<'a> {
    query: &'a str,
    status: SearchStatus,
    #[serde(flatten)]
    result: QueryResult<'a>,
}

pub async fn search(
    settings: &SiteSettings,
    location: &str,
    query: &str,
    limit: Option<usize>,
    json: bool,
    html: bool,
) -> Result<()> {
    let mut options = settings.search.clone();
    options.include_matches = true;
    if limit.is_some() {
        options.limit = limit;
    }

    let mut controller = load_controller(settings, options, location, HtmlResultsList::new()).await?;
    controller.on_input(query);

    if html {
        println!("{}", controller.view().html());
        return Ok(());
    }

    let result = match controller.query(query) {
        Some(result) if !is_gated(query) => result,
        _ => QueryResult::default(),
    };

    if json {
        let output = SearchOutput {
            query,
            status: controller.status(),
            result,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    print_search(query, controller.status(), &result);
    Ok(())
}

fn print_search(query: &str, status: SearchStatus, result: &QueryResult<'_>) {
    println!();
    section_top(&format!("SEARCH \"{}\"", truncate(query, 40)));
    row(&format!("  status  {}", status_label(status)));

    if status != SearchStatus::Ready {
        section_bot();
        return;
    }
    if is_gated(query) {
        row(&themed(
            GRAY,
            &[DIM],
            &format!("  fewer than {MIN_QUERY_CHARS} characters: list cleared"),
        ));
        section_bot();
        return;
    }

    section_mid(&format!("{} RESULTS", result.len()));
    if result.is_empty() {
        row(&format!("  {}", themed(GRAY, &[], NO_RESULTS_TEXT)));
    }
    for (rank, hit) in result.iter().enumerate() {
        let title_ranges = hit
            .matches
            .iter()
            .find(|m| m.key == blogsift::RecordField::Title)
            .map(|m| m.ranges.as_slice())
            .unwrap_or(&[]);
        let title = if hit.record.title.is_empty() {
            themed(GRAY, &[DIM], "(untitled)")
        } else {
            highlight(&truncate(&hit.record.title, 56), title_ranges)
        };
        row(&format!(
            "  {:>2}. {}  {}",
            rank + 1,
            score_value(hit.score),
            title
        ));
        row(&format!(
            "          {}",
            themed(BLUE, &[], &truncate(&hit.record.permalink, 68))
        ));
        let keys: Vec<String> = hit
            .matches
            .iter()
            .map(|m| match m.tag_index {
                Some(i) => format!("{}[{}]", m.key, i),
                None => m.key.to_string(),
            })
            .collect();
        row(&themed(
            GRAY,
            &[DIM],
            &format!("          matched {}", keys.join(", ")),
        ));
    }
    section_bot();
}

// ═══════════════════════════════════════════════════════════════════════════
// INSPECT
// ═══════════════════════════════════════════════════════════════════════════

/// Counts worth knowing before shipping an index.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct IndexStats {
    pub records: usize,
    pub duplicates_dropped: usize,
    pub missing_title: usize,
    pub missing_summary: usize,
    pub missing_content: usize,
    pub tags: BTreeMap<String, usize>,
}

impl IndexStats {
    pub fn collect(index: &SearchIndex) -> Self {
        let mut stats = IndexStats {
            records: index.len(),
            duplicates_dropped: index.duplicates_dropped(),
            ..IndexStats::default()
        };
        for (_, record) in index.iter() {
            stats.missing_title += usize::from(record.title.trim().is_empty());
            stats.missing_summary += usize::from(record.summary.is_none());
            stats.missing_content += usize::from(record.content.is_none());
            for tag in &record.tags {
                *stats.tags.entry(tag.clone()).or_default() += 1;
            }
        }
        stats
    }

    /// Tags by descending frequency, then name.
    pub fn top_tags(&self, n: usize) -> Vec<(&str, usize)> {
        let mut tags: Vec<(&str, usize)> = self.tags.iter().map(|(t, c)| (t.as_str(), *c)).collect();
        tags.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        tags.truncate(n);
        tags
    }
}

pub async fn inspect(settings: &SiteSettings, location: &str) -> Result<()> {
    let source = source_for(location, Some(settings.fetch_timeout))?;
    let bytes = source.fetch().await?;
    let index = parse_index(&bytes).with_context(|| format!("reading {location}"))?;
    let stats = IndexStats::collect(&index);
    info!(records = stats.records, "inspected index");

    // Build the engine too, so bad search options show up here.
    let engine = MatchEngine::new(index, settings.search.clone())?;

    println!();
    section_top("INDEX");
    row(&format!("  location            {}", truncate(location, 58)));
    row(&format!("  size                {} bytes", bytes.len()));
    row(&format!("  records             {}", stats.records));
    let dupes = stats.duplicates_dropped.to_string();
    row(&format!(
        "  duplicates dropped  {}",
        if stats.duplicates_dropped > 0 {
            themed(YELLOW, &[BOLD], &dupes)
        } else {
            dupes
        }
    ));
    row(&format!("  missing title       {}", stats.missing_title));
    row(&format!("  missing summary     {}", stats.missing_summary));
    row(&format!("  missing content     {}", stats.missing_content));

    section_mid("SEARCH OPTIONS");
    let keys: Vec<String> = engine
        .keys()
        .iter()
        .map(|k| format!("{} ({:.2})", k.name, k.weight))
        .collect();
    row(&format!("  keys                {}", keys.join(", ")));
    row(&format!("  threshold           {}", engine.options().threshold));
    row(&format!(
        "  location/distance   {}/{}",
        engine.options().location,
        engine.options().distance
    ));
    let json_output = match settings.json_output {
        Some(true) => themed(GREEN, &[], "enabled"),
        Some(false) => themed(RED, &[BOLD], "disabled (add JSON to outputs.home)"),
        None => themed(GRAY, &[], "not configured"),
    };
    row(&format!("  home JSON output    {}", json_output));

    section_mid("TOP TAGS");
    for (tag, count) in stats.top_tags(10) {
        row(&format!("  {} {}", pad_right(&themed(CYAN, &[], tag), 24), count));
    }
    section_bot();
    Ok(())
}

// ═══════════════════════════════════════════════════════════════════════════
// INTERACTIVE
// ═══════════════════════════════════════════════════════════════════════════

/// Prints each list the controller shows.
#[derive(Debug, Default)]
pub struct TerminalList {
    pub shown: usize,
}

impl ResultsView for TerminalList {
    fn show(&mut self, list: RenderedList) {
        self.shown += 1;
        match list {
            RenderedList::Empty => println!("{}", themed(GRAY, &[DIM], "  (list cleared)")),
            RenderedList::NoResults => println!("  {}", NO_RESULTS_TEXT),
            RenderedList::Links(links) => {
                for link in links {
                    println!(
                        "  {}  {}",
                        pad_right(&truncate(&link.title, 48), 48),
                        themed(BLUE, &[], &link.permalink)
                    );
                }
            }
        }
    }
}

pub async fn interactive(settings: &SiteSettings, location: &str) -> Result<()> {
    let mut controller =
        load_controller(settings, settings.search.clone(), location, TerminalList::default()).await?;
    eprintln!(
        "{} {} (one query per line, Ctrl-D to quit)",
        themed(CYAN, &[BOLD], "blogsift"),
        status_label(controller.status())
    );

    for line in io::stdin().lock().lines() {
        let line = line?;
        if !controller.on_input(&line) {
            println!("{}", themed(GRAY, &[DIM], "  (search not ready)"));
        }
    }
    Ok(())
}
