use std::path::Path;

use tracing::{error, info};

use crate::app::{AppContext, HarvestError, Result};
use crate::domain::{Board, BoardSources};
use crate::pipeline::HarvestReport;
use crate::store::{analyze, Statistics};

/// Scrape every board, analyze, and print the summary. The summary is
/// printed even when the scrape stops early; the error is returned after.
pub async fn run(ctx: &AppContext) -> Result<()> {
    let scraped = scrape(ctx, None).await;
    if let Err(e) = &scraped {
        error!("Scraping stopped early: {}", e);
    }

    let stats = analyze_stored(ctx);
    print!(
        "{}",
        format_summary(
            &ctx.config.storage.download_dir,
            &ctx.config.storage.metadata_dir,
            scraped.as_ref().ok(),
            &stats,
        )
    );

    scraped.map(|_| ())
}

/// Scrape all configured boards, or only `board`
pub async fn scrape(ctx: &AppContext, board: Option<&str>) -> Result<HarvestReport> {
    let boards = select_boards(&ctx.config.boards, board)?;

    let mut harvester = ctx.harvester();
    let report = harvester.run(&boards).await?;

    info!(
        "Scraping completed. Found {} papers across {} boards ({} downloaded, {} failed downloads).",
        report.total_papers(),
        report.papers.len(),
        report.downloaded,
        report.failed_downloads
    );

    Ok(report)
}

pub fn analyze_stored(ctx: &AppContext) -> Statistics {
    let stats = analyze(ctx.store.as_ref(), &ctx.config.board_names());

    if !stats.is_empty() {
        info!("Statistics Summary:");
        for (board, count) in &stats.papers_by_board {
            info!("  {}: {} papers", board, count);
        }
    }

    stats
}

pub fn analyze_and_print(ctx: &AppContext) {
    let stats = analyze_stored(ctx);
    println!("Total papers: {}", stats.total_papers);
    print_counts("By board", &stats.papers_by_board);
    print_counts("By subject", &stats.papers_by_subject);
    print_counts("By year", &stats.papers_by_year);
    print_counts("By standard", &stats.papers_by_standard);
}

pub fn list_sources(ctx: &AppContext) {
    let mut any = false;
    for source in ctx.config.sources() {
        any = true;
        let mode = if source.requires_rendering {
            "browser"
        } else {
            "http"
        };
        println!("{:<5} [{}] {}\n      pattern: {}", source.board, mode, source.url, source.pattern);
    }
    if !any {
        println!("No sources configured");
    }
}

fn select_boards(boards: &[BoardSources], name: Option<&str>) -> Result<Vec<BoardSources>> {
    let Some(name) = name else {
        return Ok(boards.to_vec());
    };

    let board = Board::from_name(name)
        .ok_or_else(|| HarvestError::Other(format!("Unknown board: {}", name)))?;

    let selected: Vec<_> = boards.iter().filter(|b| b.board == board).cloned().collect();
    if selected.is_empty() {
        return Err(HarvestError::Other(format!("No sources configured for {}", board)));
    }
    Ok(selected)
}

fn print_counts(heading: &str, counts: &std::collections::BTreeMap<String, usize>) {
    println!("{}:", heading);
    for (key, count) in counts {
        println!("  {}: {}", key, count);
    }
}

/// Summary block for `run`. Without a report (scrape stopped early) the
/// total comes from the stored metadata.
fn format_summary(
    download_dir: &Path,
    metadata_dir: &Path,
    report: Option<&HarvestReport>,
    stats: &Statistics,
) -> String {
    let found = report.map_or(stats.total_papers, HarvestReport::total_papers);

    let mut out = String::from("\n=== SCRAPING RESULTS SUMMARY ===\n");
    out.push_str(&format!("Total papers found: {}\n", found));
    for (board, count) in &stats.papers_by_board {
        out.push_str(&format!("{}: {} papers\n", board, count));
    }
    out.push_str(&format!("\nFiles downloaded to: {}\n", display_abs(download_dir)));
    out.push_str(&format!("Metadata saved to: {}\n", display_abs(metadata_dir)));
    out.push_str("============================\n");
    out
}

fn display_abs(path: &Path) -> String {
    std::path::absolute(path)
        .unwrap_or_else(|_| path.to_path_buf())
        .display()
        .to_string()
}
