// Console previews of a page snapshot and the end-of-run summary

use crate::crawl::CrawlRecord;
use colored::Colorize;
use pagesnap_scanner::CrawlResult;
use std::path::Path;

pub const TEXT_PREVIEW_CHARS: usize = 200;

/// The slice of a link list shown on the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkPreview<'a> {
    pub shown: &'a [String],
    pub total: usize,
}

impl LinkPreview<'_> {
    pub fn hidden(&self) -> usize {
        self.total - self.shown.len()
    }
}

/// A tenth of the links, and at least one when there are any.
pub fn link_preview(links: &[String]) -> LinkPreview<'_> {
    let show = if links.is_empty() {
        0
    } else {
        (links.len() / 10).max(1)
    };
    LinkPreview {
        shown: &links[..show],
        total: links.len(),
    }
}

/// First `max_chars` characters of `text`, with an ellipsis when cut.
pub fn text_preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}…", &text[..idx]),
        None => text.to_string(),
    }
}

pub fn render_link_preview(links: &[String]) -> String {
    let preview = link_preview(links);
    if preview.total == 0 {
        return format!("{}\n", "No links found.".yellow());
    }

    let mut out = String::new();
    out.push_str(&format!(
        "{}\n",
        format!("Showing {} of {} links:", preview.shown.len(), preview.total).cyan()
    ));
    for (idx, link) in preview.shown.iter().enumerate() {
        out.push_str(&format!("{}\n", format!("{:2}. {}", idx + 1, link).green()));
    }
    if preview.hidden() > 0 {
        out.push_str(&format!(
            "{}\n",
            format!("...and {} more not shown", preview.hidden()).yellow()
        ));
    }
    out
}

/// Header, title and (optionally) link and text previews for one page.
pub fn render_page(result: &CrawlResult, with_preview: bool) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "\n{}\n",
        format!("--- {} ---", result.url).blue().bold()
    ));
    if let Some(ref title) = result.title {
        out.push_str(&format!("{} {}\n", "Title:".bright_white().bold(), title));
    }

    if with_preview {
        out.push_str(&render_link_preview(&result.links));
        if result.text.is_empty() {
            out.push_str(&format!("{}\n", "No text found.".yellow()));
        } else {
            out.push_str(&format!(
                "{} {}\n",
                "Text:".bright_white().bold(),
                text_preview(&result.text, TEXT_PREVIEW_CHARS).dimmed()
            ));
        }
    }
    out
}

/// Generate the end-of-run report from the crawl records
pub fn generate_crawl_report(records: &[CrawlRecord], output_root: &Path) -> String {
    let saved = records.iter().filter(|r| r.is_success()).count();
    let failed = records.len() - saved;
    let total_links: usize = records
        .iter()
        .filter_map(|r| r.result.as_ref())
        .map(|r| r.links.len())
        .sum();

    let mut report = String::new();
    report.push_str(&format!("\n{}\n\n", "━".repeat(52).bright_blue()));
    report.push_str(&format!("{}\n", "# Summary:".bold()));
    report.push_str(&format!("  Pages crawled: {}\n", records.len()));
    report.push_str(&format!("  Pages saved: {}\n", saved));
    report.push_str(&format!("  Pages failed: {}\n", failed));
    report.push_str(&format!("  Total links found: {}\n", total_links));
    report.push_str(&format!("\n{}\n\n", "━".repeat(52).bright_blue()));

    for record in records {
        let marker = if record.is_success() {
            "✓".green().bold()
        } else {
            "✗".red().bold()
        };
        let location = record
            .output_dir
            .as_ref()
            .map(|dir| dir.display().to_string())
            .unwrap_or_else(|| "-".to_string());

        report.push_str(&format!("  {} {} -> {}\n", marker, record.url, location));
        for error in &record.errors {
            report.push_str(&format!("      {}\n", error.red()));
        }
    }

    report.push_str(&format!(
        "\n{}\n",
        format!("Done! Results saved in {}", output_root.display()).green()
    ));
    report
}
