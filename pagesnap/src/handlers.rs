use anyhow::{Context, bail};
use clap::ArgMatches;
use colored::Colorize;
use pagesnap_core::CoreError;
use pagesnap_core::crawl::{CrawlOptions, CrawlResultCallback, execute_crawl};
use pagesnap_core::output::DEFAULT_OUTPUT_DIR;
use pagesnap_core::report::{generate_crawl_report, render_page};
use pagesnap_scanner::CrawlResult;
use pagesnap_scanner::fetcher::DEFAULT_TIMEOUT_SECS;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::Level;
use url::Url;

/// Comma-separated URL list read when no URL is given on the command line
pub const URLS_ENV_VAR: &str = "CRAWL_URLS";

// Helper functions for crawl handler

/// Pick URLs from a file, the command line, or `CRAWL_URLS`, in that order
pub fn load_urls_from_source(
    cli_urls: &[String],
    urls_file: Option<&Path>,
    env_value: Option<&str>,
) -> anyhow::Result<Vec<String>> {
    let urls = if let Some(urls_file_path) = urls_file {
        load_urls_from_file(urls_file_path)?
    } else if !cli_urls.is_empty() {
        cli_urls.iter().filter_map(|u| parse_url_line(u.trim())).collect()
    } else {
        load_urls_from_env(env_value)
    };

    if urls.is_empty() {
        return Err(CoreError::NoUrls.into());
    }
    Ok(urls)
}

/// Load and parse URLs from a newline-delimited file
pub fn load_urls_from_file(path: &Path) -> anyhow::Result<Vec<String>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read URL file {}", path.display()))?;

    let urls: Vec<String> = content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| parse_url_line(line.trim()))
        .collect();

    if urls.is_empty() {
        bail!("No valid URLs found in {}", path.display());
    }

    Ok(urls)
}

/// Split a comma-separated URL list, dropping blank entries
pub fn load_urls_from_env(value: Option<&str>) -> Vec<String> {
    value
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .filter_map(parse_url_line)
        .collect()
}

/// Parse a single line as a URL, trying to add http:// if needed
pub fn parse_url_line(line: &str) -> Option<String> {
    // Try to parse as-is
    if Url::parse(line).is_ok() {
        return Some(line.to_string());
    }

    // Try adding http://
    let with_scheme = format!("http://{}", line);
    if Url::parse(&with_scheme).is_ok() {
        return Some(with_scheme);
    }

    eprintln!("{} Skipping invalid URL '{}'", "⚠".yellow().bold(), line);
    None
}

/// Expand a leading `~` in the output directory
pub fn expand_output_dir(raw: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(raw).as_ref())
}

/// Send log output to stderr so it does not mix with the report
pub fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

pub async fn handle_crawl(sub_matches: &ArgMatches, quiet: bool) -> anyhow::Result<()> {
    let cli_urls: Vec<String> = sub_matches
        .get_many::<String>("URL")
        .map(|values| values.cloned().collect())
        .unwrap_or_default();
    let urls_file = sub_matches.get_one::<PathBuf>("urls-file");
    let output = sub_matches
        .get_one::<String>("output")
        .map(String::as_str)
        .unwrap_or(DEFAULT_OUTPUT_DIR);
    let timeout_secs = *sub_matches
        .get_one::<u64>("timeout")
        .unwrap_or(&DEFAULT_TIMEOUT_SECS);
    let concurrency = *sub_matches.get_one::<usize>("concurrency").unwrap_or(&1);
    let show_preview = !sub_matches.get_flag("no-preview");

    let env_value = std::env::var(URLS_ENV_VAR).ok();
    let urls = load_urls_from_source(
        &cli_urls,
        urls_file.map(PathBuf::as_path),
        env_value.as_deref(),
    )?;
    let output_root = expand_output_dir(output);

    if !quiet {
        println!(
            "\n{} Crawling {} URL(s)",
            "→".blue().bold(),
            urls.len().to_string().cyan()
        );
        println!("Output: {}", output_root.display().to_string().bright_white());
        println!("Timeout: {}s", timeout_secs);
        println!("Concurrency: {}\n", concurrency.max(1));
    }

    let options = CrawlOptions {
        urls,
        output_root: output_root.clone(),
        timeout_secs,
        concurrency,
        show_progress_bar: true,
    };

    let progress_callback = Arc::new(|msg: String| {
        eprintln!("{}", msg.red());
    });
    let result_callback: CrawlResultCallback = Arc::new(move |result: &CrawlResult| {
        print!("{}", render_page(result, show_preview));
    });

    let records = execute_crawl(options, Some(progress_callback), Some(result_callback)).await?;

    print!("{}", generate_crawl_report(&records, &output_root));
    Ok(())
}
