use crate::error::{CoreError, Result};
use crate::output;
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use pagesnap_scanner::fetcher::DEFAULT_TIMEOUT_SECS;
use pagesnap_scanner::{CrawlResult, Fetcher};
use std::path::PathBuf;
use std::pin::pin;
use std::sync::Arc;
use tracing::{info, warn};

/// Options for configuring a crawl operation
pub struct CrawlOptions {
    pub urls: Vec<String>,
    pub output_root: PathBuf,
    pub timeout_secs: u64,
    /// Pages fetched at once. Results are still handled in input order.
    pub concurrency: usize,
    pub show_progress_bar: bool,
}

impl CrawlOptions {
    pub fn new(urls: Vec<String>, output_root: impl Into<PathBuf>) -> Self {
        Self {
            urls,
            output_root: output_root.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            concurrency: 1,
            show_progress_bar: false,
        }
    }
}

/// Callback for reporting per-URL problems and status messages
pub type CrawlProgressCallback = Arc<dyn Fn(String) + Send + Sync>;

/// Callback invoked with each page's extraction result, before it is written
pub type CrawlResultCallback = Arc<dyn Fn(&CrawlResult) + Send + Sync>;

/// What happened to one input URL.
#[derive(Debug)]
pub struct CrawlRecord {
    pub url: String,
    pub output_dir: Option<PathBuf>,
    pub result: Option<CrawlResult>,
    pub errors: Vec<String>,
}

impl CrawlRecord {
    fn new(url: &str) -> Self {
        Self {
            url: url.to_string(),
            output_dir: None,
            result: None,
            errors: Vec::new(),
        }
    }

    /// Fetched, and both artifacts written.
    pub fn is_success(&self) -> bool {
        self.result.is_some() && self.errors.is_empty()
    }
}

fn progress_bar(len: usize) -> ProgressBar {
    let pb = ProgressBar::new(len as u64);
    pb.set_style(
        ProgressStyle::with_template(
            "{spinner:.cyan} [{bar:40.cyan/blue}] {pos}/{len} {wide_msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=>-"),
    );
    pb
}

/// Runs `f` with the progress bar hidden so its output is not overdrawn.
fn above_bar<F: FnOnce()>(bar: Option<&ProgressBar>, f: F) {
    match bar {
        Some(pb) => pb.suspend(f),
        None => f(),
    }
}

/// Fetch, extract and save every URL in `options.urls`.
///
/// Per-URL failures are reported through `progress_callback` and recorded in the
/// returned [`CrawlRecord`]s; they never abort the batch. Only an empty URL list
/// is an error.
pub async fn execute_crawl(
    options: CrawlOptions,
    progress_callback: Option<CrawlProgressCallback>,
    result_callback: Option<CrawlResultCallback>,
) -> Result<Vec<CrawlRecord>> {
    let CrawlOptions {
        urls,
        output_root,
        timeout_secs,
        concurrency,
        show_progress_bar,
    } = options;

    if urls.is_empty() {
        return Err(CoreError::NoUrls);
    }

    info!(
        "Starting crawl of {} URL(s) into {}",
        urls.len(),
        output_root.display()
    );

    let fetcher = Fetcher::with_timeout(timeout_secs)?;
    let fetcher = &fetcher;

    let bar = show_progress_bar.then(|| progress_bar(urls.len()));

    let report = |msg: String| {
        if let Some(ref callback) = progress_callback {
            above_bar(bar.as_ref(), || callback(msg));
        }
    };

    let mut pages = pin!(stream::iter(urls.iter())
        .map(|url| {
            let bar = bar.clone();
            async move {
                if let Some(pb) = bar {
                    pb.set_message(format!("Crawling: {}", url));
                }
                (url, fetcher.snapshot(url).await)
            }
        })
        .buffered(concurrency.max(1)));

    let mut records = Vec::with_capacity(urls.len());

    while let Some((url, fetched)) = pages.next().await {
        let mut record = CrawlRecord::new(url);

        match fetched {
            Ok(result) => {
                if let Some(ref callback) = result_callback {
                    above_bar(bar.as_ref(), || callback(&result));
                }

                match output::create_output_dir(&output_root, url) {
                    Ok(dir) => {
                        for e in output::save_result(&result, &dir) {
                            warn!("Failed to save results for {}: {}", url, e);
                            report(format!("[!] Error saving results for {}: {}", url, e));
                            record.errors.push(e.to_string());
                        }
                        record.output_dir = Some(dir);
                    }
                    Err(e) => {
                        warn!("{}", e);
                        report(format!("[!] {}", e));
                        record.errors.push(e.to_string());
                    }
                }
                record.result = Some(result);
            }
            Err(e) => {
                warn!("Fetch error for {}: {}", url, e);
                report(format!("[!] Error fetching {}: {}", url, e));
                record.errors.push(e.to_string());
            }
        }

        if let Some(ref pb) = bar {
            pb.inc(1);
        }
        records.push(record);
    }

    let saved = records.iter().filter(|r| r.is_success()).count();
    if let Some(ref pb) = bar {
        pb.finish_with_message(format!("Crawl complete! {}/{} URLs saved", saved, urls.len()));
    }
    info!("Crawl complete. Saved {} of {} URLs", saved, urls.len());

    Ok(records)
}
