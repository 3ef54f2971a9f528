pub mod handlers;

// Re-export commonly used handler functions for convenience
pub use handlers::{
    expand_output_dir, load_urls_from_env, load_urls_from_file, load_urls_from_source,
    parse_url_line, URLS_ENV_VAR,
};

// Re-export crawl functionality from pagesnap-core
pub use pagesnap_core::crawl::{
    execute_crawl, CrawlOptions, CrawlProgressCallback, CrawlRecord, CrawlResultCallback,
};
