use crate::CLAP_STYLING;
use clap::{arg, command};
use pagesnap_core::output::DEFAULT_OUTPUT_DIR;

pub(crate) fn command_argument_builder() -> clap::Command {
    clap::Command::new("pagesnap")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("pagesnap")
        .styles(CLAP_STYLING)
        .arg(
            arg!(-q --"quiet" "Suppress banner and non-essential output")
                .required(false)
                .global(true),
        )
        .arg(
            arg!(-v --"verbose" "Log every fetch and extraction step to stderr")
                .required(false)
                .global(true),
        )
        .subcommand_required(false)
        .subcommand(
            command!("crawl")
                .about(
                    "Fetch each URL once and save its links and visible text under a folder \
                named after its host. Links are never followed.",
                )
                .arg(
                    arg!([URL]... "URLs to snapshot (default: the comma-separated CRAWL_URLS \
                    environment variable)")
                    .required(false),
                )
                .arg(
                    arg!(-f --"urls-file" <PATH>)
                        .required(false)
                        .help("Path to a newline-delimited file of URLs to snapshot")
                        .value_parser(clap::value_parser!(std::path::PathBuf))
                        .conflicts_with("URL"),
                )
                .arg(
                    arg!(-o --"output" <PATH>)
                        .required(false)
                        .help("Root directory for the per-host output folders")
                        .default_value(DEFAULT_OUTPUT_DIR),
                )
                .arg(
                    arg!(-t --"timeout" <SECONDS>)
                        .required(false)
                        .help("Request timeout in seconds")
                        .value_parser(clap::value_parser!(u64).range(1..))
                        .default_value("10"),
                )
                .arg(
                    arg!(-c --"concurrency" <NUM>)
                        .required(false)
                        .help("How many pages to fetch at once. Output order always follows input order.")
                        .value_parser(clap::value_parser!(usize))
                        .default_value("1"),
                )
                .arg(
                    arg!(--"no-preview")
                        .required(false)
                        .help("Do not print link and text previews for each page")
                        .action(clap::ArgAction::SetTrue),
                ),
        )
}
