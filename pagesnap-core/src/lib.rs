pub mod crawl;
pub mod error;
pub mod output;
pub mod report;

use colored::Colorize;

pub use error::{CoreError, Result};

const BANNER: &str = r#"
  _ __   __ _  __ _  ___  ___ _ __   __ _ _ __  
 | '_ \ / _` |/ _` |/ _ \/ __| '_ \ / _` | '_ \ 
 | |_) | (_| | (_| |  __/\__ \ | | | (_| | |_) |
 | .__/ \__,_|\__, |\___||___/_| |_|\__,_| .__/ 
 |_|          |___/                      |_|    
"#;

pub fn print_banner() {
    println!("{}", BANNER.bright_cyan().bold());
    println!(
        "  {} {}\n",
        "title, links and text snapshots".bright_white(),
        format!("v{}", env!("CARGO_PKG_VERSION")).dimmed()
    );
}
