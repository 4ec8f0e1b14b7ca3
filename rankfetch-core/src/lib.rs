pub mod fetch;
pub mod report;

pub use fetch::{FetchOptions, StatusCallback, execute_fetch};
pub use report::{
    ReportFormat, generate_csv_report, generate_json_report, generate_text_report, save_report,
};

use colored::Colorize;

const BANNER: &str = r#"
                 _     ___     _       _
  _ _  __ _ _ _ | |__ / _ \___| |_ __ | |_
 | '_|/ _` | ' \| / /|  _/ -_)  _/ _||   \
 |_|  \__,_|_||_|_\_\|_| \___|\__\__||_||_|
"#;

pub fn print_banner() {
    println!("{}", BANNER.bright_cyan());
    println!(
        "{}",
        format!("  bulk domain ranking metrics v{}", env!("CARGO_PKG_VERSION"))
            .bright_white()
            .bold()
    );
    println!();
}
