//! Console reporting: per-case lines, the summary block, the red/green
//! banner, and the exit-code mapping.

use std::process;

use crate::case::{Case, CaseStatus};
use crate::harness::{RunOutcome, Summary};

// Color constants for terminal output
const RESET: &str = "\x1b[0m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";

const LOGO: &str = "\
*********************************************************
        Crucible -- unit testing and call mocking
*********************************************************";

/// Configuration for console output.
pub struct ReportConfig {
    pub use_colors: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            use_colors: atty::is(atty::Stream::Stdout),
        }
    }
}

impl ReportConfig {
    /// Colorless output, regardless of where stdout points.
    pub fn plain() -> Self {
        Self { use_colors: false }
    }

    /// Apply color formatting to text if colors are enabled.
    pub fn colorize(&self, text: &str, color: &str) -> String {
        if self.use_colors {
            format!("{}{}{}", color, text, RESET)
        } else {
            text.to_string()
        }
    }
}

pub(crate) fn print_header(title: &str, _config: &ReportConfig) {
    println!("{}", LOGO);
    println!("Unit Test for '{}':\n", title);
}

pub(crate) fn print_suite_heading(title: &str, _config: &ReportConfig) {
    println!("  Suite <{}>:", title);
}

/// One line per case, printed as the case completes.
pub(crate) fn print_case_line(case: &Case, config: &ReportConfig) {
    match case.status() {
        CaseStatus::Passed => {
            println!("    Case '{}': Passed", case.desc());
        }
        CaseStatus::Failed(failure) => {
            let line = format!(
                "Case '{}': Failure at {}, {}",
                case.desc(),
                failure.site,
                failure.reason
            );
            println!("    {}", config.colorize(&line, RED));
        }
        CaseStatus::Pending => {}
    }
}

/// The totals block and the visually distinct all-green/has-failures banner.
pub fn print_summary(summary: &Summary, config: &ReportConfig) {
    println!("\nSummary:");
    println!("  Total Suites: {}", summary.suites);
    println!("  Failed Suites: {}", summary.failed_suites);
    println!("  Total Cases: {}", summary.cases);
    println!("  Failed Cases: {}", summary.failed_cases);

    if summary.failed_suites == 0 {
        println!("\n==========================");
        println!("        {}", config.colorize("GREEN BAR!", GREEN));
        println!("==========================");
    } else {
        println!("\n=======================");
        println!("        {}", config.colorize("RED BAR!", RED));
        println!("=======================");
    }
}

/// Terminate the process with the outcome's exit status: 0 when every case
/// passed, 1 when at least one failed.
pub fn exit(outcome: RunOutcome) -> ! {
    process::exit(outcome.exit_code());
}
