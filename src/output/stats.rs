//! End-of-run summary printing

use crate::fetch::FetchFailure;
use crate::output::report::RunSummary;

/// Prints a run summary to stdout in a formatted manner
///
/// # Arguments
///
/// * `title` - Heading naming the harvester
/// * `unit` - What was counted (`"product pages"`, `"sitemaps"`, ...)
/// * `summary` - Outcome counts, both fields in `unit`
/// * `failures` - Failures to list, one per line
pub fn print_summary(title: &str, unit: &str, summary: &RunSummary, failures: &[FetchFailure]) {
    println!("=== {} ===\n", title);

    println!("Overview ({}):", unit);
    println!("  Attempted: {}", summary.attempted());
    println!("  Succeeded: {}", summary.records);
    println!("  Failed: {}", summary.failures);
    println!();

    if !failures.is_empty() {
        println!("Failures ({}):", failures.len());
        for failure in failures {
            println!("  - {}", failure);
        }
        println!();
    }

    println!(
        "Success Rate: {:.1}% ({} / {} {})",
        summary.success_rate(),
        summary.records,
        summary.attempted(),
        unit
    );
}
