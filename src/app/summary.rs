use crate::metrics::AggregateReport;

/// Console summary, one entry per printed line.
#[must_use]
pub fn summary_lines(report: &AggregateReport) -> Vec<String> {
    let rps_x100 = report.requests_per_second_x100;
    vec![
        "RESULTS:".to_owned(),
        format!("- Request Number: {}", report.total_count),
        format!("- Successful: {}", report.success_count),
        format!("- Network Failed: {}", report.network_failed_count),
        format!("- Bad Failed: {}", report.bad_failed_count),
        format!("- Requests Per Second: {}.{:02}", rps_x100 / 100, rps_x100 % 100),
        format!(
            "- Program took: {}.{:03} second(s)",
            report.elapsed.as_secs(),
            report.elapsed.subsec_millis()
        ),
    ]
}

pub fn print_summary(report: &AggregateReport) {
    for line in summary_lines(report) {
        println!("{}", line);
    }
}
