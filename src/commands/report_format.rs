use locker_sim::domain::observation::ConfidenceInterval;
use locker_sim::services::simulation_types::SimulationReport;

pub fn format_simulation_report(report: &SimulationReport) -> String {
    let mut lines = Vec::new();
    lines.push(format!(
        "Results for compensation {} with probability {}",
        report.compensation, report.self_collection_probability
    ));
    lines.push(format!(
        "Observations: {} x {} days on {} worker(s), seed {}",
        report.observations, report.days, report.workers, report.seed
    ));
    lines.push(format!("Confidence: {}", report.confidence));
    lines.push(format!("Done in {} ms", report.elapsed_ms));
    lines.push(String::new());
    lines.push("Metric | Mean | Min | Max".to_string());
    lines.push("-------|------|-----|----".to_string());
    lines.push(format_interval_row("Compensation", &report.costs.compensation));
    lines.push(format_interval_row("Professional delivery", &report.costs.professional));
    lines.push(format_interval_row("Total cost", &report.costs.total));
    lines.push(format_interval_row("Packages in lockers", &report.occupancy.max_occupancy));
    lines.push(String::new());
    lines.push(format!("Max packages: {}", report.occupancy.peak));

    lines.join("\n")
}

fn format_interval_row(label: &str, interval: &ConfidenceInterval) -> String {
    format!(
        "{label} | {mean:.4} | {lower:.4} | {upper:.4}",
        mean = interval.mean,
        lower = interval.lower,
        upper = interval.upper
    )
}
