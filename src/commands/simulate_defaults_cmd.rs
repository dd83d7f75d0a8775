use std::process::ExitCode;

use locker_sim::services::simulation::run_simulation;
use locker_sim::services::simulation_types::SimulationReport;

use crate::commands::base_commands::Commands;
use crate::commands::report_format::format_simulation_report;
use crate::commands::simulate_cmd::{load_network_if_provided, write_yaml};

/// Compensation per package and the matching acceptance probability.
pub const DEFAULT_COMPENSATIONS: [(f64, f64); 5] =
    [(0.0, 0.01), (0.5, 0.25), (1.0, 0.5), (1.5, 0.6), (1.8, 0.75)];

pub fn simulate_defaults_command(cmd: Commands) -> ExitCode {
    let Commands::SimulateDefaults { run, output } = cmd else {
        return ExitCode::FAILURE;
    };

    let network = match load_network_if_provided(&run) {
        Ok(network) => network,
        Err(e) => {
            eprintln!("Failed to load network config: {e:?}");
            return ExitCode::FAILURE;
        }
    };

    let mut reports = Vec::with_capacity(DEFAULT_COMPENSATIONS.len());
    for (compensation, probability) in DEFAULT_COMPENSATIONS {
        let request = match run.request(compensation, probability, network) {
            Ok(request) => request,
            Err(e) => {
                eprintln!("Failed to simulate: {e:?}");
                return ExitCode::FAILURE;
            }
        };
        let simulation = match run_simulation(&request) {
            Ok(result) => result,
            Err(e) => {
                eprintln!("Failed to simulate compensation {compensation}: {e:?}");
                return ExitCode::FAILURE;
            }
        };

        let report = SimulationReport::new(&request, &simulation);
        println!("{}\n", format_simulation_report(&report));
        reports.push(report);
    }

    match output {
        Some(output) => write_yaml(&output, &reports),
        None => ExitCode::SUCCESS,
    }
}
