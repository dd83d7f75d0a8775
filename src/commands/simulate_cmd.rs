use std::process::ExitCode;

use locker_sim::domain::parameters::NetworkConfig;
use locker_sim::services::histogram::write_cost_histogram_png;
use locker_sim::services::network_yaml::{NetworkYamlError, load_network_from_yaml_file};
use locker_sim::services::simulation::run_simulation;
use locker_sim::services::simulation_types::SimulationReport;

use crate::commands::base_commands::{Commands, RunArgs};
use crate::commands::report_format::format_simulation_report;

pub fn simulate_command(cmd: Commands) -> ExitCode {
    let Commands::Simulate {
        run,
        compensation,
        probability,
        output,
        histogram,
    } = cmd
    else {
        return ExitCode::FAILURE;
    };

    let network = match load_network_if_provided(&run) {
        Ok(network) => network,
        Err(e) => {
            eprintln!("Failed to load network config: {e:?}");
            return ExitCode::FAILURE;
        }
    };
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
            eprintln!("Failed to simulate: {e:?}");
            return ExitCode::FAILURE;
        }
    };
    let report = SimulationReport::new(&request, &simulation);
    println!("{}", format_simulation_report(&report));

    if let Some(histogram_path) = histogram {
        let totals: Vec<f64> = simulation.samples.iter().map(|s| s.total_cost()).collect();
        if let Err(e) = write_cost_histogram_png(&histogram_path, &totals) {
            eprintln!("Failed to write cost histogram: {e:?}");
            return ExitCode::FAILURE;
        }
        println!("Cost histogram written to {histogram_path}");
    }

    if let Some(output) = output {
        return write_yaml(&output, &report);
    }
    ExitCode::SUCCESS
}

pub(crate) fn load_network_if_provided(run: &RunArgs) -> Result<NetworkConfig, NetworkYamlError> {
    match &run.network {
        Some(path) => load_network_from_yaml_file(path),
        None => Ok(NetworkConfig::default()),
    }
}

pub(crate) fn write_yaml<T: serde::Serialize>(output: &str, value: &T) -> ExitCode {
    let yaml = match serde_yaml::to_string(value) {
        Ok(contents) => contents,
        Err(e) => {
            eprintln!("Failed to serialize simulation output: {e:?}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = std::fs::write(output, yaml) {
        eprintln!("Failed to write simulation output: {e:?}");
        ExitCode::FAILURE
    } else {
        println!("Simulation result written to {output}");
        ExitCode::SUCCESS
    }
}
