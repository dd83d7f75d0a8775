use serde::Serialize;

use crate::domain::observation::{AggregateResult, ConfidenceInterval};
use crate::domain::parameters::NetworkConfig;
use crate::services::simulation::{SimulationOutput, SimulationRequest};

#[derive(Serialize, Debug, Clone)]
pub struct CostIntervals {
    pub compensation: ConfidenceInterval,
    pub professional: ConfidenceInterval,
    pub total: ConfidenceInterval,
}

#[derive(Serialize, Debug, Clone)]
pub struct OccupancyReport {
    pub max_occupancy: ConfidenceInterval,
    pub peak: u32,
}

#[derive(Serialize, Debug, Clone)]
pub struct SimulationReport {
    pub compensation: f64,
    pub self_collection_probability: f64,
    pub observations: usize,
    pub days: usize,
    pub confidence: f64,
    pub workers: usize,
    pub seed: u64,
    pub elapsed_ms: u64,
    pub network: NetworkConfig,
    pub costs: CostIntervals,
    pub occupancy: OccupancyReport,
}

impl SimulationReport {
    pub fn new(request: &SimulationRequest, output: &SimulationOutput) -> Self {
        let AggregateResult {
            observations,
            confidence,
            total_cost,
            professional_cost,
            compensation_cost,
            max_occupancy,
            peak_occupancy,
        } = output.aggregate;

        Self {
            compensation: request.compensation,
            self_collection_probability: request.self_collection_probability,
            observations,
            days: request.days,
            confidence,
            workers: output.workers,
            seed: output.seed,
            elapsed_ms: output.elapsed_ms,
            network: request.network,
            costs: CostIntervals {
                compensation: compensation_cost,
                professional: professional_cost,
                total: total_cost,
            },
            occupancy: OccupancyReport {
                max_occupancy,
                peak: peak_occupancy,
            },
        }
    }
}
