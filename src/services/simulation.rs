use std::time::Instant;

use thiserror::Error;
use tracing::{debug, info};

use crate::domain::observation::{AggregateResult, ObservationResult};
use crate::domain::parameters::{InvalidInput, NetworkConfig, SimulationParameters};
use crate::services::aggregation::{AggregationError, aggregate, check_sample};
use crate::services::random_stream::wall_clock_seed;
use crate::services::scheduler::{ExecutionStrategy, SchedulerError, run_observations};

#[derive(Error, Debug)]
pub enum SimulationError {
    #[error(transparent)]
    InvalidInput(#[from] InvalidInput),
    #[error(transparent)]
    Scheduler(#[from] SchedulerError),
    #[error("failed to aggregate observations: {0}")]
    Aggregation(#[from] AggregationError),
}

/// Everything a run needs. Built with [`SimulationRequest::new`] and the
/// `with_*` setters; validated by [`run_simulation`].
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationRequest {
    pub observations: usize,
    pub days: usize,
    pub confidence: f64,
    pub compensation: f64,
    pub self_collection_probability: f64,
    pub strategy: ExecutionStrategy,
    /// Base seed for the worker streams; the wall clock when unset.
    pub seed: Option<u64>,
    pub network: NetworkConfig,
}

impl SimulationRequest {
    pub fn new(
        observations: usize,
        days: usize,
        confidence: f64,
        compensation: f64,
        self_collection_probability: f64,
    ) -> Self {
        Self {
            observations,
            days,
            confidence,
            compensation,
            self_collection_probability,
            strategy: ExecutionStrategy::default(),
            seed: None,
            network: NetworkConfig::default(),
        }
    }

    pub fn with_strategy(mut self, strategy: ExecutionStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_network(mut self, network: NetworkConfig) -> Self {
        self.network = network;
        self
    }

    /// Checks every input and builds the immutable day-machine parameters.
    pub fn parameters(&self) -> Result<SimulationParameters, InvalidInput> {
        check_sample(self.observations, self.confidence)?;
        if self.days < 1 {
            return Err(InvalidInput::new("days", "at least one day must be simulated"));
        }
        SimulationParameters::new(
            self.compensation,
            self.self_collection_probability,
            self.network,
        )
    }
}

#[derive(Debug, Clone)]
pub struct SimulationOutput {
    pub aggregate: AggregateResult,
    pub samples: Vec<ObservationResult>,
    pub seed: u64,
    pub workers: usize,
    pub elapsed_ms: u64,
}

/// Validates `request`, runs every observation and aggregates them into
/// confidence intervals. Nothing is simulated when validation fails, and no
/// aggregate is produced unless every observation completed.
pub fn run_simulation(request: &SimulationRequest) -> Result<SimulationOutput, SimulationError> {
    let params = request.parameters()?;
    let seed = request.seed.unwrap_or_else(wall_clock_seed);
    let workers = request.strategy.workers();

    info!(
        observations = request.observations,
        days = request.days,
        workers,
        seed,
        compensation = request.compensation,
        probability = request.self_collection_probability,
        "running simulation"
    );
    let started = Instant::now();

    let samples = run_observations(
        request.observations,
        request.days,
        &params,
        request.strategy,
        seed,
    )?;
    let aggregate = aggregate(&samples, request.confidence)?;

    let elapsed_ms = started.elapsed().as_millis() as u64;
    debug!(
        compensation_mean = aggregate.compensation_cost.mean,
        compensation_variance = aggregate.compensation_cost.sample_variance,
        professional_mean = aggregate.professional_cost.mean,
        professional_variance = aggregate.professional_cost.sample_variance,
        occupancy_mean = aggregate.max_occupancy.mean,
        occupancy_variance = aggregate.max_occupancy.sample_variance,
        "aggregated observations"
    );
    info!(elapsed_ms, "simulation done");

    Ok(SimulationOutput {
        aggregate,
        samples,
        seed,
        workers,
        elapsed_ms,
    })
}
