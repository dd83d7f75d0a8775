use std::num::NonZeroUsize;

use rayon::prelude::*;
use thiserror::Error;
use tracing::debug;

use crate::domain::observation::ObservationResult;
use crate::domain::parameters::SimulationParameters;
use crate::services::observation_runner::run_observation;
use crate::services::random_stream::RandomStream;

#[derive(Error, Debug)]
pub enum SchedulerError {
    #[error("failed to start worker pool: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
    #[error("worker {worker} could not allocate room for {observations} observations")]
    WorkerAllocation { worker: usize, observations: usize },
}

/// How the observations of a run are executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionStrategy {
    /// Everything on the calling thread, with a single random stream.
    Serial,
    /// One chunk per worker on a dedicated pool of `workers` threads.
    Parallel { workers: NonZeroUsize },
}

impl ExecutionStrategy {
    pub fn parallel(workers: usize) -> Option<Self> {
        NonZeroUsize::new(workers).map(|workers| Self::Parallel { workers })
    }

    /// Parallel over every hardware thread the OS reports.
    pub fn available_parallelism() -> Self {
        let workers = std::thread::available_parallelism().unwrap_or(NonZeroUsize::MIN);
        Self::Parallel { workers }
    }

    pub fn workers(&self) -> usize {
        match self {
            Self::Serial => 1,
            Self::Parallel { workers } => workers.get(),
        }
    }
}

impl Default for ExecutionStrategy {
    fn default() -> Self {
        Self::available_parallelism()
    }
}

/// Splits `observations` into `workers` chunks of `observations / workers`,
/// the last one absorbing the remainder.
pub fn partition(observations: usize, workers: NonZeroUsize) -> Vec<usize> {
    let workers = workers.get();
    let base = observations / workers;
    let mut chunks = vec![base; workers];
    if let Some(last) = chunks.last_mut() {
        *last += observations % workers;
    }
    chunks
}

/// Runs `observations` independent observations of `day_count` days each.
///
/// Worker `i` draws from a stream seeded with `(base_seed, i)` and owns its
/// output buffer; the buffers are concatenated in worker order once every
/// worker is done. A failing worker fails the whole run.
pub fn run_observations(
    observations: usize,
    day_count: usize,
    params: &SimulationParameters,
    strategy: ExecutionStrategy,
    base_seed: u64,
) -> Result<Vec<ObservationResult>, SchedulerError> {
    let per_worker = match strategy {
        ExecutionStrategy::Serial => vec![run_chunk(0, observations, day_count, params, base_seed)?],
        ExecutionStrategy::Parallel { workers } => {
            let chunks = partition(observations, workers);
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(workers.get())
                .thread_name(|index| format!("locker-sim-worker-{index}"))
                .build()?;
            pool.install(|| {
                chunks
                    .par_iter()
                    .enumerate()
                    .map(|(worker, &chunk)| run_chunk(worker, chunk, day_count, params, base_seed))
                    .collect::<Result<Vec<_>, _>>()
            })?
        }
    };

    Ok(per_worker.into_iter().flatten().collect())
}

fn run_chunk(
    worker: usize,
    observations: usize,
    day_count: usize,
    params: &SimulationParameters,
    base_seed: u64,
) -> Result<Vec<ObservationResult>, SchedulerError> {
    debug!(worker, observations, "worker started");

    let mut results = Vec::new();
    results
        .try_reserve_exact(observations)
        .map_err(|_| SchedulerError::WorkerAllocation {
            worker,
            observations,
        })?;

    let mut stream = RandomStream::for_worker(base_seed, worker, params.network());
    for _ in 0..observations {
        results.push(run_observation(day_count, params, &mut stream));
    }

    debug!(worker, observations, "worker finished");
    Ok(results)
}
