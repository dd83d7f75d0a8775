use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use locker_sim::domain::parameters::{InvalidInput, NetworkConfig};
use locker_sim::services::scheduler::ExecutionStrategy;
use locker_sim::services::simulation::SimulationRequest;

#[derive(Parser)]
#[command(author, version, about)]
pub struct CliArgs {
    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Estimate cost intervals for one compensation level
    Simulate {
        #[command(flatten)]
        run: RunArgs,
        /// Cash paid per self-collected package
        #[arg(short = 'm', long)]
        compensation: f64,
        /// Probability that a possible self-collector accepts
        #[arg(short, long)]
        probability: f64,
        /// Output YAML file
        #[arg(short, long)]
        output: Option<String>,
        /// Output PNG histogram of total cost per observation
        #[arg(long)]
        histogram: Option<String>,
    },
    /// Estimate cost intervals for the built-in compensation levels
    SimulateDefaults {
        #[command(flatten)]
        run: RunArgs,
        /// Output YAML file
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Number of observations
    #[arg(short = 'n', long, default_value_t = 10000)]
    pub observations: usize,
    /// Days simulated per observation
    #[arg(short, long, default_value_t = 30)]
    pub days: usize,
    /// Confidence level of the intervals
    #[arg(short, long, default_value_t = 0.95)]
    pub confidence: f64,
    /// Worker threads (defaults to available hardware threads)
    #[arg(short, long, conflicts_with = "serial")]
    pub workers: Option<usize>,
    /// Run every observation on the main thread
    #[arg(long)]
    pub serial: bool,
    /// Base seed for reproducible runs
    #[arg(long)]
    pub seed: Option<u64>,
    /// Network description YAML file
    #[arg(long)]
    pub network: Option<String>,
}

impl RunArgs {
    pub fn strategy(&self) -> Result<ExecutionStrategy, InvalidInput> {
        if self.serial {
            return Ok(ExecutionStrategy::Serial);
        }
        match self.workers {
            None => Ok(ExecutionStrategy::available_parallelism()),
            Some(workers) => ExecutionStrategy::parallel(workers)
                .ok_or_else(|| InvalidInput::new("workers", "at least one worker is needed")),
        }
    }

    pub fn request(
        &self,
        compensation: f64,
        probability: f64,
        network: NetworkConfig,
    ) -> Result<SimulationRequest, InvalidInput> {
        let mut request =
            SimulationRequest::new(self.observations, self.days, self.confidence, compensation, probability)
                .with_strategy(self.strategy()?)
                .with_network(network);
        if let Some(seed) = self.seed {
            request = request.with_seed(seed);
        }
        Ok(request)
    }
}
