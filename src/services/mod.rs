pub mod aggregation;
pub mod day_simulation;
pub mod histogram;
pub mod network_yaml;
pub mod observation_runner;
pub mod random_stream;
pub mod scheduler;
pub mod simulation;
pub mod simulation_types;
