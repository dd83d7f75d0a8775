use serde::Serialize;
use thiserror::Error;

pub const DEFAULT_MIN_DELIVERIES: u32 = 10;
pub const DEFAULT_MAX_DELIVERIES: u32 = 50;
pub const DEFAULT_HOME_PROBABILITY: f64 = 0.5;
pub const DEFAULT_PICKUP_PROBABILITY: f64 = 0.75;
pub const DEFAULT_PRICE_THRESHOLD: u32 = 10;
pub const DEFAULT_PRICE_BELOW: f64 = 1.0;
pub const DEFAULT_PRICE_ABOVE: f64 = 2.0;

/// A parameter rejected before any simulation work starts.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("invalid {parameter}: {reason}")]
pub struct InvalidInput {
    pub parameter: &'static str,
    pub reason: String,
}

impl InvalidInput {
    pub fn new(parameter: &'static str, reason: impl Into<String>) -> Self {
        Self {
            parameter,
            reason: reason.into(),
        }
    }
}

/// How many self-collections a single day may accept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SelfCollectionCap {
    /// Never accept more self-collections than the day's home-bound arrivals.
    #[default]
    HomeBound,
    /// Every willing self-collector takes a package.
    Uncapped,
}

/// Two-tier per-package price charged by the professional courier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriceSchedule {
    pub threshold: u32,
    pub rate_below: f64,
    pub rate_above: f64,
}

impl Default for PriceSchedule {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_PRICE_THRESHOLD,
            rate_below: DEFAULT_PRICE_BELOW,
            rate_above: DEFAULT_PRICE_ABOVE,
        }
    }
}

impl PriceSchedule {
    /// Cost of delivering `packages` in one day.
    pub fn cost(&self, packages: u32) -> f64 {
        if packages <= self.threshold {
            packages as f64 * self.rate_below
        } else {
            self.threshold as f64 * self.rate_below
                + (packages - self.threshold) as f64 * self.rate_above
        }
    }
}

/// Fixed constants of the delivery network.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NetworkConfig {
    /// Inclusive lower bound of the daily package count.
    pub min_deliveries: u32,
    /// Exclusive upper bound of the daily package count.
    pub max_deliveries: u32,
    pub home_probability: f64,
    pub pickup_probability: f64,
    pub price_schedule: PriceSchedule,
    pub self_collection_cap: SelfCollectionCap,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            min_deliveries: DEFAULT_MIN_DELIVERIES,
            max_deliveries: DEFAULT_MAX_DELIVERIES,
            home_probability: DEFAULT_HOME_PROBABILITY,
            pickup_probability: DEFAULT_PICKUP_PROBABILITY,
            price_schedule: PriceSchedule::default(),
            self_collection_cap: SelfCollectionCap::default(),
        }
    }
}

impl NetworkConfig {
    pub fn validate(&self) -> Result<(), InvalidInput> {
        if self.min_deliveries >= self.max_deliveries {
            return Err(InvalidInput::new(
                "max_deliveries",
                format!(
                    "delivery range [{}, {}) is empty",
                    self.min_deliveries, self.max_deliveries
                ),
            ));
        }
        check_probability("home_probability", self.home_probability)?;
        check_probability("pickup_probability", self.pickup_probability)?;
        check_non_negative("price_below", self.price_schedule.rate_below)?;
        check_non_negative("price_above", self.price_schedule.rate_above)?;
        Ok(())
    }
}

/// Immutable inputs of the day machine. Fields are private so a constructed
/// value always satisfies its range checks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationParameters {
    compensation: f64,
    self_collection_probability: f64,
    network: NetworkConfig,
}

impl SimulationParameters {
    pub fn new(
        compensation: f64,
        self_collection_probability: f64,
        network: NetworkConfig,
    ) -> Result<Self, InvalidInput> {
        check_non_negative("compensation", compensation)?;
        check_probability("self_collection_probability", self_collection_probability)?;
        network.validate()?;
        Ok(Self {
            compensation,
            self_collection_probability,
            network,
        })
    }

    pub fn compensation(&self) -> f64 {
        self.compensation
    }

    pub fn self_collection_probability(&self) -> f64 {
        self.self_collection_probability
    }

    pub fn network(&self) -> &NetworkConfig {
        &self.network
    }
}

pub(crate) fn check_probability(parameter: &'static str, value: f64) -> Result<(), InvalidInput> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(InvalidInput::new(
            parameter,
            format!("{value} is not a probability in [0, 1]"),
        ))
    }
}

fn check_non_negative(parameter: &'static str, value: f64) -> Result<(), InvalidInput> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(InvalidInput::new(
            parameter,
            format!("{value} must be a finite value >= 0"),
        ))
    }
}
