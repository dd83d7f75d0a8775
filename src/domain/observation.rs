use serde::Serialize;

/// One sample of the tracked metrics, produced by a full observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ObservationResult {
    pub total_compensation_cost: f64,
    pub total_professional_cost: f64,
    pub max_locker_occupancy: u32,
}

impl ObservationResult {
    pub fn total_cost(&self) -> f64 {
        self.total_compensation_cost + self.total_professional_cost
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConfidenceInterval {
    pub lower: f64,
    pub upper: f64,
    pub mean: f64,
    pub sample_variance: f64,
}

impl ConfidenceInterval {
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AggregateResult {
    pub observations: usize,
    pub confidence: f64,
    pub total_cost: ConfidenceInterval,
    pub professional_cost: ConfidenceInterval,
    pub compensation_cost: ConfidenceInterval,
    pub max_occupancy: ConfidenceInterval,
    /// Highest occupancy reached in any single observation.
    pub peak_occupancy: u32,
}
