use std::collections::VecDeque;

use crate::domain::observation::ObservationResult;
use crate::services::random_stream::DrawSource;

// A DrawSource that replays fixed draws and panics when it runs dry
pub struct ScriptedStream {
    delivery_counts: VecDeque<u32>,
    uniforms: VecDeque<f64>,
}

impl ScriptedStream {
    pub fn new(delivery_counts: Vec<u32>, uniforms: Vec<f64>) -> Self {
        Self {
            delivery_counts: delivery_counts.into(),
            uniforms: uniforms.into(),
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.delivery_counts.is_empty() && self.uniforms.is_empty()
    }
}

impl DrawSource for ScriptedStream {
    fn next_uniform(&mut self) -> f64 {
        self.uniforms.pop_front().expect("scripted uniforms exhausted")
    }

    fn next_delivery_count(&mut self) -> u32 {
        self.delivery_counts
            .pop_front()
            .expect("scripted delivery counts exhausted")
    }
}

// A DrawSource where every day brings the same packages and every draw is the same value
pub struct ConstantStream {
    pub delivery_count: u32,
    pub uniform: f64,
}

impl DrawSource for ConstantStream {
    fn next_uniform(&mut self) -> f64 {
        self.uniform
    }

    fn next_delivery_count(&mut self) -> u32 {
        self.delivery_count
    }
}

pub fn observation(compensation: f64, professional: f64, occupancy: u32) -> ObservationResult {
    ObservationResult {
        total_compensation_cost: compensation,
        total_professional_cost: professional,
        max_locker_occupancy: occupancy,
    }
}
