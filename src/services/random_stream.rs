use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Uniform};

use crate::domain::parameters::NetworkConfig;

/// Source of the random draws consumed by the day machine.
pub trait DrawSource {
    /// Uniform variate in `[0, 1)`.
    fn next_uniform(&mut self) -> f64;
    /// Number of packages arriving today.
    fn next_delivery_count(&mut self) -> u32;

    fn bernoulli(&mut self, probability: f64) -> bool {
        self.next_uniform() < probability
    }
}

/// A private random stream owned by exactly one unit of work.
pub struct RandomStream<R: Rng> {
    rng: R,
    deliveries: Uniform<u32>,
}

impl<R: Rng> RandomStream<R> {
    /// `network` must already be validated: the delivery range cannot be empty.
    pub fn new(rng: R, network: &NetworkConfig) -> Self {
        Self {
            rng,
            deliveries: Uniform::new(network.min_deliveries, network.max_deliveries),
        }
    }
}

impl RandomStream<StdRng> {
    /// Stream for worker `worker` of a run started from `base_seed`.
    pub fn for_worker(base_seed: u64, worker: usize, network: &NetworkConfig) -> Self {
        Self::new(
            StdRng::seed_from_u64(worker_seed(base_seed, worker)),
            network,
        )
    }
}

impl<R: Rng> DrawSource for RandomStream<R> {
    fn next_uniform(&mut self) -> f64 {
        self.rng.r#gen::<f64>()
    }

    fn next_delivery_count(&mut self) -> u32 {
        self.deliveries.sample(&mut self.rng)
    }
}

/// Mixes the worker index into the base seed (splitmix64 finalizer) so
/// neighbouring workers start from unrelated generator states.
pub fn worker_seed(base_seed: u64, worker: usize) -> u64 {
    let mut z = base_seed.wrapping_add((worker as u64 + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15));
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Base seed taken from the wall clock, in milliseconds.
pub fn wall_clock_seed() -> u64 {
    chrono::Utc::now().timestamp_millis() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delivery_count_stays_inside_half_open_range() {
        let network = NetworkConfig {
            min_deliveries: 3,
            max_deliveries: 6,
            ..NetworkConfig::default()
        };
        let mut stream = RandomStream::new(StdRng::seed_from_u64(7), &network);
        let mut seen = [false; 6];
        for _ in 0..2_000 {
            let count = stream.next_delivery_count();
            assert!((3..6).contains(&count), "count {count} out of range");
            seen[count as usize] = true;
        }
        assert!(seen[3] && seen[4] && seen[5]);
    }

    #[test]
    fn uniform_draws_are_in_unit_interval() {
        let mut stream = RandomStream::new(StdRng::seed_from_u64(11), &NetworkConfig::default());
        for _ in 0..10_000 {
            let u = stream.next_uniform();
            assert!((0.0..1.0).contains(&u));
        }
    }

    #[test]
    fn bernoulli_extremes_are_certain() {
        let mut stream = RandomStream::new(StdRng::seed_from_u64(5), &NetworkConfig::default());
        for _ in 0..1_000 {
            assert!(!stream.bernoulli(0.0));
            assert!(stream.bernoulli(1.0));
        }
    }

    #[test]
    fn same_worker_seed_replays_the_same_stream() {
        let network = NetworkConfig::default();
        let mut a = RandomStream::for_worker(42, 3, &network);
        let mut b = RandomStream::for_worker(42, 3, &network);
        for _ in 0..100 {
            assert_eq!(a.next_uniform(), b.next_uniform());
            assert_eq!(a.next_delivery_count(), b.next_delivery_count());
        }
    }

    #[test]
    fn workers_get_distinct_seeds() {
        let seeds: std::collections::HashSet<u64> = (0..64).map(|w| worker_seed(1234, w)).collect();
        assert_eq!(seeds.len(), 64);
    }
}
