use statrs::distribution::{ContinuousCDF, StudentsT, StudentsTError};
use thiserror::Error;

use crate::domain::observation::{AggregateResult, ConfidenceInterval, ObservationResult};
use crate::domain::parameters::InvalidInput;

#[derive(Error, Debug)]
pub enum AggregationError {
    #[error(transparent)]
    InvalidInput(#[from] InvalidInput),
    #[error("invalid t distribution: {0}")]
    Distribution(#[from] StudentsTError),
}

/// Turns pooled observations into Student's t confidence intervals for the
/// mean of each metric. The result does not depend on the order of `results`
/// beyond floating point rounding.
pub fn aggregate(
    results: &[ObservationResult],
    confidence: f64,
) -> Result<AggregateResult, AggregationError> {
    check_sample(results.len(), confidence)?;

    let n = results.len();
    let t_critical = critical_value(confidence, (n - 1) as f64)?;

    let total_cost = interval(results.iter().map(|r| r.total_cost()), t_critical);
    let professional_cost = interval(results.iter().map(|r| r.total_professional_cost), t_critical);
    let compensation_cost = interval(results.iter().map(|r| r.total_compensation_cost), t_critical);
    let max_occupancy = interval(
        results.iter().map(|r| r.max_locker_occupancy as f64),
        t_critical,
    );
    let peak_occupancy = results
        .iter()
        .map(|r| r.max_locker_occupancy)
        .max()
        .unwrap_or(0);

    Ok(AggregateResult {
        observations: n,
        confidence,
        total_cost,
        professional_cost,
        compensation_cost,
        max_occupancy,
        peak_occupancy,
    })
}

pub(crate) fn check_sample(observations: usize, confidence: f64) -> Result<(), InvalidInput> {
    if observations < 2 {
        return Err(InvalidInput::new(
            "observations",
            format!("{observations} observations given, at least 2 are needed for a sample variance"),
        ));
    }
    if !(confidence > 0.0 && confidence < 1.0) {
        return Err(InvalidInput::new(
            "confidence",
            format!("{confidence} is not strictly between 0 and 1"),
        ));
    }
    Ok(())
}

/// Two-sided Student's t critical value: the `1 - (1 - confidence) / 2`
/// quantile with `degrees_of_freedom`.
fn critical_value(confidence: f64, degrees_of_freedom: f64) -> Result<f64, StudentsTError> {
    let t_dist = StudentsT::new(0.0, 1.0, degrees_of_freedom)?;
    Ok(t_dist.inverse_cdf(1.0 - (1.0 - confidence) / 2.0))
}

fn interval(values: impl Iterator<Item = f64>, t_critical: f64) -> ConfidenceInterval {
    let mut acc = RunningMoments::default();
    values.for_each(|value| acc.update(value));

    let sample_variance = acc.sample_variance();
    let margin = t_critical * (sample_variance / acc.count as f64).sqrt();
    ConfidenceInterval {
        lower: acc.mean - margin,
        upper: acc.mean + margin,
        mean: acc.mean,
        sample_variance,
    }
}

/// Welford's running mean and sum of squared deviations. A constant input
/// keeps `m2` at exactly zero.
#[derive(Debug, Default)]
struct RunningMoments {
    count: u64,
    mean: f64,
    m2: f64,
}

impl RunningMoments {
    fn update(&mut self, value: f64) {
        self.count += 1;
        if self.count == 1 {
            self.mean = value;
            return;
        }
        let delta = value - self.mean;
        self.mean += delta / self.count as f64;
        self.m2 += delta * (value - self.mean);
    }

    fn sample_variance(&self) -> f64 {
        if self.count < 2 {
            return 0.0;
        }
        (self.m2 / (self.count - 1) as f64).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::observation;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use rand_distr::{Distribution, Normal};

    #[test]
    fn aggregate_rejects_single_observation() {
        match aggregate(&[observation(1.0, 2.0, 3)], 0.95) {
            Err(AggregationError::InvalidInput(input)) => assert_eq!(input.parameter, "observations"),
            other => panic!("expected invalid observations, got {other:?}"),
        }
    }

    #[test]
    fn aggregate_rejects_confidence_outside_open_unit_interval() {
        let results = [observation(1.0, 2.0, 3), observation(2.0, 3.0, 4)];
        for confidence in [0.0, 1.0, -0.2, 1.5, f64::NAN] {
            match aggregate(&results, confidence) {
                Err(AggregationError::InvalidInput(input)) => assert_eq!(input.parameter, "confidence"),
                other => panic!("expected invalid confidence for {confidence}, got {other:?}"),
            }
        }
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-6,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn critical_values_match_reference_table() {
        assert_close(critical_value(0.95, 1.0).unwrap(), 12.706204736);
        assert_close(critical_value(0.95, 2.0).unwrap(), 4.302652730);
        assert_close(critical_value(0.95, 10.0).unwrap(), 2.228138852);
        assert_close(critical_value(0.95, 29.0).unwrap(), 2.045229642);
        assert_close(critical_value(0.99, 5.0).unwrap(), 4.032142984);
        assert_close(critical_value(0.90, 20.0).unwrap(), 1.724718243);
    }

    #[test]
    fn critical_value_rejects_zero_degrees_of_freedom() {
        assert!(critical_value(0.95, 0.0).is_err());
    }

    #[test]
    fn identical_samples_collapse_to_the_mean() {
        let results = vec![observation(0.1, 17.3, 42); 250];
        let aggregate = aggregate(&results, 0.95).unwrap();

        for interval in [
            aggregate.compensation_cost,
            aggregate.professional_cost,
            aggregate.total_cost,
            aggregate.max_occupancy,
        ] {
            assert_eq!(interval.lower, interval.mean);
            assert_eq!(interval.upper, interval.mean);
            assert_eq!(interval.sample_variance, 0.0);
        }
        assert_eq!(aggregate.compensation_cost.mean, 0.1);
        assert_eq!(aggregate.max_occupancy.mean, 42.0);
        assert_eq!(aggregate.peak_occupancy, 42);
    }

    #[test]
    fn two_sample_interval_matches_hand_computation() {
        // mean 3, variance 2, n 2, t(0.975, 1) = 12.7062...
        let results = [observation(2.0, 0.0, 1), observation(4.0, 0.0, 5)];
        let aggregate = aggregate(&results, 0.95).unwrap();

        let margin = 12.706204736 * (2.0_f64 / 2.0).sqrt();
        assert!((aggregate.compensation_cost.mean - 3.0).abs() < 1e-12);
        assert!((aggregate.compensation_cost.sample_variance - 2.0).abs() < 1e-12);
        assert!((aggregate.compensation_cost.lower - (3.0 - margin)).abs() < 1e-6);
        assert!((aggregate.compensation_cost.upper - (3.0 + margin)).abs() < 1e-6);
        assert_eq!(aggregate.peak_occupancy, 5);
        assert_eq!(aggregate.observations, 2);
    }

    #[test]
    fn total_cost_combines_both_cost_metrics() {
        let results = [
            observation(1.0, 10.0, 1),
            observation(2.0, 20.0, 1),
            observation(3.0, 30.0, 1),
        ];
        let aggregate = aggregate(&results, 0.9).unwrap();
        assert!((aggregate.total_cost.mean - 22.0).abs() < 1e-12);
        assert!(aggregate.total_cost.width() > aggregate.professional_cost.width());
    }

    #[test]
    fn doubling_observations_narrows_interval_by_root_two() {
        let normal = Normal::new(100.0, 15.0).unwrap();
        let mut rng = StdRng::seed_from_u64(8);
        let mut sample = |n: usize| -> Vec<ObservationResult> {
            (0..n)
                .map(|_| observation(normal.sample(&mut rng), 0.0, 0))
                .collect()
        };

        let small = aggregate(&sample(4_000), 0.95).unwrap();
        let large = aggregate(&sample(8_000), 0.95).unwrap();
        let ratio = large.compensation_cost.width() / small.compensation_cost.width();

        assert!(
            (ratio - std::f64::consts::FRAC_1_SQRT_2).abs() < 0.05,
            "width ratio {ratio}"
        );
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn interval_contains_mean_and_is_symmetric(
            costs in proptest::collection::vec(0.0_f64..1e6, 2..100),
            confidence in 0.5_f64..0.999,
        ) {
            let results: Vec<_> = costs.iter().map(|c| observation(*c, 0.0, 0)).collect();
            let interval = aggregate(&results, confidence).unwrap().compensation_cost;
            prop_assert!(interval.lower <= interval.mean);
            prop_assert!(interval.mean <= interval.upper);
            let tolerance = 1e-9 * interval.mean.abs().max(1.0);
            prop_assert!(((interval.mean - interval.lower) - (interval.upper - interval.mean)).abs() < tolerance);
        }
    }
}
