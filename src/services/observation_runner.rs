use crate::domain::day::{DayOutcome, DayState};
use crate::domain::observation::ObservationResult;
use crate::domain::parameters::SimulationParameters;
use crate::services::day_simulation::simulate_day;
use crate::services::random_stream::DrawSource;

/// Runs `day_count` consecutive days from an empty network and returns the
/// accumulated costs and the peak number of packages present on any day.
pub fn run_observation<S: DrawSource + ?Sized>(
    day_count: usize,
    params: &SimulationParameters,
    stream: &mut S,
) -> ObservationResult {
    let mut total_compensation_cost = 0.0;
    let mut total_professional_cost = 0.0;
    let mut max_locker_occupancy = 0;
    let mut state = DayState::default();

    for _ in 0..day_count {
        let outcome = simulate_day(state, params, stream);

        total_compensation_cost += outcome.cost_compensation;
        total_professional_cost += outcome.cost_professional;

        max_locker_occupancy = max_locker_occupancy.max(packages_present(&outcome, state));

        state = outcome.next_state();
    }

    ObservationResult {
        total_compensation_cost,
        total_professional_cost,
        max_locker_occupancy,
    }
}

/// New arrivals plus everything still waiting from yesterday.
fn packages_present(outcome: &DayOutcome, state: DayState) -> u32 {
    outcome.new_packages().saturating_add(state.carried_packages())
}
