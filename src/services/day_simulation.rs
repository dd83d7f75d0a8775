use crate::domain::day::{DayOutcome, DayState};
use crate::domain::parameters::{SelfCollectionCap, SimulationParameters};
use crate::services::random_stream::DrawSource;

/// Simulates one day of the network starting from `state`.
///
/// Professional delivery is priced off `state.leftover_home`: home packages
/// arriving today are delivered tomorrow unless a self-collector takes them.
pub fn simulate_day<S: DrawSource + ?Sized>(
    state: DayState,
    params: &SimulationParameters,
    stream: &mut S,
) -> DayOutcome {
    let network = params.network();

    let new_packages = stream.next_delivery_count();
    let (new_packages_home, new_packages_locker) =
        split_new_packages(new_packages, network.home_probability, stream);

    let locker_packages = state.locker_packages_with(new_packages_locker);
    let possible_pickups = count_successes(locker_packages, network.pickup_probability, stream);
    let not_delivered_locker = locker_packages - possible_pickups;

    let cap = match network.self_collection_cap {
        SelfCollectionCap::HomeBound => new_packages_home,
        SelfCollectionCap::Uncapped => u32::MAX,
    };
    let taken_by_self_collection = count_self_collections(
        possible_pickups,
        cap,
        params.self_collection_probability(),
        stream,
    );

    DayOutcome {
        new_packages_home,
        new_packages_locker,
        locker_packages,
        possible_pickups,
        not_delivered_locker,
        taken_by_self_collection,
        cost_professional: network.price_schedule.cost(state.leftover_home),
        cost_compensation: taken_by_self_collection as f64 * params.compensation(),
        next_day_locker_leftover: not_delivered_locker,
        next_day_home_leftover: new_packages_home.saturating_sub(taken_by_self_collection),
    }
}

fn split_new_packages<S: DrawSource + ?Sized>(
    new_packages: u32,
    home_probability: f64,
    stream: &mut S,
) -> (u32, u32) {
    let home = count_successes(new_packages, home_probability, stream);
    (home, new_packages - home)
}

fn count_successes<S: DrawSource + ?Sized>(trials: u32, probability: f64, stream: &mut S) -> u32 {
    (0..trials).filter(|_| stream.bernoulli(probability)).count() as u32
}

fn count_self_collections<S: DrawSource + ?Sized>(
    possible_pickups: u32,
    cap: u32,
    probability: f64,
    stream: &mut S,
) -> u32 {
    let mut taken = 0;
    for _ in 0..possible_pickups {
        if taken >= cap {
            break;
        }
        if stream.bernoulli(probability) {
            taken += 1;
        }
    }
    taken
}
