use crate::flight::Flight;
use crate::gate::Gate;
use crate::policy::Policy;
use crate::time::Time;
use tracing::debug;

/// Greedy first-fit schedule used as the fallback when the solver runs out of time.
///
/// Flights are taken in arrival order; each goes to the first admissible gate
/// that is free over its whole stay, trying gates of the airline's preferred
/// terminal first. Returns `None` when `require_full_coverage` is set and some
/// flight with admissible gates could not be placed.
pub fn first_fit(
    flights: &[Flight],
    gates: &[Gate],
    admissible: &[Vec<usize>],
    policy: &Policy,
) -> Option<Vec<Option<usize>>> {
    let mut busy: Vec<Vec<(Time, Time)>> = vec![vec![]; gates.len()];
    let mut order = (0..flights.len()).collect::<Vec<usize>>();
    order.sort_by_key(|f| (flights[*f].scheduled_arrival, flights[*f].scheduled_departure, *f));

    let mut gate_of = vec![None; flights.len()];
    for f in order {
        let flight = &flights[f];
        let preferred = policy.preferred_terminal(&flight.airline);
        let mut candidates = admissible[f].clone();
        // stable sort keeps gate order within each class
        candidates.sort_by_key(|g| preferred.map_or(false, |t| gates[*g].terminal_id != *t));

        let chosen = candidates.into_iter().find(|g| {
            busy[*g]
                .iter()
                .all(|stay| !Time::is_overlapping(stay, &flight.occupancy()))
        });
        match chosen {
            Some(g) => {
                busy[g].push(flight.occupancy());
                gate_of[f] = Some(g);
            }
            None if policy.require_full_coverage && !admissible[f].is_empty() => {
                debug!(flight = %flight.id, "first fit cannot place flight");
                return None;
            }
            None => {}
        }
    }
    Some(gate_of)
}
