use crate::flight::Flight;
use crate::schedule::conflict::ConflictGraph;
use crate::schedule::tests::utils::{NINE, arb_flights, flight};
use proptest::prelude::*;

fn naive_pairs(flights: &[Flight]) -> Vec<(usize, usize)> {
    let mut pairs = vec![];
    for i in 0..flights.len() {
        for j in i + 1..flights.len() {
            if flights[i].scheduled_arrival < flights[j].scheduled_departure
                && flights[j].scheduled_arrival < flights[i].scheduled_departure
            {
                pairs.push((i, j));
            }
        }
    }
    pairs
}

#[test]
fn test_identical_windows_conflict() {
    let flights = vec![
        flight("A", "AI", "A320", NINE, NINE + 60, 100),
        flight("B", "AI", "A320", NINE, NINE + 60, 100),
    ];
    let graph = ConflictGraph::build(&flights);
    assert_eq!(&[(0, 1)], graph.pairs());
    assert!(graph.conflicts(1, 0));
}

#[test]
fn test_touching_windows_do_not_conflict() {
    let flights = vec![
        flight("A", "AI", "A320", NINE, NINE + 60, 100),
        flight("B", "AI", "A320", NINE + 60, NINE + 120, 100),
    ];
    assert!(ConflictGraph::build(&flights).is_empty());
}

#[test]
fn test_long_stay_conflicts_with_everything_inside() {
    let flights = vec![
        flight("LONG", "AI", "B777", NINE, NINE + 300, 300),
        flight("A", "AI", "A320", NINE + 10, NINE + 40, 100),
        flight("B", "AI", "A320", NINE + 50, NINE + 90, 100),
        flight("C", "AI", "A320", NINE + 310, NINE + 330, 100),
    ];
    let graph = ConflictGraph::build(&flights);
    assert_eq!(&[(0, 1), (0, 2)], graph.pairs());
    assert!(!graph.conflicts(1, 2));
    assert!(!graph.conflicts(0, 3));
}

#[test]
fn test_zero_length_stay_inside_another() {
    let flights = vec![
        flight("A", "AI", "A320", NINE, NINE + 60, 100),
        flight("B", "AI", "A320", NINE + 30, NINE + 30, 100),
        flight("C", "AI", "A320", NINE + 60, NINE + 60, 100),
    ];
    assert_eq!(&[(0, 1)], ConflictGraph::build(&flights).pairs());
}

proptest! {
    #[test]
    fn test_sweep_matches_all_pairs(flights in arb_flights(40)) {
        prop_assert_eq!(naive_pairs(&flights), ConflictGraph::build(&flights).pairs().to_vec());
    }
}
