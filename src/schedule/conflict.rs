use crate::flight::Flight;
use tracing::debug;

/// Unordered pairs `(i, j)`, `i < j`, of flights whose occupancy windows overlap.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConflictGraph {
    pairs: Vec<(usize, usize)>,
}

impl ConflictGraph {
    /// Sweep over flights in arrival order, keeping only the stays still open at
    /// the current arrival. Only overlapping pairs are ever materialised.
    pub fn build(flights: &[Flight]) -> Self {
        let mut order = (0..flights.len()).collect::<Vec<usize>>();
        order.sort_by_key(|i| (flights[*i].scheduled_arrival, flights[*i].scheduled_departure, *i));

        let mut open: Vec<usize> = vec![];
        let mut pairs = vec![];
        for i in order {
            let current = &flights[i];
            // later flights arrive no earlier, so a closed stay can never overlap again
            open.retain(|o| flights[*o].scheduled_departure > current.scheduled_arrival);
            pairs.extend(
                open.iter()
                    .filter(|o| flights[**o].overlaps(current))
                    .map(|o| (i.min(*o), i.max(*o))),
            );
            open.push(i);
        }
        pairs.sort_unstable();
        debug!(flights = flights.len(), pairs = pairs.len(), "conflict graph built");
        ConflictGraph { pairs }
    }

    pub fn pairs(&self) -> &[(usize, usize)] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn conflicts(&self, a: usize, b: usize) -> bool {
        self.pairs.binary_search(&(a.min(b), a.max(b))).is_ok()
    }
}
