use serde::{Deserialize, Serialize};

/// Minutes since the start of the scenario epoch.
#[derive(Debug, Clone, Copy, Ord, Eq, PartialEq, Hash, Serialize, Deserialize, PartialOrd)]
#[serde(transparent)]
pub struct Time(pub u64);

impl Time {
    /// Half-open overlap: `[a.0, a.1)` and `[b.0, b.1)` share at least one instant.
    pub fn is_overlapping(a: &(Time, Time), b: &(Time, Time)) -> bool {
        a.0 < b.1 && b.0 < a.1
    }
}

/// Inclusive scheduling window a run is restricted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: Time,
    pub end: Time,
}

impl TimeWindow {
    pub fn new(start: Time, end: Time) -> Self {
        TimeWindow { start, end }
    }

    fn contains(&self, t: Time) -> bool {
        self.start <= t && t <= self.end
    }

    /// A stay belongs to the window if either end falls inside it or it spans the whole window.
    pub fn touches(&self, arrival: Time, departure: Time) -> bool {
        self.contains(arrival)
            || self.contains(departure)
            || (arrival <= self.start && departure >= self.end)
    }
}

impl std::fmt::Display for Time {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let days = self.0 / 1440;
        let remaining = self.0 % 1440;
        let hours = remaining / 60;
        let mins = remaining % 60;
        write!(f, "DAY{} {:02}:{:02}", days + 1, hours, mins)
    }
}
