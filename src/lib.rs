pub mod aircraft;
pub mod error;
pub mod flight;
pub mod gate;
pub mod policy;
pub mod schedule;
pub mod time;
pub mod transit;

pub use error::Error;
pub use schedule::engine::{Engine, EngineOutcome, MicroLpEngine};
pub use schedule::result::{ScheduleOutcome, SolveStatus};
pub use schedule::{Problem, Scenario, run};
