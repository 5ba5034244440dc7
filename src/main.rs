use clap::Parser;
use colored::Colorize;
use gate_assign::schedule::result::ScheduleOutcome;
use gate_assign::time::{Time, TimeWindow};
use gate_assign::{MicroLpEngine, Scenario, SolveStatus};
use std::path::PathBuf;
use tabled::settings::Style;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
struct Args {
    /// Path to the JSON scenario file
    #[arg(short, long, value_name = "FILE", default_value = "data/default.json")]
    scenario: PathBuf,

    /// Solver deadline in seconds, overriding the scenario policy
    #[arg(short, long, value_name = "SECS")]
    time_limit: Option<f64>,

    /// Start of the scheduling window, in minutes
    #[arg(long, value_name = "MIN", requires = "window_end")]
    window_start: Option<u64>,

    /// End of the scheduling window, in minutes
    #[arg(long, value_name = "MIN", requires = "window_start")]
    window_end: Option<u64>,

    /// Print the outcome as JSON instead of a table
    #[arg(long)]
    json: bool,
}

fn enable_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn print_outcome(outcome: &ScheduleOutcome) {
    if outcome.assignments.is_empty() {
        println!("No flights assigned.");
    } else {
        let mut table = tabled::Table::new(&outcome.assignments);
        table.with(Style::rounded());
        table.with(tabled::settings::Alignment::left());
        println!("{}", table);
    }

    let status = outcome.status.to_string();
    let status = match outcome.status {
        SolveStatus::Optimal => status.green(),
        SolveStatus::Feasible => status.yellow(),
        SolveStatus::Timeout => status.yellow().bold(),
        SolveStatus::Infeasible => status.red().bold(),
    };
    let m = &outcome.metrics;
    println!("\nStatus:                        {}", status);
    println!("Total flights assigned:        {}", m.total_assigned);
    println!("Unassigned flights:            {}", outcome.unassigned.len());
    println!("Total passengers accommodated: {}", m.total_passengers);
    println!("Terminal usage difference:     {}", m.terminal_usage_difference);
    println!("Gate usage difference:         {}", m.gate_usage_difference);
    println!("Airline preference violations: {}", m.preference_violations);
    println!("Total transit time:            {}", m.total_transit_minutes);
    for usage in &m.terminal_usage {
        println!("  Terminal {} usage: {}", usage.terminal, usage.flights);
    }
    for rejected in &outcome.rejected {
        println!("{} {}", "rejected:".red(), rejected);
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    enable_tracing();
    let args = Args::parse();

    let mut scenario = Scenario::load_from_file(&args.scenario.to_string_lossy())?;
    if let Some(secs) = args.time_limit {
        scenario.policy.time_limit_secs = secs;
    }
    let window = args
        .window_start
        .zip(args.window_end)
        .map(|(start, end)| TimeWindow::new(Time(start), Time(end)));

    let outcome = gate_assign::run(scenario, window, &MicroLpEngine)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        print_outcome(&outcome);
    }
    Ok(())
}
