//! `switchyard ask`: Route a single query.

use switchyard_core::Error;
use switchyard_workflow::QueryOutcome;

use super::CommandResult;

pub async fn run(query: &str, json: bool) -> CommandResult {
    let config = super::load_config()?;
    let orchestrator = super::build_orchestrator(&config)?;

    eprint!("  Thinking...");
    let outcome = orchestrator.process(query).await;
    eprint!("\r              \r");

    if json {
        let rendered = serde_json::to_string_pretty(&outcome).map_err(Error::from)?;
        println!("{rendered}");
    } else {
        print_outcome(&outcome);
    }

    Ok(())
}

pub fn print_outcome(outcome: &QueryOutcome) {
    if outcome.sub_routes.is_empty() {
        println!("🔀 Route: {}", outcome.route);
    } else {
        let subs: Vec<&str> = outcome.sub_routes.iter().map(|i| i.as_str()).collect();
        println!("🔀 Route: {} ({})", outcome.route, subs.join(" → "));
    }
    println!("{}", "-".repeat(60));
    println!("{}", outcome.final_output);
    println!();
}
