//! `switchyard routes`: Show how a query would be routed.
//!
//! Classification only; the backend is never called.

use switchyard_workflow::IntentClassifier;
use switchyard_workflow::orchestrator::after_router;

use super::CommandResult;

pub async fn run(query: &str) -> CommandResult {
    let config = super::load_config()?;
    let classifier = IntentClassifier::from_config(&config.routing)
        .map_err(|e| format!("Invalid routing patterns: {e}"))?;

    let classification = classifier.classify(query);

    println!("🔀 Routing for: \"{query}\"");
    println!("  Route:         {}", classification.route);
    if !classification.sub_routes.is_empty() {
        let subs: Vec<&str> = classification.sub_routes.iter().map(|i| i.as_str()).collect();
        println!("  Sub-routes:    {}", subs.join(", "));
    }
    println!(
        "  First handler: {}",
        after_router(classification.route, &classification.sub_routes)
    );

    Ok(())
}
