//! `switchyard chat`: Interactive query loop.

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use super::CommandResult;

pub async fn run() -> CommandResult {
    let config = super::load_config()?;
    let orchestrator = super::build_orchestrator(&config)?;

    println!();
    println!("  ╔══════════════════════════════════════════════╗");
    println!("  ║        Switchyard — Interactive Mode          ║");
    println!("  ╚══════════════════════════════════════════════╝");
    println!();
    println!("  Provider:  {}", config.default_provider);
    println!("  Model:     {}", config.default_model);
    println!("  Memory:    {} conversations", orchestrator.store().len().await);
    println!();
    println!("  Type your query and press Enter.");
    println!("  Type 'exit' or Ctrl+C to quit.");
    println!();

    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        stdout.write_all(b"  You > ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let query = line.trim();
        if query.is_empty() {
            continue;
        }
        if matches!(query, "exit" | "quit") {
            break;
        }

        eprint!("  ...");
        let outcome = orchestrator.process(query).await;
        eprint!("\r     \r");

        println!();
        println!("  [{}]", outcome.route);
        for line in outcome.final_output.lines() {
            println!("  Switchyard > {line}");
        }
        println!();
    }

    println!();
    println!("  Goodbye! 👋");
    println!();

    Ok(())
}
