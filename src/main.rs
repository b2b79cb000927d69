//! # Cobra Stock Console
//!
//! Starts the [`StockSystem`] from the environment and drives it from standard input.
//! See [`cobra_stock::lifecycle::config`] for the recognised variables.

use cobra_stock::console::{Controller, Flow, Reply};
use cobra_stock::lifecycle::{setup_tracing, StockConfig, StockSystem};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), String> {
    // Setup tracing once for the entire application
    setup_tracing();

    let config = StockConfig::from_env();
    info!(database_url = %config.gateway.database_url, "Starting stock console");

    let system = StockSystem::connect(&config)
        .await
        .map_err(|e| e.to_string())?;

    let mut console = Controller::new(system.stock_client.clone(), system.catalog.clone());
    print_lines(&console.render());
    prompt();

    let mut input = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = match input.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                error!(error = %e, "Could not read input");
                break;
            }
        };

        let reply = console.handle(&line).await;
        if reply.flow == Flow::Quit {
            break;
        }
        show(&reply);
        prompt();
    }

    // The controller's client clones must go before shutdown can drain the actor
    drop(console);
    system.shutdown().await.map_err(|e| e.to_string())?;

    info!("Goodbye");
    Ok(())
}

fn show(reply: &Reply) {
    print_lines(&reply.lines);
    if let Some(message) = &reply.notification {
        println!("» {message}");
    }
}

fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{line}");
    }
}

fn prompt() {
    use std::io::Write;
    print!("> ");
    let _ = std::io::stdout().flush();
}
