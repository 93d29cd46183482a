//! End-to-end demo: one weather turn against a real model provider.
//!
//! Requires an API key (`STEPLINE_API_KEY` or `OPENAI_API_KEY`).
//! Activities are recorded in an in-memory store and printed at the end.
//!
//! Run with: `cargo run --example weather_session`

use std::sync::Arc;
use stepline_activities::InMemoryActivityStore;
use stepline_agent::AgentController;
use stepline_config::AppConfig;
use stepline_core::message::SessionId;
use stepline_providers::OpenAiCompatClient;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stepline_agent=debug,info".into()),
        )
        .init();

    let config = AppConfig::load()?;
    if config.api_key.is_none() {
        eprintln!("Set STEPLINE_API_KEY or OPENAI_API_KEY to run this example.");
        std::process::exit(1);
    }

    let model = Arc::new(OpenAiCompatClient::from_config(&config));
    let store = Arc::new(InMemoryActivityStore::new());
    let tools = Arc::new(stepline_tools::default_registry(&config.tools));

    let agent = AgentController::new(model, store.clone(), tools)
        .with_agent_config(&config.agent);

    let session = SessionId::from("weather-demo");
    let outcome = agent
        .handle_prompt(&session, "What's the weather in Paris?")
        .await?;

    println!("\nTurn ended after {} iteration(s): {:?}\n", outcome.iterations, outcome.end);
    println!("Recorded activities:");
    for record in store.all(&session).await {
        println!("  [{}] {:?}", record.created_at.format("%H:%M:%S"), record.content);
    }

    Ok(())
}
