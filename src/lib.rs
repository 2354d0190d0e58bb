pub mod agent;
pub mod models;
pub mod config;
pub mod llm;
pub mod cli;
pub mod history;
pub mod input;
pub mod error;

use agent::{ ChatAgent, SessionSummary, TurnOptions };
use cli::Args;
use config::ChatConfig;
use history::initialize_transcript_store;
use input::InputProvider;
use llm::chat::new_client;
use log::info;
use std::error::Error;
use std::io::Write;
use std::sync::Arc;

pub async fn run(
    args: Args,
    input: &mut dyn InputProvider,
    out: &mut dyn Write
) -> Result<SessionSummary, Box<dyn Error + Send + Sync>> {
    let config = ChatConfig::resolve(&args, input)?;
    config.log_summary();

    let client = new_client(&config.llm)?;
    let store = Arc::new(initialize_transcript_store(&config.transcript_path));
    let mut agent = ChatAgent::new(client, store, TurnOptions::from(&config));

    agent.welcome(out)?;
    let summary = agent.run(input, out).await?;
    info!(
        "Session finished: {} turns, {} failed requests, {} failed writes",
        summary.turns,
        summary.failed_requests,
        summary.failed_writes
    );
    Ok(summary)
}
