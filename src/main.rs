use chatbot::cli::Args;
use chatbot::input;
use clap::Parser;
use dotenv::dotenv;
use std::error::Error;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let mut input = input::stdin();
    let mut out = std::io::stdout();
    chatbot::run(args, &mut input, &mut out).await?;

    Ok(())
}
