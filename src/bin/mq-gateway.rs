use std::sync::Arc;

use clap::{Parser, Subcommand};
use reqwest::Client;
use tokio::io::BufReader;
use mq_gateway::cache::token_cache::TokenCache;
use mq_gateway::client::AuthenticatedClient;
use mq_gateway::server;
use mq_gateway::tools::{MqTools, ToolCall};
use mq_gateway::utils::config_loader;
use mq_gateway::utils::logging;
use anyhow::Result;
use mq_gateway::utils::logging::LogLevel;
use tracing::info;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, env = "CONFIG", default_value = "mq-gateway.yaml")]
    config: String,
    #[arg(long, env = "LOG_LEVEL" , value_enum)]
    log_level: Option<LogLevel>,
    /// Defaults to `serve`
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Read newline-delimited JSON tool calls from stdin, reply on stdout
    Serve,
    #[command(flatten)]
    Tool(ToolCall),
}

#[tokio::main]
async fn main() -> Result<()> {
    // -------------------------------
    // 1. Read args, load YAML config
    // -------------------------------

    let args = Args::parse();
    let gateway_config = config_loader::run(&args.config)?;
    logging::run(&gateway_config, args.log_level.to_owned());

    // -------------------------------
    // 2. Create request client and shared token cache
    // -------------------------------

    let backend = Arc::new(gateway_config.backend);
    let client = Client::builder().build()?;
    let tokens = TokenCache::new(backend.clone(), client.clone());
    let authenticated = AuthenticatedClient::with_parts(backend.clone(), client, tokens);

    info!(
        "gateway for {} ready, token lifetime {}s, refresh margin {}s",
        backend.base_url, backend.token_lifetime_seconds, backend.safety_margin_seconds
    );

    let tools = MqTools::new(authenticated);

    // -------------------------------
    // 3. Serve calls from stdin, or run a single tool and print its text
    // -------------------------------

    match args.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            let stdin = BufReader::new(tokio::io::stdin());
            server::server::serve(tools, stdin, tokio::io::stdout()).await?;
        }
        Command::Tool(call) => {
            let output = tools.call(&call).await;
            println!("{}", output);
        }
    }

    Ok(())
}
