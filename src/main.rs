use anyhow::{Context, Result};
use clap::Parser;
use quick_answer::{
    answer::AnswerRequester, config::Config, http::HttpState, normalize::Normalizer,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Ask a question, see it normalized, get an answer from the model
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the TOML config file (overrides QUICK_ANSWER_CONFIG)
    #[arg(long)]
    config: Option<String>,

    /// Interface to listen on
    #[arg(long)]
    host: Option<std::net::IpAddr>,

    /// Port to listen on
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Env files first so RUST_LOG from them reaches the subscriber
    Config::load_env_files();
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("quick_answer=info,tower_http=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut config = match &args.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("Failed to load configuration")?;
    if let Some(host) = args.host {
        config.server.bind.set_ip(host);
    }
    if let Some(port) = args.port {
        config.server.bind.set_port(port);
    }

    // The normalizer is mandatory; the model client is not.
    let normalizer = Normalizer::new().context("Failed to provision word tokenizer")?;
    info!("Word tokenizer ready");
    let requester = AnswerRequester::from_config(&config);

    let state = HttpState::new(config, normalizer, requester);
    quick_answer::http::start_http_server(state).await?;

    Ok(())
}
