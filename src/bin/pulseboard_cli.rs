//! pulseboard-cli — 运维命令行：拉取热门列表、发起缓存的 AI 请求、计算请求指纹
//!
//! Usage:
//!   pulseboard-cli feed [--top <n>]            Compute (or read) the top feed
//!   pulseboard-cli ask <prompt>                Send a prompt through the response cache
//!   pulseboard-cli ask --messages <json>       Send a message sequence
//!   pulseboard-cli fingerprint <prompt>        Print the cache key for a prompt

use anyhow::{bail, Context};
use pulseboard::cache::RequestFingerprinter;
use pulseboard::{AiRequest, ServiceConfig, Services};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        print_usage();
        std::process::exit(1);
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("pulseboard=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match args[1].as_str() {
        "feed" => cmd_feed(&args[2..]).await,
        "ask" => cmd_ask(&args[2..]).await,
        "fingerprint" => cmd_fingerprint(&args[2..]),
        "version" | "--version" | "-V" => {
            println!("pulseboard-cli {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        other => {
            eprintln!("Unknown command: {other}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    println!(
        r#"pulseboard-cli — 热门列表与 AI 响应缓存工具

USAGE:
    pulseboard-cli <COMMAND> [OPTIONS]

COMMANDS:
    feed [--top <n>]            Compute the top feed and print it as JSON
    ask <prompt>                Answer a prompt through the response cache
    ask --messages <json>       Answer a JSON message sequence
    fingerprint <prompt>        Print the response-cache key for a prompt
    version                     Show version information
    help                        Show this help message

ENVIRONMENT:
    PULSEBOARD_DATA_URL         Data source base URL
    PULSEBOARD_DATA_KEY         Data source API key
    PULSEBOARD_INFERENCE_URL    Inference base URL
    PULSEBOARD_INFERENCE_TOKEN  Inference bearer token
    PULSEBOARD_MODEL            Inference model id
    RUST_LOG                    Log filter (default: pulseboard=info)"#
    );
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .map(String::as_str)
}

async fn cmd_feed(args: &[String]) -> anyhow::Result<()> {
    let top = match flag_value(args, "--top") {
        Some(raw) => Some(raw.parse::<usize>().context("--top expects a number")?),
        None => None,
    };
    let config = ServiceConfig::from_env()?;
    let services = Services::from_config(&config)?;

    let outcome = services.feed.top_feed().await?;
    let feed = match top {
        Some(n) => outcome.feed.top(n),
        None => outcome.feed,
    };
    println!("{}", serde_json::to_string_pretty(&feed)?);

    services.shutdown().await;
    Ok(())
}

fn parse_request(args: &[String]) -> anyhow::Result<AiRequest> {
    if let Some(raw) = flag_value(args, "--messages") {
        let body = format!(r#"{{"messages":{raw}}}"#);
        return Ok(AiRequest::from_slice(body.as_bytes())?);
    }
    if args.is_empty() {
        return Ok(AiRequest::default());
    }
    if args[0].starts_with("--") {
        bail!("unknown option {}", args[0]);
    }
    Ok(AiRequest::prompt(args.join(" ")))
}

async fn cmd_ask(args: &[String]) -> anyhow::Result<()> {
    let request = parse_request(args)?;
    let config = ServiceConfig::from_env()?;
    let services = Services::from_config(&config)?;

    let reply = services.ai.respond(&request).await?;
    eprintln!("fingerprint: {} (cached: {})", reply.fingerprint, reply.cached);
    println!("{}", reply.text);

    services.shutdown().await;
    Ok(())
}

fn cmd_fingerprint(args: &[String]) -> anyhow::Result<()> {
    let request = parse_request(args)?;
    let fingerprinter = RequestFingerprinter::new();
    let fp = fingerprinter.fingerprint(&request)?;
    println!("{}", fp.cache_key());
    Ok(())
}
