use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use scanner::camera::{DEFAULT_DECODER, Decoder};
use scanner::client::ApiClient;
use scanner::decode::extract_identifier;
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Parser, Debug)]
#[command(version, about = "Scan member QR codes and mark attendance")]
struct Args {
    /// Base URL of the API server
    #[arg(long, env = "SCANNER_API_URL", default_value = "http://127.0.0.1:3000")]
    api_url: String,
    /// Member or admin account used to mark attendance
    #[arg(long, env = "SCANNER_EMAIL")]
    email: String,
    #[arg(long, env = "SCANNER_PASSWORD", hide_env_values = true)]
    password: String,
    /// Decoder command that prints one decoded QR payload per line
    #[arg(long, default_value = DEFAULT_DECODER)]
    decoder: String,
    /// Read decoded payloads from stdin instead of running the decoder
    #[arg(long)]
    stdin: bool,
    /// Keep scanning after each result
    #[arg(long)]
    continuous: bool,
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    common::logger::init_logger(&args.log_level, None).context("initialising logger")?;

    let client = ApiClient::new(&args.api_url)?;
    client.login(&args.email, &args.password).await?;

    if args.stdin {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Some(line) = lines.next_line().await.context("reading stdin")? {
            if line.trim().is_empty() {
                continue;
            }
            handle_scan(&client, &line).await?;
            if !args.continuous {
                break;
            }
        }
        return Ok(());
    }

    let decoder = Decoder::parse(&args.decoder)?;
    loop {
        println!("{}", "Waiting for a QR code...".dimmed());
        match decoder.capture().await {
            Ok(text) => handle_scan(&client, &text).await?,
            Err(e) => {
                eprintln!("{} {}", "Scanner Error:".red().bold(), e);
                return Err(e.into());
            }
        }
        if !args.continuous {
            return Ok(());
        }
    }
}

/// Submits one decoded payload and prints the outcome. Only transport failures
/// are returned as errors; a rejected scan is reported and scanning goes on.
async fn handle_scan(client: &ApiClient, decoded: &str) -> Result<()> {
    let identifier = match extract_identifier(decoded) {
        Ok(identifier) => identifier,
        Err(e) => {
            println!("{} {}", "Error:".red().bold(), e);
            return Ok(());
        }
    };

    let reply = client.mark(&identifier).await?;
    if !reply.success {
        log::warn!("Scan of {identifier} rejected with {}", reply.status);
        println!("{} {}", "Error:".red().bold(), reply.message);
        return Ok(());
    }

    let name = reply.data["user"]["name"].as_str().unwrap_or("unknown");
    println!("{} {} ({})", "Success:".green().bold(), reply.message, name);

    match client.today().await {
        Ok(summary) => println!(
            "Today {}: {}/{} present ({}%)",
            summary.date, summary.present, summary.total, summary.rate
        ),
        Err(e) => log::warn!("Could not refresh attendance summary: {e:#}"),
    }
    Ok(())
}
