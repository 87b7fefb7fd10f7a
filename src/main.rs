//! Library lookup binary entry point.
//!
//! Looks up one identifier and prints the sanitized record. Logs go to
//! stderr; stdout carries only the result.

use std::process::ExitCode;

use clap::Parser;
use library_lookup::config::Config;
use library_lookup::library::LibraryClient;

/// Query the library lookup service and print a masked record.
#[derive(Parser, Debug)]
#[command(name = "library-lookup", version)]
#[command(about = "Look up records for a phone number, name or other identifier")]
struct Args {
    /// Identifier to look up
    identifier: String,

    /// Print the sanitized record as JSON instead of display lines
    #[arg(long)]
    json: bool,

    /// Show phone and ID numbers unmasked
    #[arg(long)]
    no_desensitize: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let mut config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            return ExitCode::from(1);
        }
    };
    if args.no_desensitize {
        config.desensitize = false;
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            config
                .log_level
                .parse()
                .unwrap_or_else(|_| tracing_subscriber::filter::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    tracing::debug!(
        base_url = %config.base_url,
        desensitize = config.desensitize,
        "Configuration loaded"
    );

    let client = match LibraryClient::new(config.client_config()) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!("Client error: {e}");
            return ExitCode::from(1);
        }
    };

    let record = client.fetch(&args.identifier).await;
    let code = match record {
        None => {
            println!("未查询到数据");
            ExitCode::from(2)
        }
        Some(record) if args.json => match serde_json::to_string_pretty(&record) {
            Ok(json) => {
                println!("{json}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                tracing::error!("Serialization error: {e}");
                ExitCode::from(1)
            }
        },
        Some(record) => {
            for line in client.format_display(&record) {
                println!("{line}");
            }
            ExitCode::SUCCESS
        }
    };

    client.close();
    code
}
