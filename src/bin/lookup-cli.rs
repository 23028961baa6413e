use clap::{Parser, Subcommand};
use keyword_lookup_sdk::{ClientError, LookupClient, LookupRequest};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "lookup-cli")]
#[command(about = "Command-line client for the keyword lookup proxy", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:3000")]
    url: String,

    /// API key, when the proxy's bearer gate is enabled.
    #[arg(short, long)]
    key: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the proxy's status and endpoints
    Status,
    /// Check proxy liveness
    Health,
    /// Look up ranked keywords for a domain
    Lookup {
        domain: String,
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        language: Option<String>,
        #[arg(long)]
        limit: Option<i64>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let mut client = LookupClient::new(&cli.url);
    if let Some(key) = cli.key {
        client = client.with_api_key(key);
    }

    let result = match cli.command {
        Commands::Status => client.status().await,
        Commands::Health => client.health().await,
        Commands::Lookup { domain, location, language, limit } => {
            let request = LookupRequest { domain, location, language, limit };
            client.ranked_keywords(&request).await
        }
    };

    print_response(result)
}

fn print_response(result: Result<Value, ClientError>) -> Result<(), Box<dyn std::error::Error>> {
    match result {
        Ok(json) => {
            println!("{}", serde_json::to_string_pretty(&json)?);
            Ok(())
        }
        Err(ClientError::Status { status, body }) => {
            eprintln!("Error: proxy returned status {}", status);
            eprintln!("Response: {}", serde_json::to_string_pretty(&body)?);
            std::process::exit(1);
        }
        Err(e) => Err(e.into()),
    }
}
