use std::time::Instant;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod api;
mod models;
mod services;

use api::transaction_gateway::{SortOrder, TransactionGatewayClient, TransactionQuery};

const API_KEY_ENV: &str = "TRANSACTION_GATEWAY_API_KEY";

#[derive(Parser, Debug)]
#[command(name = "txgateway-desk")]
#[command(version)]
#[command(
    about = "Fetches all transaction pages for a customer and prints a risk-status summary",
    long_about = None
)]
struct Args {
    /// Gateway host, e.g. https://api.example.com
    url_base: String,

    /// Public identifier of the customer to fetch transactions for
    customer_public_id: String,

    /// A comma separated list of risk statuses to include in the response
    #[arg(long = "risk_statuses", default_value = "")]
    risk_statuses: String,

    /// Optional. Either OLDEST_FIRST or NEWEST_FIRST. If not supplied, it
    /// will not be declared in the API calls and you'll get default API sort
    /// order.
    #[arg(long = "sort_order")]
    sort_order: Option<SortOrder>,

    /// Gateway API key. Overrides the TRANSACTION_GATEWAY_API_KEY
    /// environment variable.
    #[arg(long = "api_key")]
    api_key: Option<String>,
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("txgateway_desk=info".parse().unwrap()),
        )
        .with_target(false)
        .init();

    let args = Args::parse();

    let api_key = match args
        .api_key
        .clone()
        .or_else(|| std::env::var(API_KEY_ENV).ok())
    {
        Some(key) => key,
        None => {
            error!("No API key supplied: pass --api_key or set {}", API_KEY_ENV);
            std::process::exit(2);
        }
    };

    info!("Starting");
    info!("--------");
    info!(
        "start time: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("customer_public_id: {}", args.customer_public_id);
    info!("risk_statuses: {}", args.risk_statuses);
    info!("sort_order: {:?}", args.sort_order);
    info!("url host: {}", args.url_base);

    let started = Instant::now();
    let client = TransactionGatewayClient::new(args.url_base.clone(), api_key);
    let query = TransactionQuery::new(
        args.customer_public_id.clone(),
        &args.risk_statuses,
        args.sort_order,
    );

    match services::collect_transaction_summary(&client, query).await {
        Ok(summary) => {
            println!();
            println!("{}", summary.render());
            println!();
            info!("risk statuses seen: {:?}", summary.risk_statuses_seen);
            info!("elapsed: {:.2?}", started.elapsed());
        }
        Err(e) => {
            error!("Failed to fetch transactions: {}", e);
            std::process::exit(1);
        }
    }
}
