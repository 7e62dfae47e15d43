mod crawl;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::crawl::CrawlOptions;

#[derive(Debug, Parser)]
#[command(name = "shopscrape")]
#[command(about = "Scrape storefront product pages into a JSON dump and an xlsx workbook")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Gather product IDs, assemble every record, and export them
    Crawl {
        /// Number of products to gather (defaults to SHOPSCRAPE_PRODUCT_LIMIT)
        #[arg(long)]
        limit: Option<usize>,

        /// JSON dump path (defaults to SHOPSCRAPE_JSON_OUT)
        #[arg(long)]
        json_out: Option<PathBuf>,

        /// Spreadsheet path (defaults to SHOPSCRAPE_XLSX_OUT)
        #[arg(long)]
        xlsx_out: Option<PathBuf>,

        /// Also print each record to stdout as it is assembled
        #[arg(long)]
        print: bool,
    },
    /// Print gathered product IDs, one per line
    Ids {
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Assemble a single product record and print it as JSON
    Product { id: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = shopscrape_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Crawl {
            limit,
            json_out,
            xlsx_out,
            print,
        }) => {
            let options = CrawlOptions {
                limit: limit.unwrap_or(config.product_limit),
                json_out: json_out.unwrap_or_else(|| config.json_out.clone()),
                xlsx_out: xlsx_out.unwrap_or_else(|| config.xlsx_out.clone()),
                print,
            };
            crawl::run_crawl(&config, &options).await?;
        }
        Some(Commands::Ids { limit }) => {
            crawl::run_ids(&config, limit.unwrap_or(config.product_limit)).await?;
        }
        Some(Commands::Product { id }) => crawl::run_product(&config, &id).await?,
        None => {
            let options = CrawlOptions::from_config(&config);
            crawl::run_crawl(&config, &options).await?;
        }
    }

    Ok(())
}
