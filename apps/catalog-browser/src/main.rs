//! Catalog Browser
//!
//! Terminal front end for the catalog API: the searchable item list, the
//! item detail view and the stats summary.

use catalog_client::{DataContext, FetchError, ListView, Viewport, render_detail};
use clap::{Parser, Subcommand};
use core_config::Environment;
use core_config::tracing::{init_tracing, install_color_eyre};
use eyre::Result;
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Parser)]
#[command(name = "catalog-browser")]
#[command(about = "Browse the item catalog from the terminal")]
struct Cli {
    /// Base URL of the catalog API
    #[arg(long, env = "CATALOG_API_URL", default_value = "http://localhost:3001")]
    api_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show one page of the item list
    List {
        /// Case-insensitive name search
        #[arg(short, long, default_value = "")]
        q: String,

        /// Page to show, starting at 1
        #[arg(short, long, default_value_t = 1)]
        page: u64,

        /// Viewport height in pixels; rows outside it are not rendered
        #[arg(long, default_value_t = 600)]
        height: u32,

        /// Scroll position within the list, in pixels
        #[arg(long, default_value_t = 0)]
        scroll: u32,
    },

    /// Show a single item
    Show { id: u64 },

    /// Show catalog statistics
    Stats,
}

#[tokio::main]
async fn main() -> Result<()> {
    install_color_eyre();
    init_tracing(&Environment::from_env());

    let cli = Cli::parse();
    let context = Arc::new(DataContext::new(&cli.api_url)?);
    debug!(api_url = %context.base_url(), "Using catalog API");

    match cli.command {
        Commands::List {
            q,
            page,
            height,
            scroll,
        } => {
            let view = ListView::new(context);
            view.set_search(q).await?;

            while view.page().await < page {
                if !view.next_page().await? {
                    info!("Page {} is past the last page", page);
                    break;
                }
            }

            println!("{}", view.render(Viewport::new(height, scroll)).await);
        }

        Commands::Show { id } => match context.fetch_item(id).await {
            Ok(item) => println!("{}", render_detail(&item)),
            Err(FetchError::NotFound) => eyre::bail!("Item {} not found", id),
            Err(e) => return Err(e.into()),
        },

        Commands::Stats => {
            let stats = context.fetch_stats().await?;
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
    }

    Ok(())
}
