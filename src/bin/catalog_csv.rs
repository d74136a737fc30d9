//! Catalog CSV Tool - headless catalog export
//!
//! Fetches the product list from the catalog service, runs it through the
//! same filter/sort pipeline as the GUI, and writes the result as CSV.

use anyhow::{Context, Result};
use catalog_toolkit::api::{CatalogClient, DEFAULT_BASE_URL};
use catalog_toolkit::export;
use catalog_toolkit::pipeline::{self, FilterCriteria, SortKey};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "catalog-csv")]
#[command(about = "Export the remote product catalog to a CSV file")]
struct Cli {
    /// Output CSV file (default: products_<date>.csv in the current directory)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Base URL of the catalog service
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Keep only products whose title contains this text (case-insensitive)
    #[arg(long)]
    search: Option<String>,

    /// Keep only products in this category id
    #[arg(long)]
    category: Option<u64>,

    /// Minimum price
    #[arg(long)]
    min_price: Option<f64>,

    /// Maximum price
    #[arg(long)]
    max_price: Option<f64>,

    /// Sort order: none, title, title-desc, price, price-desc
    #[arg(long, default_value = "none")]
    sort: SortKey,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let client = CatalogClient::with_base_url(&cli.base_url);
    let products = client
        .list_products()
        .await
        .context("Failed to fetch products")?;
    log::info!("fetched {} products from {}", products.len(), cli.base_url);

    let criteria = FilterCriteria {
        text: cli.search.unwrap_or_default(),
        category_id: cli.category,
        min_price: cli.min_price.unwrap_or(0.0),
        max_price: cli.max_price.unwrap_or(f64::INFINITY),
    };

    // One page spanning the whole filtered list.
    let view = pipeline::apply(&products, &criteria, cli.sort, 1, products.len().max(1));
    let bytes = export::export_csv(&view.visible)?;

    let output = cli.output.unwrap_or_else(|| {
        PathBuf::from(export::export_filename(chrono::Local::now().date_naive()))
    });
    std::fs::write(&output, bytes)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!("Wrote {} rows to {}", view.visible.len(), output.display());
    Ok(())
}
