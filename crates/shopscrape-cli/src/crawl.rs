//! Command handlers: gather IDs, assemble records, hand them to the exporters.
//!
//! A product that fails to assemble still yields a (partly empty) record, so
//! the only hard failures here are the listing request and the case where
//! neither export could be written.

use std::io::Write;
use std::path::{Path, PathBuf};

use shopscrape_core::{AppConfig, ProductRecord};
use shopscrape_export::{print_record, write_json_file, write_workbook};
use shopscrape_scraper::{Endpoints, ShopClient};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CrawlOptions {
    pub limit: usize,
    pub json_out: PathBuf,
    pub xlsx_out: PathBuf,
    pub print: bool,
}

impl CrawlOptions {
    pub(crate) fn from_config(config: &AppConfig) -> Self {
        Self {
            limit: config.product_limit,
            json_out: config.json_out.clone(),
            xlsx_out: config.xlsx_out.clone(),
            print: false,
        }
    }
}

pub(crate) fn build_client(config: &AppConfig) -> anyhow::Result<ShopClient> {
    ShopClient::new(
        Endpoints::from(config),
        config.request_timeout_secs,
        &config.user_agent,
    )
    .map_err(|e| anyhow::anyhow!("failed to build shop client: {e}"))
}

/// Full pipeline: gather up to `options.limit` IDs, assemble each record in
/// listing order, then write the JSON dump and the spreadsheet.
///
/// # Errors
///
/// Returns an error if the client cannot be built, the listing fails, or
/// both exports fail.
pub(crate) async fn run_crawl(config: &AppConfig, options: &CrawlOptions) -> anyhow::Result<()> {
    let client = build_client(config)?;
    let ids = client
        .fetch_product_ids(options.limit, config.listing_page_size)
        .await?;
    tracing::info!(count = ids.len(), limit = options.limit, "gathered product IDs");

    let records = assemble_all(&client, &ids, options.print).await?;
    export_all(&records, &options.json_out, &options.xlsx_out)
}

/// Assembles one record per ID, in order, logging progress as it goes.
async fn assemble_all(
    client: &ShopClient,
    ids: &[String],
    print: bool,
) -> anyhow::Result<Vec<ProductRecord>> {
    let total = ids.len();
    let mut records = Vec::with_capacity(total);

    for (index, id) in ids.iter().enumerate() {
        tracing::info!(product_id = %id, "getting product {}/{}", index + 1, total);
        let record = client.fetch_record(id).await;
        if print {
            print_record(&mut std::io::stdout().lock(), &record)?;
        }
        records.push(record);
    }

    Ok(records)
}

/// Writes both exports. A failure in one is logged and does not stop the
/// other; only a double failure is returned.
///
/// # Errors
///
/// Returns an error naming both causes when neither file could be written.
pub(crate) fn export_all(
    records: &[ProductRecord],
    json_out: &Path,
    xlsx_out: &Path,
) -> anyhow::Result<()> {
    let json = write_json_file(json_out, records).inspect_err(|e| {
        tracing::error!(path = %json_out.display(), error = %e, "JSON export failed");
    });
    let xlsx = write_workbook(xlsx_out, records).inspect_err(|e| {
        tracing::error!(path = %xlsx_out.display(), error = %e, "spreadsheet export failed");
    });

    match (json, xlsx) {
        (Err(json_err), Err(xlsx_err)) => Err(anyhow::anyhow!(
            "both exports failed: JSON: {json_err}; spreadsheet: {xlsx_err}"
        )),
        _ => Ok(()),
    }
}

/// Prints up to `limit` product IDs, one per line.
///
/// # Errors
///
/// Returns an error if the client cannot be built or the listing fails.
pub(crate) async fn run_ids(config: &AppConfig, limit: usize) -> anyhow::Result<()> {
    let client = build_client(config)?;
    let ids = client
        .fetch_product_ids(limit, config.listing_page_size)
        .await?;

    let mut out = std::io::stdout().lock();
    write_ids(&mut out, &ids)?;
    Ok(())
}

fn write_ids<W: Write>(out: &mut W, ids: &[String]) -> std::io::Result<()> {
    for id in ids {
        writeln!(out, "{id}")?;
    }
    out.flush()
}

/// Assembles one product and prints it as pretty JSON.
///
/// # Errors
///
/// Returns an error if the client cannot be built or stdout is closed.
pub(crate) async fn run_product(config: &AppConfig, product_id: &str) -> anyhow::Result<()> {
    let client = build_client(config)?;
    let record = client.fetch_record(product_id).await;
    print_record(&mut std::io::stdout().lock(), &record)?;
    Ok(())
}

#[cfg(test)]
#[path = "crawl_test.rs"]
mod tests;
