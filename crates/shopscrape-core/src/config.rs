use std::path::PathBuf;

use crate::app_config::AppConfig;
use crate::ConfigError;

pub const DEFAULT_HOST: &str = "https://shop.adidas.jp";
pub const DEFAULT_LISTING_URL: &str = "https://shop.adidas.jp/f/v1/pub/product/list";
pub const DEFAULT_SIZE_CHART_URL: &str = "https://shop.adidas.jp/f/v1/pub/size_chart";
pub const DEFAULT_REVIEWS_URL: &str = "https://adidasjp.ugc.bazaarvoice.com/7896-ja_jp";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_url = |var: &str, default: &str| -> Result<String, ConfigError> {
        let raw = or_default(var, default);
        let trimmed = raw.trim().trim_end_matches('/');
        if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
            return Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: format!("\"{raw}\" is not an http(s) URL"),
            });
        }
        Ok(trimmed.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let host = parse_url("SHOPSCRAPE_HOST", DEFAULT_HOST)?;
    let listing_url = parse_url("SHOPSCRAPE_LISTING_URL", DEFAULT_LISTING_URL)?;
    let size_chart_url = parse_url("SHOPSCRAPE_SIZE_CHART_URL", DEFAULT_SIZE_CHART_URL)?;
    let reviews_url = parse_url("SHOPSCRAPE_REVIEWS_URL", DEFAULT_REVIEWS_URL)?;

    let product_limit = parse_usize("SHOPSCRAPE_PRODUCT_LIMIT", "300")?;
    let listing_page_size = parse_u32("SHOPSCRAPE_LISTING_PAGE_SIZE", "120")?;
    if listing_page_size == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "SHOPSCRAPE_LISTING_PAGE_SIZE".to_string(),
            reason: "page size must be greater than zero".to_string(),
        });
    }
    let request_timeout_secs = parse_u64("SHOPSCRAPE_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("SHOPSCRAPE_USER_AGENT", "shopscrape/0.1 (product-catalog)");
    let log_level = or_default("SHOPSCRAPE_LOG_LEVEL", "info");
    let json_out = PathBuf::from(or_default("SHOPSCRAPE_JSON_OUT", "product.json"));
    let xlsx_out = PathBuf::from(or_default("SHOPSCRAPE_XLSX_OUT", "product.xlsx"));

    Ok(AppConfig {
        host,
        listing_url,
        size_chart_url,
        reviews_url,
        product_limit,
        listing_page_size,
        request_timeout_secs,
        user_agent,
        log_level,
        json_out,
        xlsx_out,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
