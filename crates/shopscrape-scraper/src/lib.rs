pub mod assemble;
pub mod client;
pub mod embedded;
pub mod error;
pub mod reviews;
pub mod selectors;
pub mod size_chart;
pub mod types;

pub use client::{Endpoints, ShopClient};
pub use error::ScraperError;
