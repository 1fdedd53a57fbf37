//! Fetcher for the GitHub trending page.
//!
//! [`TrendingClient`] downloads `https://github.com/trending?since=<timeframe>`
//! and [`parse_trending_html`] turns the page into ranked [`ghtrend_core::RepoRecord`]s.

pub mod client;
pub mod error;
pub mod parse;

mod parse_helpers;
mod rate_limit;

pub use client::TrendingClient;
pub use error::ScraperError;
pub use parse::parse_trending_html;
