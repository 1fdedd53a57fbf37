//! Domain types and the snapshot diff engine for ghtrend.
//!
//! Nothing in this crate performs network or filesystem I/O. Snapshots come
//! in from the scraper or the store; [`compare`] turns a (current, previous)
//! pair into a [`Comparison`] for the report composer.

pub mod app_config;
pub mod config;
pub mod diff;
pub mod error;
pub mod model;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use diff::{compare, ClassifiedRepo, Comparison, RankChange, RISING_LIMIT};
pub use error::{ConfigError, CoreError};
pub use model::{parse_count, RepoRecord, Snapshot, Timeframe};
