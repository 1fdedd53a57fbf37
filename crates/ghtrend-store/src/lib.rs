//! File-backed snapshot persistence.
//!
//! One pretty-printed JSON file per `(timeframe, date)` under a data
//! directory supplied at construction:
//!
//! ```text
//! data/
//!   daily-2025-06-01.json
//!   daily-2025-06-02.json
//!   weekly-2025-06-01.json
//! ```

mod error;
mod snapshots;

pub use error::StoreError;
pub use snapshots::SnapshotStore;
