use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use ghtrend_core::{Snapshot, Timeframe};

use crate::error::StoreError;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Reads and writes snapshots under a single data directory.
///
/// Lookups never modify stored files. Snapshots are validated on both save
/// and load, so callers only ever see well-formed snapshots.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    data_dir: PathBuf,
}

impl SnapshotStore {
    #[must_use]
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    #[must_use]
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// `{data_dir}/{timeframe}-{YYYY-MM-DD}.json`
    #[must_use]
    pub fn path_for(&self, timeframe: Timeframe, date: NaiveDate) -> PathBuf {
        self.data_dir
            .join(format!("{timeframe}-{}.json", date.format(DATE_FORMAT)))
    }

    /// Writes `snapshot`, replacing any existing file for the same
    /// `(timeframe, date)`. The data directory is created if missing.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Invalid`] if the snapshot breaks its invariants,
    /// or [`StoreError::Io`] / [`StoreError::Encode`] if writing fails.
    pub fn save(&self, snapshot: &Snapshot) -> Result<PathBuf, StoreError> {
        snapshot.validate()?;

        fs::create_dir_all(&self.data_dir).map_err(|e| io_error(&self.data_dir, e))?;

        let path = self.path_for(snapshot.timeframe, snapshot.date);
        let body = serde_json::to_string_pretty(snapshot).map_err(|e| StoreError::Encode {
            path: path.display().to_string(),
            source: e,
        })?;

        // Write beside the target and rename so readers never see a partial file.
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, body).map_err(|e| io_error(&tmp, e))?;
        fs::rename(&tmp, &path).map_err(|e| io_error(&path, e))?;

        tracing::info!(
            timeframe = %snapshot.timeframe,
            date = %snapshot.date,
            count = snapshot.len(),
            path = %path.display(),
            "saved snapshot"
        );
        Ok(path)
    }

    /// Loads the snapshot stored for exactly `(timeframe, date)`.
    ///
    /// Returns `Ok(None)` when no such file exists.
    ///
    /// # Errors
    ///
    /// - [`StoreError::Io`] if the file exists but cannot be read.
    /// - [`StoreError::Parse`] if it is not valid snapshot JSON.
    /// - [`StoreError::Mismatch`] if its embedded timeframe or date disagree
    ///   with the file name.
    /// - [`StoreError::Invalid`] if the snapshot breaks its invariants.
    pub fn load(
        &self,
        timeframe: Timeframe,
        date: NaiveDate,
    ) -> Result<Option<Snapshot>, StoreError> {
        let path = self.path_for(timeframe, date);
        let body = match fs::read_to_string(&path) {
            Ok(body) => body,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(io_error(&path, e)),
        };

        let snapshot: Snapshot = serde_json::from_str(&body).map_err(|e| StoreError::Parse {
            path: path.display().to_string(),
            source: e,
        })?;

        if snapshot.timeframe != timeframe || snapshot.date != date {
            return Err(StoreError::Mismatch {
                path: path.display().to_string(),
                reason: format!(
                    "file contains {} snapshot for {}",
                    snapshot.timeframe, snapshot.date
                ),
            });
        }

        snapshot.validate()?;
        Ok(Some(snapshot))
    }

    /// Every date with a stored snapshot for `timeframe`, ascending.
    ///
    /// A missing data directory counts as empty. File names that do not match
    /// `{timeframe}-{YYYY-MM-DD}.json` are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the directory exists but cannot be read.
    pub fn list_dates(&self, timeframe: Timeframe) -> Result<Vec<NaiveDate>, StoreError> {
        let entries = match fs::read_dir(&self.data_dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(io_error(&self.data_dir, e)),
        };

        let mut dates = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| io_error(&self.data_dir, e))?;
            let file_name = entry.file_name();
            let Some(name) = file_name.to_str() else {
                continue;
            };
            if let Some(date) = date_from_file_name(name, timeframe) {
                dates.push(date);
            }
        }

        dates.sort_unstable();
        dates.dedup();
        Ok(dates)
    }

    /// Most recent stored date strictly before `date` for `timeframe`.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`Self::list_dates`].
    pub fn previous_date(
        &self,
        timeframe: Timeframe,
        date: NaiveDate,
    ) -> Result<Option<NaiveDate>, StoreError> {
        let dates = self.list_dates(timeframe)?;
        Ok(dates.into_iter().rev().find(|d| *d < date))
    }

    /// Snapshot for [`Self::previous_date`], if there is one.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`Self::previous_date`] and [`Self::load`].
    pub fn load_previous(
        &self,
        timeframe: Timeframe,
        date: NaiveDate,
    ) -> Result<Option<Snapshot>, StoreError> {
        match self.previous_date(timeframe, date)? {
            Some(previous) => self.load(timeframe, previous),
            None => Ok(None),
        }
    }
}

fn date_from_file_name(name: &str, timeframe: Timeframe) -> Option<NaiveDate> {
    let rest = name
        .strip_prefix(timeframe.as_str())?
        .strip_prefix('-')?
        .strip_suffix(".json")?;
    NaiveDate::parse_from_str(rest, DATE_FORMAT).ok()
}

fn io_error(path: &Path, source: std::io::Error) -> StoreError {
    StoreError::Io {
        path: path.display().to_string(),
        source,
    }
}
