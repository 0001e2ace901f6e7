//! The flat JSON file that visits are appended to.

use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::Arc,
};

use serde::Serialize;
use serde_json::Value;
use tokio::sync::Mutex;

use crate::Error;

/// The number of entries kept in the visitor log, older entries are dropped first.
pub const MAX_VISITOR_LOG_ENTRIES: usize = 1000;

/// One page view.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct VisitorLogEntry {
    /// When the page was requested, in RFC 3339 format.
    pub timestamp: String,
    pub ip: String,
    pub user_agent: String,
    /// The path and query string of the page.
    pub url: String,
    pub country: String,
    pub city: String,
}

impl VisitorLogEntry {
    /// Read the page view fields out of a stored record.
    ///
    /// Records posted by clients may hold any JSON, so missing fields are left
    /// empty and non-string values are kept as their JSON text.
    pub fn from_record(record: &Value) -> Self {
        let field = |name: &str| match record.get(name) {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(text)) => text.clone(),
            Some(other) => other.to_string(),
        };

        Self {
            timestamp: field("timestamp"),
            ip: field("ip"),
            user_agent: field("userAgent"),
            url: field("url"),
            country: field("country"),
            city: field("city"),
        }
    }
}

/// A handle to the visitor log file.
///
/// The file holds a JSON array of records. Clones share a lock, so appends from
/// the same process never overwrite each other.
#[derive(Debug, Clone)]
pub struct VisitorLog {
    path: PathBuf,
    lock: Arc<Mutex<()>>,
}

impl VisitorLog {
    /// Create a handle for the log at `path`. The file is created on the first append.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Arc::new(Mutex::new(())),
        }
    }

    /// The location of the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Add `entry` to the end of the log. See [VisitorLog::append_record].
    ///
    /// # Errors
    ///
    /// Returns [Error::VisitorLogError] if the log could not be written.
    pub async fn append(&self, entry: VisitorLogEntry) -> Result<(), Error> {
        let record = serde_json::to_value(entry)
            .map_err(|error| Error::JSONSerializationError(error.to_string()))?;

        self.append_record(record).await
    }

    /// Add `record` to the end of the log as-is, keeping only the newest
    /// [MAX_VISITOR_LOG_ENTRIES] records.
    ///
    /// A missing or unreadable log is started afresh.
    ///
    /// # Errors
    ///
    /// Returns [Error::VisitorLogError] if the log could not be written.
    pub async fn append_record(&self, record: Value) -> Result<(), Error> {
        let _guard = self.lock.lock().await;

        let mut records = match self.read_from_file().await {
            Ok(records) => records.unwrap_or_default(),
            Err(error) => {
                tracing::debug!("Starting a new visitor log, could not read the old one: {error}");
                Vec::new()
            }
        };

        records.push(record);

        if records.len() > MAX_VISITOR_LOG_ENTRIES {
            let excess = records.len() - MAX_VISITOR_LOG_ENTRIES;
            records.drain(..excess);
        }

        self.write_to_file(&records).await
    }

    /// Every record in the log exactly as stored, oldest first, or `None` if
    /// nothing has been logged yet.
    ///
    /// # Errors
    ///
    /// Returns [Error::VisitorLogError] if the file exists but could not be
    /// read or does not contain a JSON array.
    pub async fn read_records(&self) -> Result<Option<Vec<Value>>, Error> {
        let _guard = self.lock.lock().await;
        self.read_from_file().await
    }

    /// Every entry in the log, oldest first, or `None` if nothing has been logged yet.
    ///
    /// # Errors
    ///
    /// See [VisitorLog::read_records].
    pub async fn read_all(&self) -> Result<Option<Vec<VisitorLogEntry>>, Error> {
        let records = self.read_records().await?;

        Ok(records.map(|records| records.iter().map(VisitorLogEntry::from_record).collect()))
    }

    /// Empty the log if it exists.
    ///
    /// # Errors
    ///
    /// Returns [Error::VisitorLogError] if the file could not be written.
    pub async fn clear(&self) -> Result<(), Error> {
        let _guard = self.lock.lock().await;

        if tokio::fs::try_exists(&self.path).await.unwrap_or(false) {
            self.write_to_file(&[]).await?;
        }

        Ok(())
    }

    async fn read_from_file(&self) -> Result<Option<Vec<Value>>, Error> {
        let text = match tokio::fs::read_to_string(&self.path).await {
            Ok(text) => text,
            Err(error) if error.kind() == ErrorKind::NotFound => return Ok(None),
            Err(error) => return Err(Error::VisitorLogError(error.to_string())),
        };

        serde_json::from_str(&text)
            .map(Some)
            .map_err(|error| Error::VisitorLogError(error.to_string()))
    }

    async fn write_to_file(&self, records: &[Value]) -> Result<(), Error> {
        let text = serde_json::to_string_pretty(records)
            .map_err(|error| Error::JSONSerializationError(error.to_string()))?;

        tokio::fs::write(&self.path, text)
            .await
            .map_err(|error| Error::VisitorLogError(error.to_string()))
    }
}
