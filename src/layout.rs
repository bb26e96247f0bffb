//! Layout record shared with the companion game page.
use crate::board::{ClassifiedGrid, LabelRow};
use crate::staging::write_staged_json;
use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize, Serializer};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutRecord {
    pub layout: Vec<LabelRow>,
    #[serde(serialize_with = "serialize_utc")]
    pub last_updated: DateTime<Utc>,
}

impl LayoutRecord {
    pub fn new(board: &ClassifiedGrid, now: DateTime<Utc>) -> Self {
        Self {
            layout: board.rows().to_vec(),
            last_updated: now,
        }
    }

    pub fn board(&self) -> ClassifiedGrid {
        ClassifiedGrid::from_rows(self.layout.clone())
    }
}

fn serialize_utc<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Secs, true))
}

/// Overwrite the layout record at `path`.
pub fn write_layout(path: &Path, record: &LayoutRecord) -> Result<()> {
    write_staged_json(path, record).with_context(|| format!("persist layout {}", path.display()))
}

pub fn read_layout(path: &Path) -> Result<LayoutRecord> {
    let bytes = std::fs::read(path).with_context(|| format!("read layout {}", path.display()))?;
    let record: LayoutRecord = serde_json::from_slice(&bytes)
        .with_context(|| format!("parse layout {}", path.display()))?;
    if record.layout.is_empty() {
        return Err(anyhow!("layout {} has no weeks", path.display()));
    }
    Ok(record)
}
