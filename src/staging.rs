//! Atomic artifact writes.
//!
//! Artifacts are staged in a temp file beside the destination and renamed
//! into place, so readers never observe a half-written SVG or layout.
use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::Path;

pub fn write_staged_bytes(dest: &Path, bytes: &[u8]) -> Result<()> {
    let parent = match dest.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    let mut staged = tempfile::NamedTempFile::new_in(parent)
        .with_context(|| format!("stage temp file in {}", parent.display()))?;
    staged
        .write_all(bytes)
        .with_context(|| format!("write staged {}", dest.display()))?;
    staged
        .persist(dest)
        .map_err(|err| err.error)
        .with_context(|| format!("publish {}", dest.display()))?;
    Ok(())
}

pub fn write_staged_text(dest: &Path, text: &str) -> Result<()> {
    write_staged_bytes(dest, text.as_bytes())
}

pub fn write_staged_json<T: serde::Serialize>(dest: &Path, value: &T) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(value).context("serialize staged JSON")?;
    write_staged_bytes(dest, &bytes)
}
