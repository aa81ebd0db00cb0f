// src/storage/reports.rs
use chrono::Utc;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

use crate::report::Report;

/// Writes battle reports as plain text under
/// `<root>/<YYYY-MM-DD>/<server-label>/<MapNameNoSpaces>/<unix-ts>.report`.
/// Directories are created on every write; an existing tree is not an
/// error.
pub struct ReportStore {
    root: PathBuf,
    server_label: String,
}

impl ReportStore {
    pub fn new(root: impl Into<PathBuf>, server_label: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            server_label: server_label.into(),
        }
    }

    /// Today's report directory for this server (UTC date).
    pub fn day_root(&self) -> PathBuf {
        let today = Utc::now().format("%Y-%m-%d").to_string();
        self.root.join(today).join(&self.server_label)
    }

    pub fn write(&self, map_name: &str, report: &Report) -> std::io::Result<PathBuf> {
        let dir = self.day_root().join(map_name.replace(' ', ""));
        fs::create_dir_all(&dir)?;

        let path = dir.join(format!("{}.report", Utc::now().timestamp()));
        let mut file = fs::File::create(&path)?;
        for line in report.header.iter().chain(report.body.iter()) {
            writeln!(file, "{}", line)?;
        }
        Ok(path)
    }
}
