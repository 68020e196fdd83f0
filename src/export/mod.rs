// src/export/mod.rs

mod csv;
mod fs_utils;
mod json;

use crate::errors::AppResult;
use crate::models::row::Row;
use crate::ui::messages::success;
use clap::ValueEnum;
use std::path::Path;

#[derive(Clone, Debug, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

/// Write a reconciled table snapshot to `path`.
pub fn export_rows(rows: &[Row], format: &ExportFormat, path: &Path, force: bool) -> AppResult<()> {
    fs_utils::ensure_writable(path, force)?;

    match format {
        ExportFormat::Csv => csv::write_csv(path, rows)?,
        ExportFormat::Json => json::write_json(path, rows)?,
    }

    success(format!(
        "{} export completed: {} ({} rows)",
        format.as_str().to_uppercase(),
        path.display(),
        rows.len()
    ));
    Ok(())
}
