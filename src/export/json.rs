use crate::errors::AppResult;
use crate::models::row::Row;
use std::path::Path;

/// Rows as a pretty-printed JSON array, same shape the store serves.
pub fn write_json(path: &Path, rows: &[Row]) -> AppResult<()> {
    let json = serde_json::to_string_pretty(rows)?;
    std::fs::write(path, json)?;
    Ok(())
}
