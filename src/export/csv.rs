use crate::errors::AppResult;
use crate::models::row::Row;
use csv::Writer;
use std::path::Path;

/// Header is the union of all columns, first-seen order; missing cells are empty.
pub fn write_csv(path: &Path, rows: &[Row]) -> AppResult<()> {
    let mut columns: Vec<String> = Vec::new();
    for row in rows {
        for c in row.columns() {
            if !columns.contains(c) {
                columns.push(c.clone());
            }
        }
    }

    let mut wtr = Writer::from_path(path)?;
    wtr.write_record(&columns)?;
    for row in rows {
        wtr.write_record(columns.iter().map(|c| row.text(c)))?;
    }

    wtr.flush()?;
    Ok(())
}
