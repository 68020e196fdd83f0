use super::calendar_cell::CalendarCell;
use super::columns::activity as col;
use super::hier_id::HierarchicalId;
use super::row::Row;
use crate::core::calendar::ColumnKey;
use std::collections::BTreeMap;

/// Typed view over a reconciled `Activities` row.
#[derive(Debug, Clone)]
pub struct ActivityRow {
    pub order: i64,
    pub area: String,
    /// `None` when the stored id could not be parsed.
    pub id: Option<HierarchicalId>,
    pub raw_id: String,
    pub activity: String,
    pub frequency: String,
    pub files: String,
    pub last_updated: String,
    pub cells: BTreeMap<ColumnKey, CalendarCell>,
}

impl ActivityRow {
    pub fn from_row(row: &Row) -> Self {
        let cells = row
            .columns()
            .filter_map(|c| ColumnKey::parse(c).map(|k| (k, CalendarCell::normalize(&row.text(c)))))
            .collect();

        Self {
            order: row.order().unwrap_or_default(),
            area: row.text(col::AREA),
            id: HierarchicalId::from_columns(&row.text(col::MACRO_ID), &row.text(col::MICRO_ID)),
            raw_id: row.text(col::MACRO_ID),
            activity: row.text(col::ACTIVITY),
            frequency: row.text(col::FREQUENCY),
            files: row.text(col::FILES),
            last_updated: row.text(col::LAST_UPDATED),
            cells,
        }
    }

    pub fn cell(&self, key: &ColumnKey) -> CalendarCell {
        self.cells.get(key).copied().unwrap_or_default()
    }

    /// Group header rows carry no child number.
    pub fn is_group_header(&self) -> bool {
        matches!(self.id, Some(HierarchicalId { micro_id: None, .. }))
    }

    /// Display id, falling back to the raw text for unparseable ids.
    pub fn id_label(&self) -> String {
        match self.id {
            Some(id) => id.to_string(),
            None => self.raw_id.clone(),
        }
    }
}
