use crate::models::row::Row;

/// Column → new text, applied in order.
pub type FieldChanges = Vec<(String, String)>;

/// Rows whose columns equal all the given values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowFilter {
    conditions: Vec<(String, String)>,
}

impl RowFilter {
    pub fn eq(column: impl Into<String>, value: impl Into<String>) -> Self {
        Self::default().and(column, value)
    }

    pub fn and(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.conditions.push((column.into(), value.into()));
        self
    }

    pub fn matches(&self, row: &Row) -> bool {
        self.conditions.iter().all(|(c, v)| row.text(c) == *v)
    }
}

/// One logical change requested by the UI layer.
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    /// Change fields of the row with this order key, creating it if absent.
    Upsert { key: i64, changes: FieldChanges },
    /// Change fields of an existing row; fails if another session removed it.
    Update { key: i64, changes: FieldChanges },
    /// New row with a fresh order key (max + 1 after reload).
    Insert { changes: FieldChanges },
    Delete { key: i64 },
    DeleteWhere { filter: RowFilter },
    UpdateWhere { filter: RowFilter, changes: FieldChanges },
    /// Drop every row matching `filter`, then append `rows` as new rows.
    BulkReplace {
        filter: RowFilter,
        rows: Vec<FieldChanges>,
    },
    /// Write back only if reconciliation added columns (new calendar months).
    EnsureColumns,
}

impl Mutation {
    pub fn set(key: i64, column: impl Into<String>, value: impl Into<String>) -> Self {
        Mutation::Update {
            key,
            changes: vec![(column.into(), value.into())],
        }
    }

    /// Every field change carried by this mutation.
    pub fn changes(&self) -> Vec<&(String, String)> {
        match self {
            Mutation::Upsert { changes, .. }
            | Mutation::Update { changes, .. }
            | Mutation::Insert { changes }
            | Mutation::UpdateWhere { changes, .. } => changes.iter().collect(),
            Mutation::BulkReplace { rows, .. } => rows.iter().flatten().collect(),
            Mutation::Delete { .. } | Mutation::DeleteWhere { .. } | Mutation::EnsureColumns => Vec::new(),
        }
    }

    /// Adds or removes rows (always, or possibly for upserts).
    pub fn is_structural(&self) -> bool {
        !matches!(
            self,
            Mutation::Update { .. } | Mutation::UpdateWhere { .. } | Mutation::EnsureColumns
        )
    }
}

/// Result of a successful `apply`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyOutcome {
    pub table: String,
    /// Order keys of rows changed, created or removed.
    pub affected: Vec<i64>,
    /// False when there was nothing to write back.
    pub written: bool,
    /// Rows in the table after the write.
    pub row_count: usize,
}
