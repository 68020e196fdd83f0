use crate::models::columns::activity::{MACRO_ID, MICRO_ID};
use crate::models::hier_id::HierarchicalId;
use crate::models::row::Row;
use tracing::debug;

/// Re-derive dense `macro.micro` ids for the activity table.
///
/// Parseable rows are sorted by (macro, micro), group headers before their
/// children, then numbered from 1: groups in first-seen order, children
/// from 1 inside each group. Rows whose id cannot be parsed keep their
/// text and go to the end in their original order. The output is a fixed
/// point: renumbering it again changes nothing.
pub fn renumber(rows: Vec<Row>) -> Vec<Row> {
    let mut parsed: Vec<(HierarchicalId, Row)> = Vec::with_capacity(rows.len());
    let mut rest: Vec<Row> = Vec::new();

    for row in rows {
        match HierarchicalId::from_columns(&row.text(MACRO_ID), &row.text(MICRO_ID)) {
            Some(id) => parsed.push((id, row)),
            None => rest.push(row),
        }
    }

    // stable: equal ids keep their relative order
    parsed.sort_by_key(|(id, _)| (id.macro_id, id.micro_id));

    let mut out = Vec::with_capacity(parsed.len() + rest.len());
    let mut prev_macro: Option<u32> = None;
    let mut new_macro = 0u32;
    let mut new_micro = 0u32;

    for (id, mut row) in parsed {
        if prev_macro != Some(id.macro_id) {
            prev_macro = Some(id.macro_id);
            new_macro += 1;
            new_micro = 0;
        }

        let renumbered = match id.micro_id {
            Some(_) => {
                new_micro += 1;
                HierarchicalId::child(new_macro, new_micro)
            }
            None => HierarchicalId::group(new_macro),
        };

        row.set(MACRO_ID, renumbered.macro_text());
        row.set(MICRO_ID, renumbered.micro_text());
        out.push(row);
    }

    if !rest.is_empty() {
        debug!(count = rest.len(), "rows with unparseable ids left unnumbered");
    }
    debug!(groups = new_macro, "activity ids renumbered");

    out.extend(rest);
    out
}
