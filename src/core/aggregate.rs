use crate::core::calendar::ColumnKey;
use crate::models::calendar_cell::CalendarCell;
use crate::models::columns::task;
use crate::models::row::Row;
use crate::models::task::TaskStatus;
use serde::Serialize;
use std::collections::{BTreeSet, HashSet};

/// Done cells over cells that count (everything but Excluded).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Ratio {
    pub done: usize,
    pub eligible: usize,
}

impl Ratio {
    /// Floored percentage; `None` means "no data", not zero.
    pub fn percent(&self) -> Option<u32> {
        (self.eligible > 0).then(|| (self.done * 100 / self.eligible) as u32)
    }
}

pub fn ratio(rows: &[Row], column: &ColumnKey) -> Ratio {
    let name = column.name();
    rows.iter()
        .map(|r| CalendarCell::normalize(&r.text(&name)))
        .fold(Ratio::default(), |mut acc, cell| {
            if !cell.is_excluded() {
                acc.eligible += 1;
            }
            if cell.is_done() {
                acc.done += 1;
            }
            acc
        })
}

/// Mean task completion (NotStarted 0, InProgress 0.5, Completed 1) as a
/// floored 0–100 percentage. `None` for an empty row-set.
pub fn task_progress(rows: &[Row]) -> Option<u32> {
    if rows.is_empty() {
        return None;
    }
    let halves: u64 = rows
        .iter()
        .map(|r| {
            TaskStatus::parse(&r.text(task::PROGRESS))
                .unwrap_or_default()
                .half_points()
        })
        .sum();
    Some((halves * 100 / (2 * rows.len() as u64)) as u32)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectProgress {
    pub project: String,
    pub area: String,
    pub tasks: usize,
    pub percent: u32,
}

/// Per-project completion, projects sorted by name.
/// The area shown is the one on the project's first row.
pub fn progress_by_project(rows: &[Row]) -> Vec<ProjectProgress> {
    let names: BTreeSet<String> = rows.iter().map(|r| r.text(task::PROJECT)).collect();

    names
        .into_iter()
        .map(|project| {
            let group: Vec<Row> = rows
                .iter()
                .filter(|r| r.text(task::PROJECT) == project)
                .cloned()
                .collect();
            ProjectProgress {
                area: group.first().map(|r| r.text(task::AREA)).unwrap_or_default(),
                tasks: group.len(),
                percent: task_progress(&group).unwrap_or(0),
                project,
            }
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Totals {
    pub projects: usize,
    pub tasks: usize,
}

pub fn table_totals(rows: &[Row]) -> Totals {
    let projects: HashSet<String> = rows.iter().map(|r| r.text(task::PROJECT)).collect();
    Totals {
        projects: projects.len(),
        tasks: rows.len(),
    }
}
