use super::{ask_confirmation, report};
use crate::cli::parser::TaskAction;
use crate::config::Config;
use crate::core::aggregate::{progress_by_project, table_totals};
use crate::errors::{AppError, AppResult};
use crate::models::columns::task as col;
use crate::models::row::Row;
use crate::models::task::{Priority, TaskRow, TaskStatus};
use crate::store::TableStore;
use crate::sync::{FieldChanges, Mutation, RemoteSession, RowFilter, Session};
use crate::ui::messages::{info, warning};
use crate::utils::colors::{BOLD, RESET, colorize_percent};
use crate::utils::date;
use crate::utils::table::Table;

const LIST_HINT: &str = "rplanner tasks list";

pub fn handle(action: &TaskAction, cfg: &Config) -> AppResult<()> {
    let mut session = RemoteSession::connect(cfg)?;
    run(&mut session, &cfg.projects_table, action)
}

fn push_opt(changes: &mut FieldChanges, column: &str, value: &Option<String>) {
    if let Some(v) = value {
        changes.push((column.to_string(), v.clone()));
    }
}

fn checked_due(due: &Option<String>) -> AppResult<Option<String>> {
    match due {
        Some(s) if !s.trim().is_empty() => date::parse_date(s)
            .map(|d| Some(d.format("%Y-%m-%d").to_string()))
            .ok_or_else(|| AppError::InvalidDate(s.clone())),
        other => Ok(other.clone()),
    }
}

pub fn run<S: TableStore>(session: &mut Session<S>, table: &str, action: &TaskAction) -> AppResult<()> {
    match action {
        TaskAction::List { project } => {
            let rows = session.view(table)?;
            print_tasks(&rows, project.as_deref());
            Ok(())
        }

        TaskAction::Add {
            area,
            project,
            task,
            owner,
            status,
            priority,
            due,
        } => {
            let status = TaskStatus::from_user(status)?;
            let priority = Priority::from_user(priority)?;
            let mut changes: FieldChanges = vec![
                (col::AREA.into(), area.clone()),
                (col::PROJECT.into(), project.clone()),
                (col::TASK.into(), task.clone()),
                (col::PROGRESS.into(), status.as_str().into()),
                (col::PRIORITY.into(), priority.as_str().into()),
            ];
            push_opt(&mut changes, col::OWNER, owner);
            push_opt(&mut changes, col::DUE_DATE, &checked_due(due)?);

            let result = session.apply(table, &Mutation::Insert { changes });
            report(result, &format!("Task '{task}' added to '{project}'."), LIST_HINT)
        }

        TaskAction::Set {
            order,
            task,
            owner,
            status,
            priority,
            due,
            notes,
        } => {
            let mut changes = FieldChanges::new();
            push_opt(&mut changes, col::TASK, task);
            push_opt(&mut changes, col::OWNER, owner);
            if let Some(s) = status {
                changes.push((col::PROGRESS.into(), TaskStatus::from_user(s)?.as_str().into()));
            }
            if let Some(p) = priority {
                changes.push((col::PRIORITY.into(), Priority::from_user(p)?.as_str().into()));
            }
            push_opt(&mut changes, col::DUE_DATE, &checked_due(due)?);
            push_opt(&mut changes, col::NOTES, notes);

            if changes.is_empty() {
                info("Nothing to change.");
                return Ok(());
            }

            let result = session.apply(table, &Mutation::Update { key: *order, changes });
            report(result, &format!("Task #{order} updated."), LIST_HINT)
        }

        TaskAction::Del { order, yes } => {
            if !*yes && !ask_confirmation(&format!("Delete task #{order}? This cannot be undone.")) {
                info("Operation cancelled.");
                return Ok(());
            }
            let result = session.apply(table, &Mutation::Delete { key: *order });
            report(result, &format!("Task #{order} deleted."), LIST_HINT)
        }

        TaskAction::DelProject { project, yes } => {
            if !*yes
                && !ask_confirmation(&format!(
                    "Delete the project '{project}' and all its tasks? This cannot be undone."
                ))
            {
                info("Operation cancelled.");
                return Ok(());
            }
            let filter = RowFilter::eq(col::PROJECT, project.clone());
            let result = session.apply(table, &Mutation::DeleteWhere { filter });
            report(result, &format!("Project '{project}' deleted."), LIST_HINT)
        }

        TaskAction::RenameProject {
            project,
            new_name,
            area,
        } => {
            let mut changes = FieldChanges::new();
            push_opt(&mut changes, col::PROJECT, new_name);
            push_opt(&mut changes, col::AREA, area);
            if changes.is_empty() {
                warning("Nothing to change: pass --to and/or --area.");
                return Ok(());
            }
            let filter = RowFilter::eq(col::PROJECT, project.clone());
            let result = session.apply(table, &Mutation::UpdateWhere { filter, changes });
            report(result, &format!("Project '{project}' updated."), LIST_HINT)
        }
    }
}

fn print_tasks(rows: &[Row], only: Option<&str>) {
    if rows.is_empty() {
        info("No projects yet. Add one with `rplanner tasks add`.");
        return;
    }

    for p in progress_by_project(rows) {
        if only.is_some_and(|o| o != p.project) {
            continue;
        }

        println!(
            "{BOLD}📁 {} — {}{RESET}  ({}, {} task(s))",
            p.project,
            colorize_percent(Some(p.percent)),
            if p.area.is_empty() { "no area" } else { p.area.as_str() },
            p.tasks
        );

        let mut table = Table::with_headers(["#", "Task", "Owner", "Status", "Priority", "Due"]);
        for row in rows.iter().filter(|r| r.text(col::PROJECT) == p.project) {
            let t = TaskRow::from_row(row);
            table.add_row(vec![
                t.order.to_string(),
                t.task,
                if t.owner.is_empty() { "—".into() } else { t.owner },
                t.status.as_str().into(),
                t.priority.as_str().into(),
                t.due_date.unwrap_or_else(|| "—".into()),
            ]);
        }
        println!("{}", table.render());
    }

    let totals = table_totals(rows);
    println!("Total projects: {} | Total tasks: {}", totals.projects, totals.tasks);
}
