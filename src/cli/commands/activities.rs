use super::{ask_confirmation, report};
use crate::cli::parser::ActivityAction;
use crate::config::Config;
use crate::core::aggregate::ratio;
use crate::core::calendar::{ColumnKey, ColumnPhase, current_column, keys_in_rows};
use crate::errors::{AppError, AppResult};
use crate::models::activity::ActivityRow;
use crate::models::calendar_cell::CalendarCell;
use crate::models::columns::activity as col;
use crate::models::hier_id::HierarchicalId;
use crate::models::row::Row;
use crate::store::TableStore;
use crate::sync::{FieldChanges, Mutation, RemoteSession, Session};
use crate::ui::messages::{info, warning};
use crate::utils::colors::colorize_percent;
use crate::utils::table::Table;

const LIST_HINT: &str = "rplanner activities list";

pub fn handle(action: &ActivityAction, cfg: &Config) -> AppResult<()> {
    let mut session = RemoteSession::connect(cfg)?;
    run(&mut session, &cfg.activities_table, action)
}

/// Resolve `--month`, defaulting to the current working column.
pub(crate) fn month_key(month: &Option<String>, today: chrono::NaiveDate) -> AppResult<ColumnKey> {
    match month {
        Some(m) => ColumnKey::from_user(m).ok_or_else(|| {
            AppError::InvalidDate(format!("{m} (expected YYYY-MM or a month's last business day)"))
        }),
        None => Ok(current_column(today)),
    }
}

pub fn run<S: TableStore>(session: &mut Session<S>, table: &str, action: &ActivityAction) -> AppResult<()> {
    let today = session.writer().clock().today();

    match action {
        ActivityAction::List { all } => {
            // first render of a new month creates its column remotely
            let created = session.apply(table, &Mutation::EnsureColumns)?;
            if created.written {
                info("New month columns created.");
            }

            let rows = session.view(table)?;
            let keys: Vec<ColumnKey> = if *all {
                keys_in_rows(&rows).into_iter().collect()
            } else {
                session.writer().calendar().visible_columns(today)
            };
            print_activities(&rows, &keys, today);
            Ok(())
        }

        ActivityAction::Add {
            area,
            activity,
            group,
            frequency,
            files,
        } => {
            let id = match group {
                Some(g) => HierarchicalId::append_child(*g),
                None => HierarchicalId::append_group(),
            };
            let changes: FieldChanges = vec![
                (col::AREA.into(), area.clone()),
                (col::MACRO_ID.into(), id.macro_text()),
                (col::MICRO_ID.into(), id.micro_text()),
                (col::ACTIVITY.into(), activity.clone()),
                (col::FREQUENCY.into(), frequency.clone()),
                (col::FILES.into(), files.clone()),
            ];
            let result = session.apply(table, &Mutation::Insert { changes });
            report(result, &format!("Activity '{activity}' added."), LIST_HINT)
        }

        ActivityAction::Set {
            order,
            cell,
            month,
            activity,
            frequency,
            files,
        } => {
            let mut changes = FieldChanges::new();
            if let Some(raw) = cell {
                let key = month_key(month, today)?;
                if ColumnPhase::of(key, today) == ColumnPhase::Future {
                    warning(format!("{key} is a future month."));
                }
                let normalized = CalendarCell::normalize(raw);
                if normalized == CalendarCell::Unset && !raw.trim().is_empty() {
                    warning(format!("'{raw}' is not a known status, the cell will be cleared."));
                }
                changes.push((key.name(), normalized.as_str().into()));
            }
            for (column, value) in [
                (col::ACTIVITY, activity),
                (col::FREQUENCY, frequency),
                (col::FILES, files),
            ] {
                if let Some(v) = value {
                    changes.push((column.into(), v.clone()));
                }
            }

            if changes.is_empty() {
                info("Nothing to change.");
                return Ok(());
            }

            let result = session.apply(table, &Mutation::Update { key: *order, changes });
            report(result, &format!("Activity #{order} updated."), LIST_HINT)
        }

        ActivityAction::Del { order, yes } => {
            if !*yes && !ask_confirmation(&format!("Delete activity #{order}? Remaining ids are renumbered.")) {
                info("Operation cancelled.");
                return Ok(());
            }
            let result = session.apply(table, &Mutation::Delete { key: *order });
            report(result, &format!("Activity #{order} deleted."), LIST_HINT)
        }
    }
}

fn print_activities(rows: &[Row], keys: &[ColumnKey], today: chrono::NaiveDate) {
    if rows.is_empty() {
        info("No activities yet. Add one with `rplanner activities add`.");
        return;
    }

    let current = current_column(today);
    let mut headers = vec!["#".to_string(), "ID".into(), "Activity".into(), "Frequency".into()];
    headers.extend(keys.iter().map(|k| {
        if *k == current {
            format!("[{}]", k.month())
        } else {
            k.month().to_string()
        }
    }));

    let mut table = Table::with_headers(headers);
    for row in rows {
        let a = ActivityRow::from_row(row);
        let label = if a.is_group_header() {
            a.activity.clone()
        } else {
            format!("  {}", a.activity)
        };
        let mut line = vec![a.order.to_string(), a.id_label(), label, a.frequency.clone()];
        line.extend(keys.iter().map(|k| match a.cell(k) {
            CalendarCell::Unset => "·".to_string(),
            other => other.as_str().to_string(),
        }));
        table.add_row(line);
    }
    print!("{}", table.render());

    let r = ratio(rows, &current);
    println!(
        "\n{current}: {}/{} done ({})",
        r.done,
        r.eligible,
        colorize_percent(r.percent())
    );
}
