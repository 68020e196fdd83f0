use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::calendar::{ColumnPhase, RollingCalendar, current_column};
use crate::errors::{AppError, AppResult};
use crate::ui::messages::header;
use crate::utils::date;
use crate::utils::table::Table;

/// Print the month columns around `--today` (no store access).
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Calendar { today, all } = cmd {
        let today = match today {
            Some(s) => date::parse_date(s).ok_or_else(|| AppError::InvalidDate(s.clone()))?,
            None => date::today(),
        };

        let calendar = RollingCalendar::new(cfg.calendar_start()?).with_window(cfg.past_months, cfg.future_months);
        let keys = if *all {
            calendar.all_columns(today, cfg.horizon_months)
        } else {
            calendar.visible_columns(today)
        };

        header(format!("Calendar columns for {today}"));

        let mut table = Table::with_headers(["Month", "Column", "Phase"]);
        for key in keys {
            table.add_row(vec![
                key.month().to_string(),
                key.name(),
                ColumnPhase::of(key, today).as_str().to_string(),
            ]);
        }
        print!("{}", table.render());
        println!("\nCurrent working column: {}", current_column(today));
    }

    Ok(())
}
