use super::activities::month_key;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::aggregate::{progress_by_project, ratio, task_progress};
use crate::errors::AppResult;
use crate::store::TableStore;
use crate::sync::{RemoteSession, Session};
use crate::ui::messages::header;
use crate::utils::colors::colorize_percent;
use crate::utils::table::Table;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Progress { month } = cmd {
        let mut session = RemoteSession::connect(cfg)?;
        run(&mut session, cfg, month)?;
    }
    Ok(())
}

pub fn run<S: TableStore>(session: &mut Session<S>, cfg: &Config, month: &Option<String>) -> AppResult<()> {
    let today = session.writer().clock().today();
    let key = month_key(month, today)?;

    let tasks = session.view(&cfg.projects_table)?;
    header("Projects");
    let mut table = Table::with_headers(["Project", "Area", "Tasks", "Done %"]);
    for p in progress_by_project(&tasks) {
        table.add_row(vec![p.project, p.area, p.tasks.to_string(), format!("{}%", p.percent)]);
    }
    print!("{}", table.render());
    println!("\nOverall: {}\n", colorize_percent(task_progress(&tasks)));

    let activities = session.view(&cfg.activities_table)?;
    let r = ratio(&activities, &key);
    header(format!("Activities for {key}"));
    println!(
        "{} done of {} applicable ({} excluded): {}",
        r.done,
        r.eligible,
        activities.len() - r.eligible,
        colorize_percent(r.percent())
    );

    Ok(())
}
