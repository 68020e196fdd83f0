mod common;
use common::{ACTIVITIES, PROJECTS, activity_row, find, setup_home, stored, task_row, writer};
use rplanner::cli::commands::{activities, progress, tasks};
use rplanner::cli::parser::{ActivityAction, TaskAction};
use rplanner::config::Config;
use rplanner::errors::AppError;
use rplanner::export::{ExportFormat, export_rows};
use rplanner::store::RemoteTableStore;
use rplanner::store::memory::MemoryTransport;
use rplanner::sync::Session;
use std::fs;
use std::path::Path;

fn session(mem: &MemoryTransport) -> Session<RemoteTableStore<MemoryTransport>> {
    Session::new(writer(mem), &Config::default())
}

fn add_task(project: &str, task: &str, status: &str) -> TaskAction {
    TaskAction::Add {
        area: "Ops".into(),
        project: project.into(),
        task: task.into(),
        owner: None,
        status: status.into(),
        priority: "Low".into(),
        due: None,
    }
}

#[test]
fn test_task_lifecycle() {
    let mem = MemoryTransport::new();
    let mut s = session(&mem);

    tasks::run(&mut s, PROJECTS, &add_task("Alpha", "Kickoff", "done")).expect("add");
    tasks::run(&mut s, PROJECTS, &add_task("Alpha", "Design", "Not started")).expect("add");

    let rows = stored(&mem, PROJECTS);
    assert_eq!(rows.len(), 2);
    assert_eq!(find(&rows, 1).text("Progress"), "Completed");
    assert_eq!(find(&rows, 2).text("Release Date"), "2026-10-17");

    tasks::run(
        &mut s,
        PROJECTS,
        &TaskAction::Set {
            order: 2,
            task: None,
            owner: Some("lee".into()),
            status: Some("wip".into()),
            priority: Some("high".into()),
            due: Some("2026-12-01".into()),
            notes: None,
        },
    )
    .expect("set");

    let rows = stored(&mem, PROJECTS);
    let design = find(&rows, 2);
    assert_eq!(design.text("Owner"), "lee");
    assert_eq!(design.text("Progress"), "In progress");
    assert_eq!(design.text("Priority"), "Urgent");
    assert_eq!(design.text("Due Date"), "2026-12-01");

    tasks::run(&mut s, PROJECTS, &TaskAction::List { project: None }).expect("list");
}

#[test]
fn test_task_add_rejects_bad_input_before_writing() {
    let mem = MemoryTransport::new();
    let mut s = session(&mem);

    let err = tasks::run(&mut s, PROJECTS, &add_task("Alpha", "x", "maybe")).expect_err("bad status");
    assert!(matches!(err, AppError::InvalidStatus(_)));

    let bad_due = TaskAction::Add {
        area: "Ops".into(),
        project: "Alpha".into(),
        task: "x".into(),
        owner: None,
        status: "Not started".into(),
        priority: "Low".into(),
        due: Some("next week".into()),
    };
    let err = tasks::run(&mut s, PROJECTS, &bad_due).expect_err("bad due date");
    assert!(matches!(err, AppError::InvalidDate(_)));

    assert_eq!(mem.calls().expect("calls").puts, 0);
}

#[test]
fn test_project_rename_and_delete() {
    let mem = MemoryTransport::new();
    mem.seed(
        PROJECTS,
        vec![
            task_row("1", "Alpha", "a", "Completed"),
            task_row("2", "Alpha", "b", "Completed"),
            task_row("3", "Beta", "c", "Not started"),
        ],
    )
    .expect("seed");
    let mut s = session(&mem);

    tasks::run(
        &mut s,
        PROJECTS,
        &TaskAction::RenameProject {
            project: "Alpha".into(),
            new_name: Some("Apollo".into()),
            area: Some("R&D".into()),
        },
    )
    .expect("rename");

    let rows = stored(&mem, PROJECTS);
    assert_eq!(find(&rows, 2).text("Project"), "Apollo");
    assert_eq!(find(&rows, 2).text("Area"), "R&D");

    tasks::run(
        &mut s,
        PROJECTS,
        &TaskAction::DelProject {
            project: "Apollo".into(),
            yes: true,
        },
    )
    .expect("delete project");

    let rows = stored(&mem, PROJECTS);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].text("Project"), "Beta");
}

#[test]
fn test_deleting_a_missing_task_reports_row_not_found() {
    let mem = MemoryTransport::new();
    mem.seed(PROJECTS, vec![task_row("1", "Alpha", "a", "Completed")])
        .expect("seed");
    let mut s = session(&mem);

    let err = tasks::run(&mut s, PROJECTS, &TaskAction::Del { order: 9, yes: true }).expect_err("missing");
    assert!(matches!(err, AppError::RowNotFound(9)));
    assert_eq!(stored(&mem, PROJECTS).len(), 1);
}

#[test]
fn test_activity_add_set_and_delete() {
    let mem = MemoryTransport::new();
    mem.seed(
        ACTIVITIES,
        vec![
            activity_row("1", "1", "", "Payroll"),
            activity_row("2", "1", "1.1", "Collect timesheets"),
            activity_row("3", "2", "", "Audit"),
        ],
    )
    .expect("seed");
    let mut s = session(&mem);

    activities::run(
        &mut s,
        ACTIVITIES,
        &ActivityAction::Add {
            area: "Finance".into(),
            activity: "Sign off".into(),
            group: Some(1),
            frequency: "Monthly".into(),
            files: String::new(),
        },
    )
    .expect("add child");

    let rows = stored(&mem, ACTIVITIES);
    assert_eq!(find(&rows, 4).text("Sub ID"), "1.2");

    activities::run(
        &mut s,
        ACTIVITIES,
        &ActivityAction::Set {
            order: 4,
            cell: Some("done".into()),
            month: None,
            activity: None,
            frequency: None,
            files: None,
        },
    )
    .expect("set current month");
    activities::run(
        &mut s,
        ACTIVITIES,
        &ActivityAction::Set {
            order: 3,
            cell: Some("n/a".into()),
            month: Some("2026-08-31".into()),
            activity: None,
            frequency: None,
            files: None,
        },
    )
    .expect("set past month");

    let rows = stored(&mem, ACTIVITIES);
    assert_eq!(find(&rows, 4).text("2026-09-30"), "🟢");
    assert_eq!(find(&rows, 3).text("2026-08-31"), "⚪");

    activities::run(&mut s, ACTIVITIES, &ActivityAction::Del { order: 1, yes: true }).expect("delete group header");

    let rows = stored(&mem, ACTIVITIES);
    assert_eq!(rows.len(), 3);
    assert_eq!(find(&rows, 2).text("ID"), "1");
    assert_eq!(find(&rows, 2).text("Sub ID"), "1.1");
    assert_eq!(find(&rows, 3).text("ID"), "2");

    activities::run(&mut s, ACTIVITIES, &ActivityAction::List { all: false }).expect("list");
}

#[test]
fn test_activity_list_creates_month_columns() {
    let mem = MemoryTransport::new();
    mem.seed(ACTIVITIES, vec![activity_row("1", "1", "", "Payroll")])
        .expect("seed");
    let mut s = session(&mem);

    activities::run(&mut s, ACTIVITIES, &ActivityAction::List { all: true }).expect("list");
    assert!(stored(&mem, ACTIVITIES)[0].contains("2026-10-30"));
}

#[test]
fn test_activity_set_rejects_unknown_month_column() {
    let mem = MemoryTransport::new();
    mem.seed(ACTIVITIES, vec![activity_row("1", "1", "", "Payroll")])
        .expect("seed");
    let mut s = session(&mem);

    let err = activities::run(
        &mut s,
        ACTIVITIES,
        &ActivityAction::Set {
            order: 1,
            cell: Some("done".into()),
            month: Some("September".into()),
            activity: None,
            frequency: None,
            files: None,
        },
    )
    .expect_err("bad month");
    assert!(matches!(err, AppError::InvalidDate(_)));
}

fn set_cell(order: i64, cell: &str, month: Option<&str>) -> ActivityAction {
    ActivityAction::Set {
        order,
        cell: Some(cell.into()),
        month: month.map(String::from),
        activity: None,
        frequency: None,
        files: None,
    }
}

#[test]
fn test_activity_set_rejects_mid_month_dates() {
    let mem = MemoryTransport::new();
    mem.seed(ACTIVITIES, vec![activity_row("1", "1", "", "Payroll")])
        .expect("seed");
    let mut s = session(&mem);

    let err = activities::run(&mut s, ACTIVITIES, &set_cell(1, "done", Some("2026-09-15")))
        .expect_err("not a month column");
    assert!(matches!(err, AppError::InvalidDate(_)));
    assert_eq!(mem.calls().expect("calls").puts, 0);
    assert!(!stored(&mem, ACTIVITIES)[0].contains("2026-09-15"));
}

#[test]
fn test_activity_set_accepts_year_month() {
    let mem = MemoryTransport::new();
    mem.seed(ACTIVITIES, vec![activity_row("1", "1", "", "Payroll")])
        .expect("seed");
    let mut s = session(&mem);

    activities::run(&mut s, ACTIVITIES, &set_cell(1, "done", Some("2026-08"))).expect("set");

    let rows = stored(&mem, ACTIVITIES);
    assert_eq!(find(&rows, 1).text("2026-08-31"), "🟢");
}

#[test]
fn test_activity_cell_not_done_is_stored_red() {
    let mem = MemoryTransport::new();
    mem.seed(ACTIVITIES, vec![activity_row("1", "1", "", "Payroll")])
        .expect("seed");
    let mut s = session(&mem);

    activities::run(&mut s, ACTIVITIES, &set_cell(1, "done", None)).expect("done");
    activities::run(&mut s, ACTIVITIES, &set_cell(1, "not done", None)).expect("not done");

    let rows = stored(&mem, ACTIVITIES);
    assert_eq!(find(&rows, 1).text("2026-09-30"), "🔴");
}

#[test]
fn test_progress_reads_both_tables() {
    let mem = MemoryTransport::new();
    mem.seed(PROJECTS, vec![task_row("1", "Alpha", "a", "Completed")])
        .expect("seed");
    mem.seed(ACTIVITIES, vec![activity_row("1", "1", "", "Payroll")])
        .expect("seed");
    let mut s = session(&mem);

    progress::run(&mut s, &Config::default(), &None).expect("progress");
    assert_eq!(mem.calls().expect("calls").puts, 0);
}

#[test]
fn test_export_csv_and_json() {
    let home = setup_home("export_snapshot");
    let mem = MemoryTransport::new();
    mem.seed(
        PROJECTS,
        vec![
            task_row("1", "Alpha", "a", "Completed"),
            task_row("2", "Beta", "b", "In progress"),
        ],
    )
    .expect("seed");
    let rows = writer(&mem).load(PROJECTS).expect("load");

    let csv_path = Path::new(&home).join("projects.csv");
    export_rows(&rows, &ExportFormat::Csv, &csv_path, false).expect("csv export");
    let csv = fs::read_to_string(&csv_path).expect("read csv");
    let header = csv.lines().next().expect("header line");
    assert!(header.starts_with("Area,Project,Task"));
    assert!(header.contains("Order"));
    assert_eq!(csv.lines().count(), 3);

    let json_path = Path::new(&home).join("projects.json");
    export_rows(&rows, &ExportFormat::Json, &json_path, false).expect("json export");
    let parsed: serde_json::Value = serde_json::from_str(&fs::read_to_string(&json_path).expect("read json")).expect("valid json");
    assert_eq!(parsed.as_array().map(|a| a.len()), Some(2));
    assert_eq!(parsed[1]["Progress"], "In progress");

    // existing file: only overwritten with force
    export_rows(&rows, &ExportFormat::Json, &json_path, true).expect("forced export");
}
