use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for rPlanner
#[derive(Parser)]
#[command(
    name = "rplanner",
    version = env!("CARGO_PKG_VERSION"),
    about = "Team projects planner: project tasks and monthly activities kept in a shared remote table store",
    long_about = None
)]
pub struct Cli {
    /// Override the remote store endpoint (base URL)
    #[arg(global = true, long = "endpoint")]
    pub endpoint: Option<String>,

    /// Enable debug diagnostics on stderr (RUST_LOG takes precedence)
    #[arg(global = true, long = "verbose", short = 'v')]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write the default configuration file
    Init,

    /// Show or check the configuration file
    Config {
        #[arg(long = "print", help = "Print the effective configuration")]
        print_config: bool,

        #[arg(long = "check", help = "Report keys missing from the configuration file")]
        check: bool,
    },

    /// Show the month columns of the activity calendar (offline)
    Calendar {
        #[arg(long = "today", help = "Reference date (YYYY-MM-DD), default: today")]
        today: Option<String>,

        #[arg(long = "all", help = "List every tracked column, not only the visible window")]
        all: bool,
    },

    /// Project tasks
    Tasks {
        #[command(subcommand)]
        action: TaskAction,
    },

    /// Monthly activities
    Activities {
        #[command(subcommand)]
        action: ActivityAction,
    },

    /// Completion per project and for a calendar month
    Progress {
        #[arg(long = "month", help = "Month (YYYY-MM) or its column name, default: current working month")]
        month: Option<String>,
    },

    /// Export a reconciled table snapshot
    Export {
        #[arg(long, help = "Table name (e.g. Projects, Activities)")]
        table: String,

        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long, short = 'f')]
        force: bool,
    },
}

#[derive(Subcommand)]
pub enum TaskAction {
    /// List tasks, grouped by project
    List {
        #[arg(long, help = "Only this project")]
        project: Option<String>,
    },

    /// Add a task (creates the project if it does not exist)
    Add {
        #[arg(long)]
        area: String,
        #[arg(long)]
        project: String,
        #[arg(long)]
        task: String,
        #[arg(long)]
        owner: Option<String>,
        #[arg(long, default_value = "Not started")]
        status: String,
        #[arg(long, default_value = "Low")]
        priority: String,
        #[arg(long, help = "Due date (YYYY-MM-DD)")]
        due: Option<String>,
    },

    /// Change fields of one task
    Set {
        /// Order key of the task (see `tasks list`)
        order: i64,
        #[arg(long)]
        task: Option<String>,
        #[arg(long)]
        owner: Option<String>,
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        priority: Option<String>,
        #[arg(long)]
        due: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },

    /// Delete one task
    Del {
        order: i64,
        #[arg(long, short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },

    /// Delete a whole project
    DelProject {
        project: String,
        #[arg(long, short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },

    /// Rename a project and/or move it to another area
    RenameProject {
        project: String,
        #[arg(long = "to")]
        new_name: Option<String>,
        #[arg(long)]
        area: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum ActivityAction {
    /// List activities with the visible month columns
    List {
        #[arg(long, help = "Show every tracked month")]
        all: bool,
    },

    /// Add an activity (new group, or last child of --group)
    Add {
        #[arg(long)]
        area: String,
        #[arg(long)]
        activity: String,
        #[arg(long, help = "Group number to add the activity under")]
        group: Option<u32>,
        #[arg(long, default_value = "Monthly")]
        frequency: String,
        #[arg(long, default_value = "")]
        files: String,
    },

    /// Set a month cell or edit fields of one activity
    Set {
        /// Order key of the activity (see `activities list`)
        order: i64,
        #[arg(long, help = "Cell value: done, not done, n/a, or empty to unset")]
        cell: Option<String>,
        #[arg(long, help = "Month (YYYY-MM) or its column name, default: current working month")]
        month: Option<String>,
        #[arg(long)]
        activity: Option<String>,
        #[arg(long)]
        frequency: Option<String>,
        #[arg(long)]
        files: Option<String>,
    },

    /// Delete one activity and renumber the rest
    Del {
        order: i64,
        #[arg(long, short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },
}
