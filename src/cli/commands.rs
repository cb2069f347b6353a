use clap::{Parser, Subcommand};

const VERSION: &str = env!("REELTRACK_VERSION");

#[derive(Parser)]
#[command(
    name = "reeltrack",
    version = VERSION,
    about = "Project tracker for video production workflows",
    after_help = "\
NOTE:
  Data lives in <root>/.reeltrack/ (reeltrack.db, config.json).
  <root> is $REELTRACK_HOME, or the nearest parent directory holding .reeltrack/.
  Run `reeltrack init` before any other command.

EXIT CODES:
  0  Success
  1  Error (DB, validation, unknown reference, etc.)

WORKFLOW RULES:
  New projects copy the current workflow template; later template edits do not touch them.
  Any step status can change to any other.
  Completing a step moves the next step to in-progress if it is still pending (one level only).
  Progress = completed steps / all steps, rounded to a whole percent."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize reeltrack in this directory
    Init {
        /// Do not seed the default video-production workflow
        #[arg(long)]
        empty: bool,
    },

    /// Project management
    #[command(subcommand)]
    Project(ProjectCommands),

    /// Edit the steps of a project
    #[command(subcommand)]
    Step(StepCommands),

    /// Workflow template used for new projects
    #[command(subcommand)]
    Template(TemplateCommands),

    /// Team roster
    #[command(subcommand)]
    Team(TeamCommands),

    /// Dashboard: project counts, overdue steps, dangling assignees
    Status,
}

#[derive(Subcommand)]
pub enum ProjectCommands {
    /// Create a project with steps copied from the workflow template
    Create {
        /// Project name
        name: String,
        #[arg(long)]
        client: String,
        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        start: String,
        /// End date (YYYY-MM-DD)
        #[arg(long)]
        end: String,
        /// low | medium | high (default from config)
        #[arg(long)]
        priority: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    /// List projects
    List {
        /// Case-insensitive match on name or client
        #[arg(long, default_value = "")]
        search: String,
        /// all | not-started | in-progress | completed
        #[arg(long, default_value = "all")]
        status: String,
    },
    /// Show a project and its steps
    Show {
        /// Project name or ID
        reference: String,
    },
    /// Delete a project and its steps
    Delete {
        /// Project name or ID
        reference: String,
    },
}

#[derive(Subcommand)]
pub enum StepCommands {
    /// List the steps of a project
    List {
        /// Project name or ID
        project: String,
    },
    /// Set step status (pending | in-progress | completed | blocked)
    #[command(after_help = "\
NOTE:
  STEP is a 1-based position, a step name, or an ID prefix.
  Setting `completed` also moves the next step to in-progress when it is pending.")]
    Status {
        project: String,
        step: String,
        status: String,
    },
    /// Assign a team member to a step
    Assign {
        project: String,
        step: String,
        /// Team member name
        #[arg(required_unless_present = "clear")]
        member: Option<String>,
        /// Remove the current assignee
        #[arg(long, conflicts_with = "member")]
        clear: bool,
    },
    /// Set a step due date
    Due {
        project: String,
        step: String,
        /// Due date (YYYY-MM-DD)
        #[arg(required_unless_present = "clear")]
        date: Option<String>,
        /// Remove the due date
        #[arg(long, conflicts_with = "date")]
        clear: bool,
    },
}

#[derive(Subcommand)]
pub enum TemplateCommands {
    /// List workflow steps in order
    List,
    /// Append a workflow step
    Add {
        name: String,
        /// Estimated duration in days
        #[arg(long, default_value = "1", value_parser = clap::value_parser!(u32).range(1..))]
        days: u32,
    },
    /// Change name, order or estimated days of a workflow step
    Update {
        /// Step name or ID
        reference: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        order: Option<i64>,
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        days: Option<u32>,
    },
    /// Move a workflow step one place up or down
    Move {
        /// Step name or ID
        reference: String,
        /// up | down
        direction: String,
    },
    /// Remove a workflow step (existing projects keep theirs)
    Remove {
        /// Step name or ID
        reference: String,
    },
}

#[derive(Subcommand)]
pub enum TeamCommands {
    /// List team members
    List,
    /// Add a team member
    Add {
        name: String,
    },
    /// Remove a team member (steps keep the name)
    Remove {
        /// Member name or ID
        reference: String,
    },
}
