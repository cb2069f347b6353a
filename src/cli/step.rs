use serde_json::json;

use crate::cli::commands::StepCommands;
use crate::cli::resolve::{resolve_member, resolve_project, resolve_step};
use crate::db::connection;
use crate::error::TrackerError;
use crate::models::{StepStatus, StepUpdate};
use crate::output;
use crate::state::AppState;
use crate::workflow::lifecycle;
use crate::workflow::{compute_progress, compute_status};

pub fn run(cmd: StepCommands, json_output: bool) -> i32 {
    let result = match cmd {
        StepCommands::List { project } => run_list(&project, json_output),
        StepCommands::Status { project, step, status } => match StepStatus::from_str(&status) {
            Some(status) => run_update(&project, &step, Edit::Status(status), json_output),
            None => Err(TrackerError::validation(format!(
                "Invalid status '{status}': expected pending, in-progress, completed or blocked"
            ))),
        },
        StepCommands::Assign { project, step, member, clear } => {
            let member = if clear { None } else { member };
            run_update(&project, &step, Edit::Assignee(member), json_output)
        }
        StepCommands::Due { project, step, date, clear } => {
            let date = if clear { None } else { date };
            run_update(&project, &step, Edit::DueDate(date), json_output)
        }
    };
    super::finish(result, json_output)
}

/// Step edit as typed on the command line, before references are resolved.
enum Edit {
    Status(StepStatus),
    Assignee(Option<String>),
    DueDate(Option<String>),
}

fn run_list(project_ref: &str, json_output: bool) -> Result<i32, TrackerError> {
    let store = connection::open_store()?;
    let state = AppState::load(&store)?;
    let project = resolve_project(&state, project_ref)?;

    if json_output {
        let steps: Vec<_> = project.steps.iter().map(output::json::step_json).collect();
        output::json::print(&output::json::success(json!({
            "project": { "id": project.id, "name": project.name },
            "steps": steps,
            "progress": compute_progress(project)
        })));
    } else {
        println!("{} ({}%)", project.name, compute_progress(project));
        output::text::print_step_list(&project.steps);
    }
    Ok(0)
}

fn run_update(project_ref: &str, step_ref: &str, edit: Edit, json_output: bool) -> Result<i32, TrackerError> {
    let store = connection::open_store()?;
    let mut state = AppState::load(&store)?;

    let update = match edit {
        Edit::Status(status) => StepUpdate::Status(status),
        Edit::Assignee(None) => StepUpdate::Assignee(None),
        Edit::Assignee(Some(member)) => {
            StepUpdate::Assignee(Some(resolve_member(&state, &member)?.name.clone()))
        }
        Edit::DueDate(None) => StepUpdate::DueDate(None),
        Edit::DueDate(Some(date)) => StepUpdate::DueDate(Some(lifecycle::parse_date(&date)?)),
    };
    let (project_id, step_id) = {
        let project = resolve_project(&state, project_ref)?;
        let step = resolve_step(project, step_ref)?;
        (project.id.clone(), step.id.clone())
    };

    let change = lifecycle::update_step(&store, &mut state, &project_id, &step_id, update)?;
    let project = state
        .project(&project_id)
        .ok_or_else(|| TrackerError::project_not_found(&project_id))?;
    let progress = compute_progress(project);
    let status = compute_status(project);

    if json_output {
        let mut data = json!({
            "step": output::json::step_json(&change.step),
            "project": {
                "id": project.id,
                "name": project.name,
                "status": status.as_str(),
                "progress": progress
            }
        });
        if let Some(ref promoted) = change.promoted {
            data["promoted"] = output::json::step_json(promoted);
        }
        output::json::print(&output::json::success(data));
    } else {
        println!("Step {} → {}", change.step.name, change.step.status.as_str());
        if let Some(ref assignee) = change.step.assignee {
            println!("  Assignee: {assignee}");
        }
        if let Some(due) = change.step.due_date {
            println!("  Due: {due}");
        }
        if let Some(ref promoted) = change.promoted {
            println!("Next step now in progress: {}", promoted.name);
        }
        println!("Project {}: {}% ({})", project.name, progress, status.as_str());
    }
    Ok(0)
}
