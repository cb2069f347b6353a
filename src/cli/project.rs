use serde_json::json;

use crate::cli::commands::ProjectCommands;
use crate::cli::resolve::resolve_project;
use crate::config::Config;
use crate::db::connection;
use crate::error::TrackerError;
use crate::models::Priority;
use crate::output;
use crate::state::AppState;
use crate::workflow::lifecycle::{self, ProjectInput};
use crate::workflow::{filter_projects, StatusFilter};

pub fn run(cmd: ProjectCommands, json_output: bool) -> i32 {
    let result = match cmd {
        ProjectCommands::Create {
            name,
            client,
            start,
            end,
            priority,
            description,
        } => {
            let input = ProjectInput {
                name,
                client,
                start_date: start,
                end_date: end,
                priority: None,
                description,
            };
            run_create(input, priority.as_deref(), json_output)
        }
        ProjectCommands::List { search, status } => run_list(&search, &status, json_output),
        ProjectCommands::Show { reference } => run_show(&reference, json_output),
        ProjectCommands::Delete { reference } => run_delete(&reference, json_output),
    };
    super::finish(result, json_output)
}

fn run_create(mut input: ProjectInput, priority: Option<&str>, json_output: bool) -> Result<i32, TrackerError> {
    let store = connection::open_store()?;
    let config = Config::load(&connection::config_path()?)?;
    input.priority = Some(match priority {
        Some(p) => Priority::from_str(p)
            .ok_or_else(|| TrackerError::validation(format!("Invalid priority '{p}': expected low, medium or high")))?,
        None => config.default_priority,
    });

    let mut state = AppState::load(&store)?;
    let project = lifecycle::create_project(&store, &mut state, &input)?;

    if json_output {
        output::json::print(&output::json::success(json!({
            "project": output::json::project_detail(&project)
        })));
    } else {
        println!(
            "Created project: {} ({}) with {} steps",
            project.name,
            project.id,
            project.steps.len()
        );
    }
    Ok(0)
}

fn run_list(search: &str, status: &str, json_output: bool) -> Result<i32, TrackerError> {
    let filter = StatusFilter::from_str(status).ok_or_else(|| {
        TrackerError::validation(format!(
            "Invalid status filter '{status}': expected all, not-started, in-progress or completed"
        ))
    })?;
    let store = connection::open_store()?;
    let state = AppState::load(&store)?;
    let projects = filter_projects(&state.projects, search, filter);

    if json_output {
        let projects_json: Vec<_> = projects.iter().map(|p| output::json::project_summary(p)).collect();
        output::json::print(&output::json::success(json!({
            "projects": projects_json,
            "total": state.projects.len(),
            "filter": { "search": search, "status": filter.as_str() }
        })));
    } else {
        output::text::print_project_list(&projects);
    }
    Ok(0)
}

fn run_show(reference: &str, json_output: bool) -> Result<i32, TrackerError> {
    let store = connection::open_store()?;
    let state = AppState::load(&store)?;
    let project = resolve_project(&state, reference)?;

    if json_output {
        output::json::print(&output::json::success(json!({
            "project": output::json::project_detail(project)
        })));
    } else {
        output::text::print_project(project);
        println!("\nSteps:");
        output::text::print_step_list(&project.steps);
    }
    Ok(0)
}

fn run_delete(reference: &str, json_output: bool) -> Result<i32, TrackerError> {
    let store = connection::open_store()?;
    let mut state = AppState::load(&store)?;
    let (id, name) = {
        let project = resolve_project(&state, reference)?;
        (project.id.clone(), project.name.clone())
    };
    lifecycle::delete_project(&store, &mut state, &id)?;

    if json_output {
        output::json::print(&output::json::success(json!({
            "deleted": { "id": id, "name": name }
        })));
    } else {
        println!("Deleted project: {name} ({id})");
    }
    Ok(0)
}
