use chrono::Local;
use serde_json::json;

use crate::db::connection;
use crate::error::TrackerError;
use crate::models::{Project, ProjectStatus, ProjectStep, StepStatus};
use crate::output;
use crate::state::AppState;
use crate::workflow::progress::overdue_steps;
use crate::workflow::{compute_status, roster};

pub fn run(json_output: bool) -> i32 {
    super::finish(run_inner(json_output), json_output)
}

fn run_inner(json_output: bool) -> Result<i32, TrackerError> {
    let store = connection::open_store()?;
    let state = AppState::load(&store)?;
    let today = Local::now().date_naive();

    let count_projects = |status: ProjectStatus| {
        state.projects.iter().filter(|p| compute_status(p) == status).count()
    };
    let not_started = count_projects(ProjectStatus::NotStarted);
    let in_progress = count_projects(ProjectStatus::InProgress);
    let completed = count_projects(ProjectStatus::Completed);

    let steps = state.projects.iter().flat_map(|p| p.steps.iter());
    let total_steps = steps.clone().count();
    let completed_steps = steps.clone().filter(|s| s.status == StepStatus::Completed).count();
    let blocked_steps = steps.filter(|s| s.status == StepStatus::Blocked).count();

    let overdue: Vec<_> = state
        .projects
        .iter()
        .flat_map(|p| overdue_steps(p, today).into_iter().map(move |s| (p, s)))
        .collect();
    let dangling = roster::dangling_assignments(&state);

    if json_output {
        let pair = |(p, s): &(&Project, &ProjectStep)| {
            json!({
                "project": { "id": p.id, "name": p.name },
                "step": output::json::step_json(s)
            })
        };
        output::json::print(&output::json::success(json!({
            "projects": {
                "total": state.projects.len(),
                "not_started": not_started,
                "in_progress": in_progress,
                "completed": completed
            },
            "steps": {
                "total": total_steps,
                "completed": completed_steps,
                "blocked": blocked_steps
            },
            "team_members": state.team_members.len(),
            "templates": state.templates.len(),
            "overdue": overdue.iter().map(pair).collect::<Vec<_>>(),
            "dangling_assignments": dangling.iter().map(pair).collect::<Vec<_>>()
        })));
    } else {
        println!(
            "Projects: {} (not-started={} in-progress={} completed={})",
            state.projects.len(),
            not_started,
            in_progress,
            completed
        );
        println!(
            "Steps: {} (completed={} blocked={})",
            total_steps, completed_steps, blocked_steps
        );
        println!(
            "Team members: {}  Workflow steps: {}",
            state.team_members.len(),
            state.templates.len()
        );
        if !overdue.is_empty() {
            println!("\nOverdue:");
            for (p, s) in &overdue {
                let due = s.due_date.map(|d| d.to_string()).unwrap_or_default();
                println!("  {} / {} [{}] due {}", p.name, s.name, s.status.as_str(), due);
            }
        }
        if !dangling.is_empty() {
            println!("\nAssignees no longer on the team:");
            for (p, s) in &dangling {
                let name = s.assignee.as_deref().unwrap_or("?");
                println!("  {} / {} @{}", p.name, s.name, name);
            }
        }
    }
    Ok(0)
}
