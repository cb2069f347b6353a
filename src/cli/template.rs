use serde_json::json;

use crate::cli::commands::TemplateCommands;
use crate::cli::resolve::resolve_template;
use crate::db::connection;
use crate::error::TrackerError;
use crate::models::TemplatePatch;
use crate::output;
use crate::state::AppState;
use crate::workflow::templates::{self, Direction};

pub fn run(cmd: TemplateCommands, json_output: bool) -> i32 {
    let result = match cmd {
        TemplateCommands::List => run_list(json_output),
        TemplateCommands::Add { name, days } => run_add(&name, days, json_output),
        TemplateCommands::Update { reference, name, order, days } => {
            let patch = TemplatePatch {
                name,
                order,
                estimated_days: days,
            };
            run_update(&reference, patch, json_output)
        }
        TemplateCommands::Move { reference, direction } => run_move(&reference, &direction, json_output),
        TemplateCommands::Remove { reference } => run_remove(&reference, json_output),
    };
    super::finish(result, json_output)
}

fn print_templates(state: &AppState, json_output: bool) {
    if json_output {
        let templates_json: Vec<_> = state.templates.iter().map(output::json::template_json).collect();
        output::json::print(&output::json::success(json!({ "templates": templates_json })));
    } else {
        output::text::print_template_list(&state.templates);
    }
}

fn run_list(json_output: bool) -> Result<i32, TrackerError> {
    let store = connection::open_store()?;
    let state = AppState::load(&store)?;
    print_templates(&state, json_output);
    Ok(0)
}

fn run_add(name: &str, days: u32, json_output: bool) -> Result<i32, TrackerError> {
    let store = connection::open_store()?;
    let mut state = AppState::load(&store)?;
    let added = templates::add_step(&store, &mut state, name, days)?;

    if json_output {
        output::json::print(&output::json::success(json!({
            "template": added.as_ref().map(output::json::template_json)
        })));
    } else {
        match added {
            Some(t) => println!("Added workflow step: {} (order {}, {}d)", t.name, t.order, t.estimated_days),
            None => println!("Nothing added: step name is empty."),
        }
    }
    Ok(0)
}

fn run_update(reference: &str, mut patch: TemplatePatch, json_output: bool) -> Result<i32, TrackerError> {
    if let Some(ref name) = patch.name {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(TrackerError::validation("Workflow step name cannot be empty"));
        }
        patch.name = Some(trimmed.to_string());
    }
    if patch.is_empty() {
        return Err(TrackerError::validation("Nothing to update: pass --name, --order or --days"));
    }

    let store = connection::open_store()?;
    let mut state = AppState::load(&store)?;
    let id = resolve_template(&state, reference)?.id.clone();
    templates::update_step(&store, &mut state, &id, &patch)?;

    if json_output {
        print_templates(&state, json_output);
    } else {
        println!("Updated workflow step {id}");
        output::text::print_template_list(&state.templates);
    }
    Ok(0)
}

fn run_move(reference: &str, direction: &str, json_output: bool) -> Result<i32, TrackerError> {
    let direction = match direction {
        "up" => Direction::Up,
        "down" => Direction::Down,
        other => {
            return Err(TrackerError::validation(format!(
                "Invalid direction '{other}': expected up or down"
            )))
        }
    };
    let store = connection::open_store()?;
    let mut state = AppState::load(&store)?;
    let id = resolve_template(&state, reference)?.id.clone();
    let moved = templates::move_step(&store, &mut state, &id, direction)?;

    if json_output {
        let templates_json: Vec<_> = state.templates.iter().map(output::json::template_json).collect();
        output::json::print(&output::json::success(json!({
            "moved": moved,
            "templates": templates_json
        })));
    } else {
        if !moved {
            println!("Already at the {}.", if direction == Direction::Up { "top" } else { "bottom" });
        }
        output::text::print_template_list(&state.templates);
    }
    Ok(0)
}

fn run_remove(reference: &str, json_output: bool) -> Result<i32, TrackerError> {
    let store = connection::open_store()?;
    let mut state = AppState::load(&store)?;
    let removed = resolve_template(&state, reference)?.clone();
    templates::remove_step(&store, &mut state, &removed.id)?;

    if json_output {
        output::json::print(&output::json::success(json!({
            "removed": output::json::template_json(&removed)
        })));
    } else {
        println!("Removed workflow step: {} ({})", removed.name, removed.id);
    }
    Ok(0)
}
