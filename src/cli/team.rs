use serde_json::json;

use crate::cli::commands::TeamCommands;
use crate::cli::resolve::resolve_member;
use crate::db::connection;
use crate::error::TrackerError;
use crate::output;
use crate::state::AppState;
use crate::workflow::roster;

pub fn run(cmd: TeamCommands, json_output: bool) -> i32 {
    let result = match cmd {
        TeamCommands::List => run_list(json_output),
        TeamCommands::Add { name } => run_add(&name, json_output),
        TeamCommands::Remove { reference } => run_remove(&reference, json_output),
    };
    super::finish(result, json_output)
}

fn run_list(json_output: bool) -> Result<i32, TrackerError> {
    let store = connection::open_store()?;
    let state = AppState::load(&store)?;

    if json_output {
        let members: Vec<_> = state.team_members.iter().map(output::json::member_json).collect();
        output::json::print(&output::json::success(json!({ "members": members })));
    } else {
        output::text::print_member_list(&state.team_members);
    }
    Ok(0)
}

fn run_add(name: &str, json_output: bool) -> Result<i32, TrackerError> {
    let store = connection::open_store()?;
    let mut state = AppState::load(&store)?;
    let added = roster::add_member(&store, &mut state, name)?;

    if json_output {
        output::json::print(&output::json::success(json!({
            "member": added.as_ref().map(output::json::member_json)
        })));
    } else {
        match added {
            Some(m) => println!("Added team member: {} ({})", m.name, m.id),
            None => println!("Nothing added: name is empty."),
        }
    }
    Ok(0)
}

fn run_remove(reference: &str, json_output: bool) -> Result<i32, TrackerError> {
    let store = connection::open_store()?;
    let mut state = AppState::load(&store)?;
    let member = resolve_member(&state, reference)?.clone();
    roster::remove_member(&store, &mut state, &member.id)?;

    let still_assigned = roster::dangling_assignments(&state)
        .iter()
        .filter(|(_, s)| s.assignee.as_deref() == Some(member.name.as_str()))
        .count();

    if json_output {
        output::json::print(&output::json::success(json!({
            "removed": output::json::member_json(&member),
            "dangling_assignments": still_assigned
        })));
    } else {
        println!("Removed team member: {} ({})", member.name, member.id);
        if still_assigned > 0 {
            println!("  {still_assigned} step(s) still name {} as assignee.", member.name);
        }
    }
    Ok(0)
}
