//! Team roster. Steps refer to members by name, so removals can leave
//! dangling assignees behind; `dangling_assignments` finds them.

use tracing::info;

use crate::error::TrackerError;
use crate::models::{Project, ProjectStep, TeamMember};
use crate::state::AppState;
use crate::store::RecordStore;

/// Add a member. A blank name is a no-op and returns `Ok(None)`.
pub fn add_member<S: RecordStore>(
    store: &S,
    state: &mut AppState,
    name: &str,
) -> Result<Option<TeamMember>, TrackerError> {
    let name = name.trim();
    if name.is_empty() {
        return Ok(None);
    }

    state.begin();
    let result = (|| -> Result<_, TrackerError> {
        let member = store.insert_member(name)?;
        info!(id = %member.id, name = %member.name, "added team member");
        state.reload_members(store)?;
        Ok(Some(member))
    })();
    state.settle(result)
}

/// Remove a member without touching steps assigned to them.
pub fn remove_member<S: RecordStore>(store: &S, state: &mut AppState, id: &str) -> Result<(), TrackerError> {
    state.begin();
    let result = (|| -> Result<_, TrackerError> {
        store.delete_member(id)?;
        info!(id, "removed team member");
        state.reload_members(store)?;
        Ok(())
    })();
    state.settle(result)
}

/// Steps whose assignee no longer matches any member name.
pub fn dangling_assignments(state: &AppState) -> Vec<(&Project, &ProjectStep)> {
    state
        .projects
        .iter()
        .flat_map(|p| p.steps.iter().map(move |s| (p, s)))
        .filter(|(_, s)| {
            s.assignee
                .as_deref()
                .is_some_and(|name| !state.team_members.iter().any(|m| m.name == name))
        })
        .collect()
}
