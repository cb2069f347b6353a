//! Workflow template engine: the ordered step list that seeds new projects.

use tracing::info;

use crate::error::TrackerError;
use crate::models::{NewTemplate, TemplatePatch, WorkflowStepTemplate};
use crate::state::AppState;
use crate::store::RecordStore;

/// Steps seeded by `init` for a fresh workspace: (name, estimated days).
pub const DEFAULT_WORKFLOW: &[(&str, u32)] = &[
    ("Script", 2),
    ("Storyboard", 2),
    ("Shooting", 3),
    ("Editing", 5),
    ("Sound Design", 2),
    ("Color Grading", 2),
    ("Review", 1),
    ("Delivery", 1),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// Append a step after the current last one. A blank name is a no-op and
/// returns `Ok(None)` without touching the store.
pub fn add_step<S: RecordStore>(
    store: &S,
    state: &mut AppState,
    name: &str,
    estimated_days: u32,
) -> Result<Option<WorkflowStepTemplate>, TrackerError> {
    let name = name.trim();
    if name.is_empty() {
        return Ok(None);
    }

    state.begin();
    let result = (|| -> Result<_, TrackerError> {
        let order = next_order(&state.templates);
        let created = store.insert_template(&NewTemplate {
            name: name.to_string(),
            order,
            estimated_days,
        })?;
        info!(id = %created.id, name = %created.name, order, "added workflow step");
        state.reload_templates(store)?;
        Ok(Some(created))
    })();
    state.settle(result)
}

pub fn update_step<S: RecordStore>(
    store: &S,
    state: &mut AppState,
    id: &str,
    patch: &TemplatePatch,
) -> Result<(), TrackerError> {
    state.begin();
    let result = (|| -> Result<_, TrackerError> {
        store.update_template(id, patch)?;
        info!(id, ?patch, "updated workflow step");
        state.reload_templates(store)?;
        Ok(())
    })();
    state.settle(result)
}

/// Delete a template. Orders are not renumbered and projects already created
/// keep their steps.
pub fn remove_step<S: RecordStore>(store: &S, state: &mut AppState, id: &str) -> Result<(), TrackerError> {
    state.begin();
    let result = (|| -> Result<_, TrackerError> {
        store.delete_template(id)?;
        info!(id, "removed workflow step");
        state.reload_templates(store)?;
        Ok(())
    })();
    state.settle(result)
}

/// Swap a template's order with its neighbour. Returns `false` when the step
/// is already first (moving up) or last (moving down).
pub fn move_step<S: RecordStore>(
    store: &S,
    state: &mut AppState,
    id: &str,
    direction: Direction,
) -> Result<bool, TrackerError> {
    state.begin();
    let result = (|| -> Result<_, TrackerError> {
        let index = state
            .templates
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| TrackerError::template_not_found(id))?;
        let neighbour = match direction {
            Direction::Up => index.checked_sub(1),
            Direction::Down => Some(index + 1).filter(|&i| i < state.templates.len()),
        };
        let Some(neighbour) = neighbour else {
            return Ok(false);
        };

        let other_id = state.templates[neighbour].id.clone();
        store.swap_template_orders(id, &other_id)?;
        info!(id, ?direction, "moved workflow step");
        state.reload_templates(store)?;
        Ok(true)
    })();
    state.settle(result)
}

/// Insert the default workflow, but only into an empty template list.
pub fn seed_defaults<S: RecordStore>(store: &S, state: &mut AppState) -> Result<usize, TrackerError> {
    if !state.templates.is_empty() {
        return Ok(0);
    }
    let mut added = 0;
    for (name, days) in DEFAULT_WORKFLOW {
        if add_step(store, state, name, *days)?.is_some() {
            added += 1;
        }
    }
    Ok(added)
}

fn next_order(templates: &[WorkflowStepTemplate]) -> i64 {
    templates.iter().map(|t| t.order).max().unwrap_or(0) + 1
}
