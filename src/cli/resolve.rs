//! Turn command-line references into loaded records.

use crate::error::TrackerError;
use crate::models::{Project, ProjectStep, TeamMember, WorkflowStepTemplate};
use crate::state::AppState;

/// Exact id → exact name → id prefix → name substring (all name checks
/// case-insensitive). More than one hit at a stage is ambiguous.
pub fn resolve_project<'a>(state: &'a AppState, reference: &str) -> Result<&'a Project, TrackerError> {
    let needle = reference.to_lowercase();
    let stages: [&dyn Fn(&Project) -> bool; 4] = [
        &|p: &Project| p.id == reference,
        &|p: &Project| p.name.to_lowercase() == needle,
        &|p: &Project| p.id.starts_with(reference),
        &|p: &Project| p.name.to_lowercase().contains(&needle),
    ];
    for stage in stages {
        let hits: Vec<&Project> = state.projects.iter().filter(|p| stage(p)).collect();
        match hits.len() {
            0 => continue,
            1 => return Ok(hits[0]),
            _ => {
                let candidates: Vec<String> = hits.iter().map(|p| format!("{} ({})", p.name, p.id)).collect();
                return Err(TrackerError::ambiguous_ref(reference, &candidates));
            }
        }
    }
    Err(TrackerError::project_not_found(reference))
}

/// 1-based position → exact name (case-insensitive) → id prefix. A number
/// outside the step range falls through to the name match.
pub fn resolve_step<'a>(project: &'a Project, reference: &str) -> Result<&'a ProjectStep, TrackerError> {
    let by_position = reference
        .parse::<usize>()
        .ok()
        .and_then(|position| position.checked_sub(1))
        .and_then(|i| project.steps.get(i));
    if let Some(step) = by_position {
        return Ok(step);
    }
    let needle = reference.to_lowercase();
    if let Some(step) = project.steps.iter().find(|s| s.name.to_lowercase() == needle) {
        return Ok(step);
    }
    unique_prefix(&project.steps, reference, |s| &s.id, |s| s.name.as_str())?
        .ok_or_else(|| TrackerError::step_not_found(reference))
}

/// Exact name → id prefix.
pub fn resolve_template<'a>(state: &'a AppState, reference: &str) -> Result<&'a WorkflowStepTemplate, TrackerError> {
    if let Some(t) = state.templates.iter().find(|t| t.name == reference) {
        return Ok(t);
    }
    unique_prefix(&state.templates, reference, |t| &t.id, |t| t.name.as_str())?
        .ok_or_else(|| TrackerError::template_not_found(reference))
}

/// Exact name → id prefix.
pub fn resolve_member<'a>(state: &'a AppState, reference: &str) -> Result<&'a TeamMember, TrackerError> {
    if let Some(m) = state.team_members.iter().find(|m| m.name == reference) {
        return Ok(m);
    }
    unique_prefix(&state.team_members, reference, |m| &m.id, |m| m.name.as_str())?
        .ok_or_else(|| TrackerError::member_not_found(reference))
}

fn unique_prefix<'a, T>(
    items: &'a [T],
    reference: &str,
    id: impl Fn(&T) -> &String,
    label: impl Fn(&T) -> &str,
) -> Result<Option<&'a T>, TrackerError> {
    let hits: Vec<&T> = items.iter().filter(|item| id(item).starts_with(reference)).collect();
    match hits.len() {
        0 => Ok(None),
        1 => Ok(Some(hits[0])),
        _ => {
            let candidates: Vec<String> = hits.iter().map(|h| format!("{} ({})", label(h), id(h))).collect();
            Err(TrackerError::ambiguous_ref(reference, &candidates))
        }
    }
}
