//! Project lifecycle: creation from the template snapshot, step edits with
//! auto-advance, deletion.

use chrono::NaiveDate;
use tracing::{error, info, warn};

use crate::error::TrackerError;
use crate::models::{NewProject, NewProjectStep, Priority, Project, ProjectStep, StepStatus, StepUpdate};
use crate::state::AppState;
use crate::store::RecordStore;

/// Raw project form input. Dates are `YYYY-MM-DD`.
#[derive(Debug, Clone, Default)]
pub struct ProjectInput {
    pub name: String,
    pub client: String,
    pub start_date: String,
    pub end_date: String,
    pub priority: Option<Priority>,
    pub description: Option<String>,
}

/// Result of a step edit.
#[derive(Debug, Clone)]
pub struct StepChange {
    pub step: ProjectStep,
    /// The following step, if completing `step` moved it from pending to in-progress.
    pub promoted: Option<ProjectStep>,
}

/// Insert the project, then one pending step per current template.
///
/// The two writes are separate store calls. If the step batch fails the
/// project row is deleted again before the error is returned.
pub fn create_project<S: RecordStore>(
    store: &S,
    state: &mut AppState,
    input: &ProjectInput,
) -> Result<Project, TrackerError> {
    state.begin();
    let result = (|| -> Result<_, TrackerError> {
        let new_project = validate_input(input)?;
        let project = store.insert_project(&new_project)?;

        let steps: Vec<NewProjectStep> = state
            .templates
            .iter()
            .map(|t| NewProjectStep {
                project_id: project.id.clone(),
                name: t.name.clone(),
                order: t.order,
                status: StepStatus::Pending,
                estimated_days: t.estimated_days,
            })
            .collect();

        if let Err(e) = store.insert_steps(&steps) {
            warn!(project_id = %project.id, "step insert failed, removing project");
            if let Err(cleanup) = store.delete_project(&project.id) {
                error!(project_id = %project.id, "cleanup of partial project failed: {cleanup}");
            }
            return Err(e);
        }
        info!(project_id = %project.id, name = %project.name, steps = steps.len(), "created project");

        state.reload_projects(store)?;
        state
            .project(&project.id)
            .cloned()
            .ok_or_else(|| TrackerError::project_not_found(&project.id))
    })();
    state.settle(result)
}

/// Apply one edit to a step of `project_id`.
///
/// Completing a step promotes the next step (by position in the loaded
/// project) to in-progress when that step is still pending. This goes one
/// level only. Assignees must be on the current roster.
pub fn update_step<S: RecordStore>(
    store: &S,
    state: &mut AppState,
    project_id: &str,
    step_id: &str,
    update: StepUpdate,
) -> Result<StepChange, TrackerError> {
    state.begin();
    let result = (|| -> Result<_, TrackerError> {
        let project = state
            .project(project_id)
            .ok_or_else(|| TrackerError::project_not_found(project_id))?;
        let index = project
            .steps
            .iter()
            .position(|s| s.id == step_id)
            .ok_or_else(|| TrackerError::step_not_found(step_id))?;

        if let StepUpdate::Assignee(Some(ref name)) = update {
            if !state.team_members.iter().any(|m| &m.name == name) {
                return Err(TrackerError::validation(format!(
                    "'{name}' is not on the team roster"
                )));
            }
        }

        let next = match update {
            StepUpdate::Status(StepStatus::Completed) => project
                .steps
                .get(index + 1)
                .filter(|s| s.status == StepStatus::Pending)
                .map(|s| s.id.clone()),
            _ => None,
        };

        store.update_step(step_id, &update)?;
        info!(project_id, step_id, ?update, "updated step");
        if let Some(ref next_id) = next {
            if let Err(e) = store.update_step(next_id, &StepUpdate::Status(StepStatus::InProgress)) {
                // The first write landed, so the loaded projects are stale.
                warn!(project_id, step_id = %next_id, "advancing next step failed: {e}");
                state.reload_projects(store)?;
                return Err(e);
            }
            info!(project_id, step_id = %next_id, "advanced next step to in-progress");
        }

        state.reload_projects(store)?;
        let find = |id: &str| {
            state
                .project(project_id)
                .and_then(|p| p.steps.iter().find(|s| s.id == id))
                .cloned()
                .ok_or_else(|| TrackerError::step_not_found(id))
        };
        let step = find(step_id)?;
        let promoted = next.as_deref().map(find).transpose()?;
        Ok(StepChange { step, promoted })
    })();
    state.settle(result)
}

/// Delete a project. Its steps go with it.
pub fn delete_project<S: RecordStore>(store: &S, state: &mut AppState, id: &str) -> Result<(), TrackerError> {
    state.begin();
    let result = (|| -> Result<_, TrackerError> {
        store.delete_project(id)?;
        info!(project_id = id, "deleted project");
        state.reload_projects(store)?;
        Ok(())
    })();
    state.settle(result)
}

fn validate_input(input: &ProjectInput) -> Result<NewProject, TrackerError> {
    let required = |value: &str, field: &str| -> Result<String, TrackerError> {
        let value = value.trim();
        if value.is_empty() {
            return Err(TrackerError::validation(format!("Project {field} is required")));
        }
        Ok(value.to_string())
    };
    let name = required(&input.name, "name")?;
    let client = required(&input.client, "client")?;
    let start_date = parse_date(&required(&input.start_date, "start date")?)?;
    let end_date = parse_date(&required(&input.end_date, "end date")?)?;

    Ok(NewProject {
        name,
        client,
        start_date,
        end_date,
        priority: input.priority.unwrap_or_default(),
        description: input
            .description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(str::to_string),
    })
}

pub fn parse_date(value: &str) -> Result<NaiveDate, TrackerError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| TrackerError::validation(format!("Invalid date '{value}', expected YYYY-MM-DD")))
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::db::SqliteStore;
    use crate::error::ErrorCode;
    use crate::models::{NewTemplate, TeamMember, TemplatePatch, WorkflowStepTemplate};
    use crate::workflow::{progress, roster, templates};

    fn setup(steps: &[(&str, u32)]) -> (SqliteStore, AppState) {
        let store = SqliteStore::open_in_memory().unwrap();
        let mut state = AppState::load(&store).unwrap();
        for (name, days) in steps {
            templates::add_step(&store, &mut state, name, *days).unwrap();
        }
        (store, state)
    }

    fn input(name: &str) -> ProjectInput {
        ProjectInput {
            name: name.into(),
            client: "Acme".into(),
            start_date: "2024-05-01".into(),
            end_date: "2024-06-01".into(),
            ..Default::default()
        }
    }

    fn statuses(p: &Project) -> Vec<StepStatus> {
        p.steps.iter().map(|s| s.status).collect()
    }

    fn complete(store: &SqliteStore, state: &mut AppState, project_id: &str, index: usize) -> StepChange {
        let step_id = state.project(project_id).unwrap().steps[index].id.clone();
        update_step(store, state, project_id, &step_id, StepUpdate::Status(StepStatus::Completed)).unwrap()
    }

    #[test]
    fn test_full_production_walkthrough() {
        use StepStatus::{Completed, InProgress, Pending};
        let (store, mut state) = setup(&[("Script", 1), ("Edit", 2), ("Review", 1)]);

        let project = create_project(&store, &mut state, &input("Launch Video")).unwrap();
        assert_eq!(project.steps.len(), 3);
        assert_eq!(statuses(&project), [Pending, Pending, Pending]);
        assert_eq!(project.steps[1].estimated_days, 2);
        assert_eq!(project.priority, Priority::Medium);
        assert_eq!(progress::compute_progress(&project), 0);

        let change = complete(&store, &mut state, &project.id, 0);
        assert_eq!(change.promoted.as_ref().map(|s| s.name.as_str()), Some("Edit"));
        let p = state.project(&project.id).unwrap();
        assert_eq!(statuses(p), [Completed, InProgress, Pending]);
        assert_eq!(progress::compute_progress(p), 33);

        complete(&store, &mut state, &project.id, 1);
        let p = state.project(&project.id).unwrap();
        assert_eq!(statuses(p), [Completed, Completed, InProgress]);
        assert_eq!(progress::compute_progress(p), 67);

        let change = complete(&store, &mut state, &project.id, 2);
        assert!(change.promoted.is_none());
        let p = state.project(&project.id).unwrap();
        assert_eq!(progress::compute_progress(p), 100);
        assert_eq!(progress::compute_status(p), crate::models::ProjectStatus::Completed);
    }

    #[test]
    fn test_completion_skips_non_pending_sibling() {
        let (store, mut state) = setup(&[("Script", 1), ("Edit", 2), ("Review", 1)]);
        let project = create_project(&store, &mut state, &input("Teaser")).unwrap();

        let edit = project.steps[1].id.clone();
        update_step(&store, &mut state, &project.id, &edit, StepUpdate::Status(StepStatus::Blocked)).unwrap();

        let change = complete(&store, &mut state, &project.id, 0);
        assert!(change.promoted.is_none());
        let p = state.project(&project.id).unwrap();
        assert_eq!(
            statuses(p),
            [StepStatus::Completed, StepStatus::Blocked, StepStatus::Pending]
        );
    }

    #[test]
    fn test_promotion_is_one_level() {
        let (store, mut state) = setup(&[("Script", 1), ("Edit", 2), ("Review", 1)]);
        let project = create_project(&store, &mut state, &input("Teaser")).unwrap();

        // Completing the middle step first promotes only the last one.
        complete(&store, &mut state, &project.id, 1);
        let p = state.project(&project.id).unwrap();
        assert_eq!(
            statuses(p),
            [StepStatus::Pending, StepStatus::Completed, StepStatus::InProgress]
        );
    }

    #[test]
    fn test_non_completion_status_does_not_promote() {
        let (store, mut state) = setup(&[("Script", 1), ("Edit", 2)]);
        let project = create_project(&store, &mut state, &input("Teaser")).unwrap();
        let first = project.steps[0].id.clone();

        let change =
            update_step(&store, &mut state, &project.id, &first, StepUpdate::Status(StepStatus::InProgress)).unwrap();
        assert!(change.promoted.is_none());
        assert_eq!(state.project(&project.id).unwrap().steps[1].status, StepStatus::Pending);
    }

    #[test]
    fn test_steps_are_a_snapshot() {
        let (store, mut state) = setup(&[("Script", 1), ("Edit", 2)]);
        let project = create_project(&store, &mut state, &input("Teaser")).unwrap();

        let edit = state.templates[1].id.clone();
        templates::remove_step(&store, &mut state, &edit).unwrap();
        let script = state.templates[0].id.clone();
        let patch = TemplatePatch {
            name: Some("Screenplay".into()),
            ..Default::default()
        };
        templates::update_step(&store, &mut state, &script, &patch).unwrap();

        let p = state.project(&project.id).unwrap();
        let names: Vec<_> = p.steps.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["Script", "Edit"]);

        let later = create_project(&store, &mut state, &input("Later")).unwrap();
        assert_eq!(later.steps.len(), 1);
        assert_eq!(later.steps[0].name, "Screenplay");
    }

    #[test]
    fn test_create_requires_fields() {
        let (store, mut state) = setup(&[("Script", 1)]);
        for broken in [
            ProjectInput { name: "  ".into(), ..input("x") },
            ProjectInput { client: String::new(), ..input("x") },
            ProjectInput { start_date: String::new(), ..input("x") },
            ProjectInput { end_date: "June".into(), ..input("x") },
        ] {
            let err = create_project(&store, &mut state, &broken).unwrap_err();
            assert_eq!(err.code, ErrorCode::ValidationError);
            assert!(state.error.is_some());
        }
        assert!(store.select_projects().unwrap().is_empty());
    }

    #[test]
    fn test_create_without_templates_has_no_steps() {
        let (store, mut state) = setup(&[]);
        let project = create_project(&store, &mut state, &input("Bare")).unwrap();
        assert!(project.steps.is_empty());
        assert_eq!(progress::compute_status(&project), crate::models::ProjectStatus::NotStarted);
    }

    #[test]
    fn test_assignee_must_be_on_roster() {
        let (store, mut state) = setup(&[("Script", 1)]);
        roster::add_member(&store, &mut state, "Dana").unwrap();
        let project = create_project(&store, &mut state, &input("Teaser")).unwrap();
        let step = project.steps[0].id.clone();

        let err = update_step(
            &store,
            &mut state,
            &project.id,
            &step,
            StepUpdate::Assignee(Some("Nobody".into())),
        )
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let change = update_step(&store, &mut state, &project.id, &step, StepUpdate::Assignee(Some("Dana".into())))
            .unwrap();
        assert_eq!(change.step.assignee.as_deref(), Some("Dana"));

        let due = NaiveDate::from_ymd_opt(2024, 5, 10).unwrap();
        let change = update_step(&store, &mut state, &project.id, &step, StepUpdate::DueDate(Some(due))).unwrap();
        assert_eq!(change.step.due_date, Some(due));
    }

    #[test]
    fn test_step_must_belong_to_project() {
        let (store, mut state) = setup(&[("Script", 1)]);
        let a = create_project(&store, &mut state, &input("A")).unwrap();
        let b = create_project(&store, &mut state, &input("B")).unwrap();
        let err = update_step(
            &store,
            &mut state,
            &a.id,
            &b.steps[0].id,
            StepUpdate::Status(StepStatus::Completed),
        )
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::StepNotFound);
    }

    #[test]
    fn test_delete_project() {
        let (store, mut state) = setup(&[("Script", 1)]);
        let project = create_project(&store, &mut state, &input("Gone")).unwrap();
        delete_project(&store, &mut state, &project.id).unwrap();
        assert!(state.projects.is_empty());
        assert!(delete_project(&store, &mut state, &project.id).is_err());
    }

    /// Delegates to SQLite, failing the chosen step writes.
    struct FailingStore {
        inner: SqliteStore,
        fail_step_insert: bool,
        /// Zero-based index of the `update_step` call that fails.
        fail_step_update: Option<usize>,
        step_updates: Cell<usize>,
    }

    impl FailingStore {
        fn new() -> Self {
            Self {
                inner: SqliteStore::open_in_memory().unwrap(),
                fail_step_insert: false,
                fail_step_update: None,
                step_updates: Cell::new(0),
            }
        }
    }

    impl RecordStore for FailingStore {
        fn select_templates(&self) -> Result<Vec<WorkflowStepTemplate>, TrackerError> {
            self.inner.select_templates()
        }
        fn insert_template(&self, t: &NewTemplate) -> Result<WorkflowStepTemplate, TrackerError> {
            self.inner.insert_template(t)
        }
        fn update_template(&self, id: &str, patch: &TemplatePatch) -> Result<(), TrackerError> {
            self.inner.update_template(id, patch)
        }
        fn swap_template_orders(&self, first_id: &str, second_id: &str) -> Result<(), TrackerError> {
            self.inner.swap_template_orders(first_id, second_id)
        }
        fn delete_template(&self, id: &str) -> Result<(), TrackerError> {
            self.inner.delete_template(id)
        }
        fn select_projects(&self) -> Result<Vec<Project>, TrackerError> {
            self.inner.select_projects()
        }
        fn insert_project(&self, p: &NewProject) -> Result<Project, TrackerError> {
            self.inner.insert_project(p)
        }
        fn delete_project(&self, id: &str) -> Result<(), TrackerError> {
            self.inner.delete_project(id)
        }
        fn insert_steps(&self, steps: &[NewProjectStep]) -> Result<(), TrackerError> {
            if self.fail_step_insert {
                return Err(TrackerError::database("connection reset"));
            }
            self.inner.insert_steps(steps)
        }
        fn update_step(&self, id: &str, update: &StepUpdate) -> Result<(), TrackerError> {
            let call = self.step_updates.get();
            self.step_updates.set(call + 1);
            if self.fail_step_update == Some(call) {
                return Err(TrackerError::database("disk I/O error"));
            }
            self.inner.update_step(id, update)
        }
        fn select_members(&self) -> Result<Vec<TeamMember>, TrackerError> {
            self.inner.select_members()
        }
        fn insert_member(&self, name: &str) -> Result<TeamMember, TrackerError> {
            self.inner.insert_member(name)
        }
        fn delete_member(&self, id: &str) -> Result<(), TrackerError> {
            self.inner.delete_member(id)
        }
    }

    #[test]
    fn test_failed_step_insert_removes_project() {
        let store = FailingStore {
            fail_step_insert: true,
            ..FailingStore::new()
        };
        let mut state = AppState::load(&store).unwrap();
        templates::add_step(&store, &mut state, "Script", 1).unwrap();

        let err = create_project(&store, &mut state, &input("Doomed")).unwrap_err();
        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert_eq!(state.error.as_deref(), Some("connection reset"));
        assert!(store.select_projects().unwrap().is_empty());
    }

    #[test]
    fn test_failed_promotion_still_reloads_projects() {
        let store = FailingStore {
            fail_step_update: Some(1),
            ..FailingStore::new()
        };
        let mut state = AppState::load(&store).unwrap();
        templates::add_step(&store, &mut state, "Script", 1).unwrap();
        templates::add_step(&store, &mut state, "Edit", 2).unwrap();
        let project = create_project(&store, &mut state, &input("Teaser")).unwrap();
        let script = project.steps[0].id.clone();

        let err = update_step(&store, &mut state, &project.id, &script, StepUpdate::Status(StepStatus::Completed))
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert_eq!(state.error.as_deref(), Some("disk I/O error"));

        let expected = [StepStatus::Completed, StepStatus::Pending];
        assert_eq!(statuses(state.project(&project.id).unwrap()), expected);
        assert_eq!(statuses(&store.select_projects().unwrap()[0]), expected);
    }
}
