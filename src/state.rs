use tracing::debug;

use crate::error::TrackerError;
use crate::models::{Project, TeamMember, WorkflowStepTemplate};
use crate::store::RecordStore;

/// In-memory view of the store that the presentation layer renders.
///
/// Manager operations take this by `&mut`, write to the store, then reload
/// the collection they touched. Nothing is patched in place.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub projects: Vec<Project>,
    pub team_members: Vec<TeamMember>,
    pub templates: Vec<WorkflowStepTemplate>,
    pub loading: bool,
    /// Message of the last failed operation, cleared when the next one starts.
    pub error: Option<String>,
}

impl AppState {
    /// Load every collection from the store.
    pub fn load<S: RecordStore>(store: &S) -> Result<Self, TrackerError> {
        let mut state = Self::default();
        state.reload_all(store)?;
        Ok(state)
    }

    /// Full reload. This is also the recovery path after a failed operation.
    pub fn reload_all<S: RecordStore>(&mut self, store: &S) -> Result<(), TrackerError> {
        self.begin();
        let result = (|| -> Result<_, TrackerError> {
            self.reload_projects(store)?;
            self.reload_members(store)?;
            self.reload_templates(store)?;
            Ok(())
        })();
        self.settle(result)
    }

    pub fn reload_projects<S: RecordStore>(&mut self, store: &S) -> Result<(), TrackerError> {
        self.projects = store.select_projects()?;
        debug!(count = self.projects.len(), "reloaded projects");
        Ok(())
    }

    pub fn reload_members<S: RecordStore>(&mut self, store: &S) -> Result<(), TrackerError> {
        self.team_members = store.select_members()?;
        debug!(count = self.team_members.len(), "reloaded team members");
        Ok(())
    }

    pub fn reload_templates<S: RecordStore>(&mut self, store: &S) -> Result<(), TrackerError> {
        self.templates = store.select_templates()?;
        debug!(count = self.templates.len(), "reloaded workflow templates");
        Ok(())
    }

    pub fn project(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    pub(crate) fn begin(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// Finish an operation: clear `loading` and remember the failure message.
    pub(crate) fn settle<T>(&mut self, result: Result<T, TrackerError>) -> Result<T, TrackerError> {
        self.loading = false;
        if let Err(ref e) = result {
            debug!(code = e.code.as_str(), "operation failed: {}", e.message);
            self.error = Some(e.message.clone());
        }
        result
    }
}
