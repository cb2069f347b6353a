use crate::error::TrackerError;
use crate::models::{
    NewProject, NewProjectStep, NewTemplate, Project, StepUpdate, TeamMember, TemplatePatch,
    WorkflowStepTemplate,
};

/// Persistent record store behind the managers.
///
/// Every call is independent: nothing here spans more than one call in a
/// transaction, so callers that issue several writes own any cleanup.
pub trait RecordStore {
    /// All templates, ascending by order.
    fn select_templates(&self) -> Result<Vec<WorkflowStepTemplate>, TrackerError>;
    fn insert_template(&self, template: &NewTemplate) -> Result<WorkflowStepTemplate, TrackerError>;
    fn update_template(&self, id: &str, patch: &TemplatePatch) -> Result<(), TrackerError>;
    /// Exchange the orders of two templates atomically.
    fn swap_template_orders(&self, first_id: &str, second_id: &str) -> Result<(), TrackerError>;
    fn delete_template(&self, id: &str) -> Result<(), TrackerError>;

    /// All projects, newest first, each with its steps ascending by order.
    fn select_projects(&self) -> Result<Vec<Project>, TrackerError>;
    fn insert_project(&self, project: &NewProject) -> Result<Project, TrackerError>;
    /// Removes the project together with its steps.
    fn delete_project(&self, id: &str) -> Result<(), TrackerError>;

    fn insert_steps(&self, steps: &[NewProjectStep]) -> Result<(), TrackerError>;
    fn update_step(&self, id: &str, update: &StepUpdate) -> Result<(), TrackerError>;

    fn select_members(&self) -> Result<Vec<TeamMember>, TrackerError>;
    fn insert_member(&self, name: &str) -> Result<TeamMember, TrackerError>;
    fn delete_member(&self, id: &str) -> Result<(), TrackerError>;
}
