use rusqlite::Connection;

use crate::error::TrackerError;
use crate::models::{
    NewProject, NewProjectStep, NewTemplate, Project, StepUpdate, TeamMember, TemplatePatch,
    WorkflowStepTemplate,
};
use crate::store::RecordStore;

use super::{connection, member_repo, migrations, project_repo, step_repo, template_repo};

/// `RecordStore` over a single SQLite connection.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    /// Fresh, migrated in-memory database.
    pub fn open_in_memory() -> Result<Self, TrackerError> {
        let conn = Connection::open_in_memory()?;
        connection::configure_connection(&conn)?;
        migrations::run_migrations(&conn)?;
        Ok(Self::new(conn))
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl RecordStore for SqliteStore {
    fn select_templates(&self) -> Result<Vec<WorkflowStepTemplate>, TrackerError> {
        template_repo::list_templates(&self.conn)
    }

    fn insert_template(&self, template: &NewTemplate) -> Result<WorkflowStepTemplate, TrackerError> {
        let id = ulid::Ulid::new().to_string();
        template_repo::create_template(&self.conn, &id, template)
    }

    fn update_template(&self, id: &str, patch: &TemplatePatch) -> Result<(), TrackerError> {
        template_repo::update_template(&self.conn, id, patch)
    }

    fn swap_template_orders(&self, first_id: &str, second_id: &str) -> Result<(), TrackerError> {
        template_repo::swap_template_orders(&self.conn, first_id, second_id)
    }

    fn delete_template(&self, id: &str) -> Result<(), TrackerError> {
        template_repo::delete_template(&self.conn, id)
    }

    fn select_projects(&self) -> Result<Vec<Project>, TrackerError> {
        project_repo::list_projects(&self.conn)
    }

    fn insert_project(&self, project: &NewProject) -> Result<Project, TrackerError> {
        let id = ulid::Ulid::new().to_string();
        project_repo::create_project(&self.conn, &id, project)
    }

    fn delete_project(&self, id: &str) -> Result<(), TrackerError> {
        project_repo::delete_project(&self.conn, id)
    }

    fn insert_steps(&self, steps: &[NewProjectStep]) -> Result<(), TrackerError> {
        step_repo::create_steps(&self.conn, steps)
    }

    fn update_step(&self, id: &str, update: &StepUpdate) -> Result<(), TrackerError> {
        step_repo::update_step(&self.conn, id, update)
    }

    fn select_members(&self) -> Result<Vec<TeamMember>, TrackerError> {
        member_repo::list_members(&self.conn)
    }

    fn insert_member(&self, name: &str) -> Result<TeamMember, TrackerError> {
        let id = ulid::Ulid::new().to_string();
        member_repo::create_member(&self.conn, &id, name)
    }

    fn delete_member(&self, id: &str) -> Result<(), TrackerError> {
        member_repo::delete_member(&self.conn, id)
    }
}
