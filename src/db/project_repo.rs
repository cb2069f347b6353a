use std::collections::HashMap;

use rusqlite::{params, Connection};

use crate::error::TrackerError;
use crate::models::{NewProject, Priority, Project};

use super::step_repo;

pub fn create_project(conn: &Connection, id: &str, project: &NewProject) -> Result<Project, TrackerError> {
    conn.execute(
        "INSERT INTO projects (id, name, client, start_date, end_date, priority, description)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            id,
            project.name,
            project.client,
            project.start_date,
            project.end_date,
            project.priority.as_str(),
            project.description,
        ],
    )?;
    get_project_by_id(conn, id)
}

pub fn get_project_by_id(conn: &Connection, id: &str) -> Result<Project, TrackerError> {
    let mut project = conn
        .query_row(
            "SELECT id, name, client, start_date, end_date, priority, description, created_at
             FROM projects WHERE id = ?1",
            params![id],
            row_to_project,
        )
        .map_err(|e| match e {
            rusqlite::Error::QueryReturnedNoRows => TrackerError::project_not_found(id),
            _ => TrackerError::from(e),
        })?;
    project.steps = step_repo::list_steps_by_project(conn, id)?;
    Ok(project)
}

/// All projects, newest first, with their steps attached.
pub fn list_projects(conn: &Connection) -> Result<Vec<Project>, TrackerError> {
    let mut stmt = conn.prepare(
        "SELECT id, name, client, start_date, end_date, priority, description, created_at
         FROM projects ORDER BY created_at DESC, rowid DESC",
    )?;
    let mut projects = stmt
        .query_map([], row_to_project)?
        .collect::<Result<Vec<_>, _>>()?;

    let mut steps_by_project = HashMap::new();
    for step in step_repo::list_all_steps(conn)? {
        steps_by_project
            .entry(step.project_id.clone())
            .or_insert_with(Vec::new)
            .push(step);
    }
    for project in &mut projects {
        project.steps = steps_by_project.remove(&project.id).unwrap_or_default();
    }
    Ok(projects)
}

pub fn delete_project(conn: &Connection, id: &str) -> Result<(), TrackerError> {
    let changed = conn.execute("DELETE FROM projects WHERE id = ?1", params![id])?;
    if changed == 0 {
        return Err(TrackerError::project_not_found(id));
    }
    Ok(())
}

fn row_to_project(row: &rusqlite::Row) -> rusqlite::Result<Project> {
    Ok(Project {
        id: row.get(0)?,
        name: row.get(1)?,
        client: row.get(2)?,
        start_date: row.get(3)?,
        end_date: row.get(4)?,
        priority: Priority::from_str(&row.get::<_, String>(5)?).unwrap_or_default(),
        description: row.get(6)?,
        created_at: row.get(7)?,
        steps: Vec::new(),
    })
}
