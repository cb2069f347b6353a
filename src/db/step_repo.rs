use rusqlite::{params, Connection};

use crate::error::TrackerError;
use crate::models::{NewProjectStep, ProjectStep, StepStatus, StepUpdate};

/// Insert a batch of steps atomically: either every row lands or none does.
pub fn create_steps(conn: &Connection, steps: &[NewProjectStep]) -> Result<(), TrackerError> {
    if steps.is_empty() {
        return Ok(());
    }

    conn.execute_batch("BEGIN IMMEDIATE")?;
    let result = (|| -> Result<_, TrackerError> {
        let mut stmt = conn.prepare(
            "INSERT INTO project_steps (id, project_id, name, sort_order, status, estimated_days)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )?;
        for step in steps {
            let id = ulid::Ulid::new().to_string();
            stmt.execute(params![
                id,
                step.project_id,
                step.name,
                step.order,
                step.status.as_str(),
                step.estimated_days,
            ])?;
        }
        Ok(())
    })();

    match result {
        Ok(()) => {
            conn.execute_batch("COMMIT")?;
            Ok(())
        }
        Err(e) => {
            let _ = conn.execute_batch("ROLLBACK");
            Err(e)
        }
    }
}

pub fn list_steps_by_project(conn: &Connection, project_id: &str) -> Result<Vec<ProjectStep>, TrackerError> {
    let mut stmt = conn.prepare(
        "SELECT id, project_id, name, sort_order, status, assignee, due_date, estimated_days
         FROM project_steps WHERE project_id = ?1 ORDER BY sort_order ASC, rowid ASC",
    )?;
    let steps = stmt
        .query_map(params![project_id], row_to_step)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(steps)
}

pub fn list_all_steps(conn: &Connection) -> Result<Vec<ProjectStep>, TrackerError> {
    let mut stmt = conn.prepare(
        "SELECT id, project_id, name, sort_order, status, assignee, due_date, estimated_days
         FROM project_steps ORDER BY project_id, sort_order ASC, rowid ASC",
    )?;
    let steps = stmt
        .query_map([], row_to_step)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(steps)
}

pub fn update_step(conn: &Connection, id: &str, update: &StepUpdate) -> Result<(), TrackerError> {
    let changed = match update {
        StepUpdate::Status(status) => conn.execute(
            "UPDATE project_steps SET status = ?1 WHERE id = ?2",
            params![status.as_str(), id],
        )?,
        StepUpdate::Assignee(assignee) => conn.execute(
            "UPDATE project_steps SET assignee = ?1 WHERE id = ?2",
            params![assignee, id],
        )?,
        StepUpdate::DueDate(due_date) => conn.execute(
            "UPDATE project_steps SET due_date = ?1 WHERE id = ?2",
            params![due_date, id],
        )?,
    };
    if changed == 0 {
        return Err(TrackerError::step_not_found(id));
    }
    Ok(())
}

fn row_to_step(row: &rusqlite::Row) -> rusqlite::Result<ProjectStep> {
    Ok(ProjectStep {
        id: row.get(0)?,
        project_id: row.get(1)?,
        name: row.get(2)?,
        order: row.get(3)?,
        status: StepStatus::from_str(&row.get::<_, String>(4)?).unwrap_or(StepStatus::Pending),
        assignee: row.get(5)?,
        due_date: row.get(6)?,
        estimated_days: row.get(7)?,
    })
}
