use rusqlite::{params, Connection, OptionalExtension};

use crate::error::TrackerError;
use crate::models::{NewTemplate, TemplatePatch, WorkflowStepTemplate};

pub fn create_template(
    conn: &Connection,
    id: &str,
    template: &NewTemplate,
) -> Result<WorkflowStepTemplate, TrackerError> {
    conn.execute(
        "INSERT INTO workflow_templates (id, name, sort_order, estimated_days) VALUES (?1, ?2, ?3, ?4)",
        params![id, template.name, template.order, template.estimated_days],
    )?;
    get_template_by_id(conn, id)
}

pub fn get_template_by_id(conn: &Connection, id: &str) -> Result<WorkflowStepTemplate, TrackerError> {
    conn.query_row(
        "SELECT id, name, sort_order, estimated_days FROM workflow_templates WHERE id = ?1",
        params![id],
        row_to_template,
    )
    .map_err(|e| match e {
        rusqlite::Error::QueryReturnedNoRows => TrackerError::template_not_found(id),
        _ => TrackerError::from(e),
    })
}

pub fn list_templates(conn: &Connection) -> Result<Vec<WorkflowStepTemplate>, TrackerError> {
    let mut stmt = conn.prepare(
        "SELECT id, name, sort_order, estimated_days FROM workflow_templates
         ORDER BY sort_order ASC, rowid ASC",
    )?;
    let templates = stmt
        .query_map([], row_to_template)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(templates)
}

/// Apply the set fields of `patch`. An empty patch only checks existence.
pub fn update_template(conn: &Connection, id: &str, patch: &TemplatePatch) -> Result<(), TrackerError> {
    if let Some(order) = patch.order {
        let taken: Option<String> = conn
            .query_row(
                "SELECT name FROM workflow_templates WHERE sort_order = ?1 AND id != ?2",
                params![order, id],
                |row| row.get(0),
            )
            .optional()?;
        if let Some(name) = taken {
            return Err(TrackerError::validation(format!(
                "Order {order} is already used by workflow step '{name}'"
            )));
        }
    }

    let changed = conn.execute(
        "UPDATE workflow_templates SET
             name = COALESCE(?1, name),
             sort_order = COALESCE(?2, sort_order),
             estimated_days = COALESCE(?3, estimated_days)
         WHERE id = ?4",
        params![patch.name, patch.order, patch.estimated_days, id],
    )?;
    if changed == 0 {
        return Err(TrackerError::template_not_found(id));
    }
    Ok(())
}

/// Exchange the orders of two templates in one transaction. The first row
/// parks on an unused order while the second takes its place.
pub fn swap_template_orders(conn: &Connection, first_id: &str, second_id: &str) -> Result<(), TrackerError> {
    conn.execute_batch("BEGIN IMMEDIATE")?;
    let result = (|| -> Result<_, TrackerError> {
        let first = get_template_by_id(conn, first_id)?;
        let second = get_template_by_id(conn, second_id)?;
        conn.execute(
            "UPDATE workflow_templates
             SET sort_order = (SELECT MIN(sort_order) FROM workflow_templates) - 1
             WHERE id = ?1",
            params![first.id],
        )?;
        conn.execute(
            "UPDATE workflow_templates SET sort_order = ?1 WHERE id = ?2",
            params![first.order, second.id],
        )?;
        conn.execute(
            "UPDATE workflow_templates SET sort_order = ?1 WHERE id = ?2",
            params![second.order, first.id],
        )?;
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

pub fn delete_template(conn: &Connection, id: &str) -> Result<(), TrackerError> {
    let changed = conn.execute("DELETE FROM workflow_templates WHERE id = ?1", params![id])?;
    if changed == 0 {
        return Err(TrackerError::template_not_found(id));
    }
    Ok(())
}

fn row_to_template(row: &rusqlite::Row) -> rusqlite::Result<WorkflowStepTemplate> {
    Ok(WorkflowStepTemplate {
        id: row.get(0)?,
        name: row.get(1)?,
        order: row.get(2)?,
        estimated_days: row.get(3)?,
    })
}
