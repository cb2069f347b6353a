use rusqlite::{params, Connection};

use crate::error::TrackerError;
use crate::models::TeamMember;

pub fn create_member(conn: &Connection, id: &str, name: &str) -> Result<TeamMember, TrackerError> {
    conn.execute(
        "INSERT INTO team_members (id, name) VALUES (?1, ?2)",
        params![id, name],
    )?;
    Ok(TeamMember {
        id: id.to_string(),
        name: name.to_string(),
    })
}

pub fn list_members(conn: &Connection) -> Result<Vec<TeamMember>, TrackerError> {
    let mut stmt = conn.prepare("SELECT id, name FROM team_members ORDER BY name ASC, rowid ASC")?;
    let members = stmt
        .query_map([], |row| {
            Ok(TeamMember {
                id: row.get(0)?,
                name: row.get(1)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(members)
}

pub fn delete_member(conn: &Connection, id: &str) -> Result<(), TrackerError> {
    let changed = conn.execute("DELETE FROM team_members WHERE id = ?1", params![id])?;
    if changed == 0 {
        return Err(TrackerError::member_not_found(id));
    }
    Ok(())
}
