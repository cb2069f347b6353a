use serde_json::{json, Value};

use crate::error::TrackerError;
use crate::models::{Project, ProjectStep, TeamMember, WorkflowStepTemplate};
use crate::workflow::{compute_progress, compute_status};

pub fn print(v: &Value) {
    let text = serde_json::to_string_pretty(v).unwrap_or_else(|_| v.to_string());
    println!("{text}");
}

pub fn success(data: Value) -> Value {
    json!({
        "success": true,
        "data": data
    })
}

pub fn error(err: &TrackerError) -> Value {
    json!({
        "success": false,
        "error": {
            "code": err.code.as_str(),
            "message": err.message
        }
    })
}

pub fn project_summary(p: &Project) -> Value {
    json!({
        "id": p.id,
        "name": p.name,
        "client": p.client,
        "start_date": p.start_date.to_string(),
        "end_date": p.end_date.to_string(),
        "priority": p.priority.as_str(),
        "status": compute_status(p).as_str(),
        "progress": compute_progress(p),
        "step_count": p.steps.len()
    })
}

pub fn project_detail(p: &Project) -> Value {
    let mut v = project_summary(p);
    v["description"] = json!(p.description);
    v["created_at"] = json!(p.created_at);
    v["steps"] = json!(p.steps.iter().map(step_json).collect::<Vec<_>>());
    v
}

pub fn step_json(s: &ProjectStep) -> Value {
    json!({
        "id": s.id,
        "name": s.name,
        "order": s.order,
        "status": s.status.as_str(),
        "assignee": s.assignee,
        "due_date": s.due_date.map(|d| d.to_string()),
        "estimated_days": s.estimated_days
    })
}

pub fn template_json(t: &WorkflowStepTemplate) -> Value {
    json!({
        "id": t.id,
        "name": t.name,
        "order": t.order,
        "estimated_days": t.estimated_days
    })
}

pub fn member_json(m: &TeamMember) -> Value {
    json!({
        "id": m.id,
        "name": m.name
    })
}
