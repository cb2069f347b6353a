use crate::models::{Project, ProjectStep, TeamMember, WorkflowStepTemplate};
use crate::workflow::{compute_progress, compute_status};

fn short_id(id: &str) -> &str {
    &id[..std::cmp::min(8, id.len())]
}

pub fn print_project(p: &Project) {
    println!("Project: {} ({})", p.name, p.id);
    println!("  Client: {}", p.client);
    println!("  Dates: {} → {}", p.start_date, p.end_date);
    println!("  Priority: {}", p.priority.as_str());
    if let Some(ref desc) = p.description {
        println!("  Description: {desc}");
    }
    println!(
        "  Status: {} ({}%)",
        compute_status(p).as_str(),
        compute_progress(p)
    );
    println!("  Created: {}", p.created_at);
}

pub fn print_project_list(projects: &[&Project]) {
    if projects.is_empty() {
        println!("No projects found.");
        return;
    }
    for p in projects {
        println!(
            "  {} ({}) [{} {}%] {} - {} p={}",
            p.name,
            short_id(&p.id),
            compute_status(p).as_str(),
            compute_progress(p),
            p.client,
            p.end_date,
            p.priority.as_str()
        );
    }
}

pub fn print_step_list(steps: &[ProjectStep]) {
    if steps.is_empty() {
        println!("No steps.");
        return;
    }
    for (i, s) in steps.iter().enumerate() {
        let mut extra = String::new();
        if let Some(ref assignee) = s.assignee {
            extra.push_str(&format!(" @{assignee}"));
        }
        if let Some(due) = s.due_date {
            extra.push_str(&format!(" due {due}"));
        }
        println!(
            "  {}. [{}] {} ({}d){}",
            i + 1,
            s.status.as_str(),
            s.name,
            s.estimated_days,
            extra
        );
    }
}

pub fn print_template_list(templates: &[WorkflowStepTemplate]) {
    if templates.is_empty() {
        println!("No workflow steps defined.");
        return;
    }
    for t in templates {
        println!("  {:>3}. {} ({}d) [{}]", t.order, t.name, t.estimated_days, short_id(&t.id));
    }
}

pub fn print_member_list(members: &[TeamMember]) {
    if members.is_empty() {
        println!("No team members.");
        return;
    }
    for m in members {
        println!("  {} ({})", m.name, short_id(&m.id));
    }
}
