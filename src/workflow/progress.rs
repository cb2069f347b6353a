use chrono::NaiveDate;

use crate::models::{Project, ProjectStatus, ProjectStep, StepStatus};

/// Which derived statuses a project listing keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
    All,
    Only(ProjectStatus),
}

impl StatusFilter {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "all" => Some(Self::All),
            other => ProjectStatus::from_str(other).map(Self::Only),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Only(status) => status.as_str(),
        }
    }

    pub fn matches(&self, status: ProjectStatus) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => *wanted == status,
        }
    }
}

/// Percentage of completed steps, rounded half up. 0 for a project without steps.
pub fn compute_progress(project: &Project) -> u32 {
    let total = project.steps.len() as u64;
    if total == 0 {
        return 0;
    }
    let completed = project
        .steps
        .iter()
        .filter(|s| s.status == StepStatus::Completed)
        .count() as u64;
    ((200 * completed + total) / (2 * total)) as u32
}

pub fn compute_status(project: &Project) -> ProjectStatus {
    match compute_progress(project) {
        100 => ProjectStatus::Completed,
        0 => ProjectStatus::NotStarted,
        _ => ProjectStatus::InProgress,
    }
}

/// Case-insensitive substring match on name or client, then the status filter.
/// Input order is preserved.
pub fn filter_projects<'a>(
    projects: &'a [Project],
    search_term: &str,
    status_filter: StatusFilter,
) -> Vec<&'a Project> {
    let needle = search_term.to_lowercase();
    projects
        .iter()
        .filter(|p| {
            p.name.to_lowercase().contains(&needle) || p.client.to_lowercase().contains(&needle)
        })
        .filter(|p| status_filter.matches(compute_status(p)))
        .collect()
}

/// Steps with a due date before `today` that are not completed yet.
pub fn overdue_steps(project: &Project, today: NaiveDate) -> Vec<&ProjectStep> {
    project
        .steps
        .iter()
        .filter(|s| s.status != StepStatus::Completed)
        .filter(|s| s.due_date.is_some_and(|due| due < today))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Priority;
    use StepStatus::{Blocked, Completed, InProgress, Pending};

    fn step(order: i64, status: StepStatus) -> ProjectStep {
        ProjectStep {
            id: format!("s{order}"),
            project_id: "p".into(),
            name: format!("Step {order}"),
            order,
            status,
            assignee: None,
            due_date: None,
            estimated_days: 1,
        }
    }

    fn project(name: &str, client: &str, statuses: &[StepStatus]) -> Project {
        Project {
            id: name.to_lowercase(),
            name: name.into(),
            client: client.into(),
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            priority: Priority::Medium,
            description: None,
            created_at: "2024-01-01 00:00:00".into(),
            steps: statuses
                .iter()
                .enumerate()
                .map(|(i, s)| step(i as i64 + 1, *s))
                .collect(),
        }
    }

    #[test]
    fn test_no_steps_is_not_started() {
        let p = project("Empty", "Acme", &[]);
        assert_eq!(compute_progress(&p), 0);
        assert_eq!(compute_status(&p), ProjectStatus::NotStarted);
    }

    #[test]
    fn test_progress_rounds() {
        assert_eq!(compute_progress(&project("A", "c", &[Completed, Pending, Pending])), 33);
        assert_eq!(compute_progress(&project("A", "c", &[Completed, Completed, Pending])), 67);
        assert_eq!(compute_progress(&project("A", "c", &[Completed, Pending])), 50);
        // 12.5 rounds up
        let mut statuses = vec![Pending; 7];
        statuses.push(Completed);
        assert_eq!(compute_progress(&project("A", "c", &statuses)), 13);
    }

    #[test]
    fn test_progress_stays_in_range() {
        for total in 1..=12usize {
            for done in 0..=total {
                let mut statuses = vec![Completed; done];
                statuses.extend(std::iter::repeat(Blocked).take(total - done));
                let progress = compute_progress(&project("A", "c", &statuses));
                assert!(progress <= 100);
                let expected = (100.0 * done as f64 / total as f64).round() as u32;
                assert_eq!(progress, expected, "{done}/{total}");
            }
        }
    }

    #[test]
    fn test_status_derivation() {
        assert_eq!(
            compute_status(&project("A", "c", &[Completed, Completed])),
            ProjectStatus::Completed
        );
        assert_eq!(
            compute_status(&project("A", "c", &[InProgress, Pending])),
            ProjectStatus::NotStarted
        );
        assert_eq!(
            compute_status(&project("A", "c", &[Completed, Blocked])),
            ProjectStatus::InProgress
        );
    }

    #[test]
    fn test_filter_all_keeps_everything_in_order() {
        let projects = vec![
            project("Zeta", "One", &[Completed]),
            project("Alpha", "Two", &[]),
            project("Mid", "Three", &[Completed, Pending]),
        ];
        let filtered = filter_projects(&projects, "", StatusFilter::All);
        let names: Vec<_> = filtered.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Zeta", "Alpha", "Mid"]);
    }

    #[test]
    fn test_filter_matches_client_case_insensitive() {
        let projects = vec![project("Demo", "Acme", &[]), project("Other", "Globex", &[])];
        let filtered = filter_projects(&projects, "acme", StatusFilter::All);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].name, "Demo");

        let filtered = filter_projects(&projects, "OTH", StatusFilter::All);
        assert_eq!(filtered[0].name, "Other");
    }

    #[test]
    fn test_filter_by_status() {
        let projects = vec![
            project("Done", "c", &[Completed]),
            project("Fresh", "c", &[Pending]),
            project("Half", "c", &[Completed, Pending]),
        ];
        let only = |s| filter_projects(&projects, "", StatusFilter::Only(s));
        assert_eq!(only(ProjectStatus::Completed)[0].name, "Done");
        assert_eq!(only(ProjectStatus::NotStarted)[0].name, "Fresh");
        assert_eq!(only(ProjectStatus::InProgress)[0].name, "Half");
        assert!(filter_projects(&projects, "half", StatusFilter::Only(ProjectStatus::Completed)).is_empty());
    }

    #[test]
    fn test_status_filter_parse() {
        assert_eq!(StatusFilter::from_str("all"), Some(StatusFilter::All));
        assert_eq!(
            StatusFilter::from_str("in-progress"),
            Some(StatusFilter::Only(ProjectStatus::InProgress))
        );
        assert_eq!(StatusFilter::from_str("done"), None);
    }

    #[test]
    fn test_overdue_skips_completed() {
        let mut p = project("A", "c", &[Completed, Pending, Pending]);
        let due = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        for s in &mut p.steps {
            s.due_date = Some(due);
        }
        p.steps[2].due_date = Some(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());

        let today = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        let overdue = overdue_steps(&p, today);
        assert_eq!(overdue.len(), 1);
        assert_eq!(overdue[0].order, 2);
    }
}
