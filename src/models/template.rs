use serde::{Deserialize, Serialize};

/// One reusable step definition. New projects copy the current list of these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowStepTemplate {
    pub id: String,
    pub name: String,
    pub order: i64,
    pub estimated_days: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTemplate {
    pub name: String,
    pub order: i64,
    pub estimated_days: u32,
}

/// Partial update of a template. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplatePatch {
    pub name: Option<String>,
    pub order: Option<i64>,
    pub estimated_days: Option<u32>,
}

impl TemplatePatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.order.is_none() && self.estimated_days.is_none()
    }
}
