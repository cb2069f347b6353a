pub mod lifecycle;
pub mod progress;
pub mod roster;
pub mod templates;

pub use progress::{compute_progress, compute_status, filter_projects, StatusFilter};
