pub mod member;
pub mod project;
pub mod step;
pub mod template;

pub use member::*;
pub use project::*;
pub use step::*;
pub use template::*;
