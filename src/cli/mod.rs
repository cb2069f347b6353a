pub mod commands;
pub mod init;
pub mod project;
pub mod resolve;
pub mod status;
pub mod step;
pub mod team;
pub mod template;

pub use commands::*;

use crate::error::TrackerError;
use crate::output;

/// Map a command result to an exit code, reporting the error on the way.
pub(crate) fn finish(result: Result<i32, TrackerError>, json_output: bool) -> i32 {
    match result {
        Ok(code) => code,
        Err(e) => {
            if json_output {
                output::json::print(&output::json::error(&e));
            } else {
                eprintln!("Error: {}", e.message);
            }
            1
        }
    }
}
