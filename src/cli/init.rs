use serde_json::json;

use crate::config::Config;
use crate::db::connection;
use crate::error::TrackerError;
use crate::output;
use crate::state::AppState;
use crate::workflow::templates;

pub fn run(empty: bool, json_output: bool) -> i32 {
    super::finish(run_inner(empty, json_output), json_output)
}

fn run_inner(empty: bool, json_output: bool) -> Result<i32, TrackerError> {
    let root = connection::init_root()?;
    let (path, store) = connection::init_store(&root)?;
    Config::write_default_if_missing(&connection::config_path_in(&root))?;

    let mut state = AppState::load(&store)?;
    let seeded = if empty {
        0
    } else {
        templates::seed_defaults(&store, &mut state)?
    };

    if json_output {
        output::json::print(&output::json::success(json!({
            "path": path.to_string_lossy(),
            "seeded_templates": seeded
        })));
    } else {
        println!("Initialized reeltrack at {}", path.display());
        if seeded > 0 {
            println!("Seeded {seeded} default workflow steps.");
        }
    }
    Ok(0)
}
