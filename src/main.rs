//! rPlanner main entrypoint.

use rplanner::run;
use rplanner::ui::messages::error;

fn main() {
    if let Err(e) = run() {
        error(format!("Error: {}", e));
        std::process::exit(1);
    }
}
