pub mod activities;
pub mod calendar;
pub mod config;
pub mod export;
pub mod init;
pub mod progress;
pub mod tasks;

use crate::errors::AppResult;
use crate::sync::ApplyOutcome;
use crate::ui::messages::{info, success, warning};
use std::io::{self, Write};

/// Ask a yes/no confirmation from the user
pub(crate) fn ask_confirmation(prompt: &str) -> bool {
    warning(prompt);
    print!("Confirm [y/N]: ");
    let _ = io::stdout().flush();

    let mut s = String::new();
    if io::stdin().read_line(&mut s).is_ok() {
        matches!(s.trim().to_lowercase().as_str(), "y" | "yes")
    } else {
        false
    }
}

/// Report the result of a mutation. On failure the change was not saved and
/// the local view may be stale, so point the user back to a fresh listing.
pub(crate) fn report(result: AppResult<ApplyOutcome>, done: &str, list_hint: &str) -> AppResult<()> {
    match result {
        Ok(outcome) if outcome.written => {
            success(done);
            Ok(())
        }
        Ok(_) => {
            info("Nothing to change.");
            Ok(())
        }
        Err(e) => {
            warning(format!("Change NOT saved. Run `{list_hint}` to see the current shared state."));
            Err(e)
        }
    }
}
