use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};

/// Write the default configuration file (never overwrites).
pub fn handle() -> AppResult<()> {
    let existed = Config::config_file().exists();
    let path = Config::init()?;

    if existed {
        info(format!("Config file already present: {}", path.display()));
    } else {
        success(format!("Config file: {}", path.display()));
        info("Edit `endpoint` to point at the shared table store.");
    }
    Ok(())
}
