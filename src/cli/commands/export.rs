use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::export::export_rows;
use crate::sync::RemoteSession;
use std::path::Path;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        table,
        format,
        file,
        force,
    } = cmd
    {
        let session = RemoteSession::connect(cfg)?;
        // always the authoritative copy, never the view cache
        let rows = session.writer().load(table)?;
        export_rows(&rows, format, Path::new(file), *force)?;
    }
    Ok(())
}
