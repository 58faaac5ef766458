use std::fs::{self, File};
use std::path::Path;

use color_eyre::eyre::{Result, WrapErr, eyre};
use tracing_subscriber::fmt::format::FmtSpan;

/// Sends JSON-lines tracing output to `output_path`, truncating it first.
///
/// The TUI owns the terminal, so logging only ever goes to a file.
pub fn init_tracing_json(output_path: &Path) -> Result<()> {
    ensure_parent_dir(output_path)?;
    let file = File::create(output_path)
        .wrap_err_with(|| format!("cannot create log file {}", output_path.display()))?;

    let subscriber = tracing_subscriber::fmt()
        .with_ansi(false)
        .json()
        .with_span_events(FmtSpan::CLOSE)
        .with_max_level(tracing::Level::DEBUG)
        .with_writer(std::sync::Mutex::new(file))
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| eyre!("failed to set tracing subscriber: {e}"))?;
    Ok(())
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}
