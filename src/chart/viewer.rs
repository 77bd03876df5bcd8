use anyhow::{Context, Result};
use std::path::Path;
use std::process::Command;
use tracing::debug;

/// Presents a rendered document to the operator.
pub trait Viewer {
    fn show(&self, path: &Path) -> Result<()>;
}

/// Opens documents with the platform's default handler, without waiting
/// for it to exit.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemViewer;

impl SystemViewer {
    fn command(path: &Path) -> Command {
        if cfg!(target_os = "macos") {
            let mut cmd = Command::new("open");
            cmd.arg(path);
            cmd
        } else if cfg!(target_os = "windows") {
            let mut cmd = Command::new("cmd");
            cmd.args(["/C", "start", ""]).arg(path);
            cmd
        } else {
            let mut cmd = Command::new("xdg-open");
            cmd.arg(path);
            cmd
        }
    }
}

impl Viewer for SystemViewer {
    fn show(&self, path: &Path) -> Result<()> {
        let mut cmd = Self::command(path);
        debug!(command = ?cmd, "Launching viewer");
        cmd.spawn()
            .with_context(|| format!("Failed to open viewer for {}", path.display()))?;
        Ok(())
    }
}
