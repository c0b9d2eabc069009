//! The render invoker: persists an assembled draw script to a request-scoped
//! temporary file and shells out to ImageMagick to rasterize it.

use std::{
    path::{Path, PathBuf},
    process::Command,
    sync::atomic::{AtomicU64, Ordering},
};

use crate::error::{LogosmithError, LogosmithResult};

#[derive(Clone, Debug)]
pub struct RenderConfig {
    pub canvas_width: u32,
    pub canvas_height: u32,
    /// Canvas fill passed to the rasterizer as `xc:{background}`.
    pub background: String,
    /// External rasterizer executable, resolved via PATH.
    pub magick_bin: String,
    /// Flat directory holding generated PNGs and transient script files.
    pub output_dir: PathBuf,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            canvas_width: 400,
            canvas_height: 500,
            background: "white".to_string(),
            magick_bin: "magick".to_string(),
            output_dir: PathBuf::from("generated"),
        }
    }
}

impl RenderConfig {
    pub fn validate(&self) -> LogosmithResult<()> {
        if self.canvas_width == 0 || self.canvas_height == 0 {
            return Err(LogosmithError::validation(
                "canvas width/height must be non-zero",
            ));
        }
        if self.background.trim().is_empty() {
            return Err(LogosmithError::validation(
                "canvas background must be non-empty",
            ));
        }
        if self.magick_bin.trim().is_empty() {
            return Err(LogosmithError::validation(
                "rasterizer executable name must be non-empty",
            ));
        }
        Ok(())
    }

    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }
}

pub fn is_magick_on_path(bin: &str) -> bool {
    Command::new(bin)
        .arg("-version")
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

pub fn ensure_output_dir(dir: &Path) -> LogosmithResult<()> {
    use anyhow::Context as _;
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create output directory '{}'", dir.display()))?;
    Ok(())
}

/// Rasterize `script` into `out_path` on the configured canvas.
///
/// The script is written to a temporary file unique to this call, so
/// concurrent renders never read each other's commands. The file is removed
/// on every exit path, success and failure alike.
pub fn render_script(cfg: &RenderConfig, script: &str, out_path: &Path) -> LogosmithResult<()> {
    cfg.validate()?;
    ensure_output_dir(&cfg.output_dir)?;

    let script_file = ScriptFile::create(&cfg.output_dir, script)?;

    tracing::debug!(
        script = %script_file.path().display(),
        out = %out_path.display(),
        "invoking rasterizer"
    );

    let output = Command::new(&cfg.magick_bin)
        .arg("-size")
        .arg(format!("{}x{}", cfg.canvas_width, cfg.canvas_height))
        .arg(format!("xc:{}", cfg.background))
        .arg("-draw")
        .arg(format!("@{}", script_file.path().display()))
        .arg(out_path)
        .output()
        .map_err(|e| {
            LogosmithError::render(format!(
                "failed to launch '{}' (is ImageMagick installed and on PATH?): {e}",
                cfg.magick_bin
            ))
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(LogosmithError::render(format!(
            "'{}' exited with status {}: {}",
            cfg.magick_bin,
            output.status,
            stderr.trim()
        )));
    }

    Ok(())
}

static SCRIPT_SEQ: AtomicU64 = AtomicU64::new(0);

/// A transient on-disk draw script, removed when the guard drops.
struct ScriptFile {
    path: PathBuf,
}

impl ScriptFile {
    fn create(dir: &Path, script: &str) -> LogosmithResult<Self> {
        use anyhow::Context as _;
        let seq = SCRIPT_SEQ.fetch_add(1, Ordering::Relaxed);
        let path = dir.join(format!("cmds-{}-{seq}.mvg", std::process::id()));
        std::fs::write(&path, script)
            .with_context(|| format!("failed to write draw script '{}'", path.display()))?;
        Ok(Self { path })
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ScriptFile {
    fn drop(&mut self) {
        if let Err(err) = std::fs::remove_file(&self.path) {
            tracing::warn!(
                path = %self.path.display(),
                %err,
                "failed to remove transient draw script"
            );
        }
    }
}
