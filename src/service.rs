//! Request orchestration: assemble → name → render, one call per request.

use std::path::PathBuf;

use crate::{
    error::LogosmithResult,
    model::LogoRequest,
    render::{RenderConfig, ensure_output_dir, render_script},
    sanitize::logo_filename,
    script::assemble_script,
};

/// Metadata returned for a successful generation.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct GeneratedLogo {
    /// Output basename, e.g. `logo_Acme_chair.png`.
    pub image: String,
    /// Relative fetch URL, e.g. `/images/logo_Acme_chair.png`.
    pub url: String,
    /// Echo of the request that produced the image, defaults resolved.
    pub request: LogoRequest,
}

#[derive(Clone, Debug)]
pub struct LogoService {
    cfg: RenderConfig,
}

impl LogoService {
    /// Validate the config and make sure the output directory exists.
    pub fn new(cfg: RenderConfig) -> LogosmithResult<Self> {
        cfg.validate()?;
        ensure_output_dir(&cfg.output_dir)?;
        Ok(Self { cfg })
    }

    pub fn config(&self) -> &RenderConfig {
        &self.cfg
    }

    /// Generate one logo: assemble the script, derive the filename, invoke
    /// the rasterizer, and report where the image landed.
    #[tracing::instrument(skip(self, req), fields(shape = %req.shape))]
    pub fn generate(&self, req: &LogoRequest) -> LogosmithResult<GeneratedLogo> {
        let shape = req.shape()?;
        let script = assemble_script(req)?;
        let filename = logo_filename(&req.text, shape);
        let out_path = self.cfg.output_dir.join(&filename);

        render_script(&self.cfg, &script, &out_path)?;

        tracing::info!(image = %filename, "rendered logo");
        Ok(GeneratedLogo {
            url: format!("/images/{filename}"),
            image: filename,
            request: req.clone(),
        })
    }

    /// Resolve a previously generated image by basename.
    ///
    /// Returns `None` for names that are absent from the output directory or
    /// that try to point outside it.
    pub fn image_path(&self, filename: &str) -> Option<PathBuf> {
        if filename.is_empty()
            || filename.contains('/')
            || filename.contains('\\')
            || filename.contains("..")
        {
            return None;
        }
        let path = self.cfg.output_dir.join(filename);
        path.is_file().then_some(path)
    }
}
