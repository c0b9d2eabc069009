//! Logosmith is a small HTTP service that assembles ImageMagick draw scripts
//! from a parameterized shape library and shells out to `magick` to rasterize
//! them into PNG logos.
//!
//! The library is usable without the HTTP surface: build a [`LogoRequest`],
//! hand it to a [`LogoService`], and fetch the written PNG from the output
//! directory.
#![forbid(unsafe_code)]

pub mod error;
pub mod http;
pub mod model;
pub mod render;
pub mod sanitize;
pub mod script;
pub mod service;
pub mod shapes;

pub use error::{LogosmithError, LogosmithResult};
pub use http::{LogoServer, ServerConfig, serve};
pub use model::{LogoRequest, Shape};
pub use render::{RenderConfig, is_magick_on_path, render_script};
pub use sanitize::{logo_filename, sanitize_component};
pub use script::{assemble_script, escape_text};
pub use service::{GeneratedLogo, LogoService};
