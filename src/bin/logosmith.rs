use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "logosmith", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP API server.
    Serve(ServeArgs),
    /// Render a single logo PNG without starting the server.
    Render(RenderArgs),
}

#[derive(Parser, Debug)]
struct ServeArgs {
    /// Bind address.
    #[arg(long, default_value = "127.0.0.1:8080")]
    addr: String,

    /// Directory generated PNGs are written to.
    #[arg(long, default_value = "generated")]
    output_dir: PathBuf,

    /// Directory the landing page and /static assets are served from.
    #[arg(long, default_value = "static")]
    static_dir: PathBuf,

    /// Worker threads accepting requests.
    #[arg(long, default_value_t = 4)]
    workers: usize,

    /// Rasterizer executable (requires ImageMagick on PATH).
    #[arg(long, default_value = "magick")]
    magick_bin: String,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Shape to draw.
    #[arg(long, default_value = "none")]
    shape: String,

    /// Text overlay; empty for none.
    #[arg(long, default_value = "")]
    text: String,

    /// Shape stroke color.
    #[arg(long, default_value = "black")]
    color: String,

    /// Text fill color.
    #[arg(long, default_value = "white")]
    text_color: String,

    /// Uniform scale applied to all shape coordinates.
    #[arg(long, default_value_t = 1.0)]
    scale: f64,

    #[arg(long, default_value_t = 24)]
    font_size: u32,

    #[arg(long, default_value_t = 150)]
    text_x: i32,

    #[arg(long, default_value_t = 350)]
    text_y: i32,

    /// Directory the PNG is written to.
    #[arg(long, default_value = "generated")]
    output_dir: PathBuf,

    /// Rasterizer executable (requires ImageMagick on PATH).
    #[arg(long, default_value = "magick")]
    magick_bin: String,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Serve(args) => cmd_serve(args),
        Command::Render(args) => cmd_render(args),
    }
}

fn cmd_serve(args: ServeArgs) -> anyhow::Result<()> {
    if !logosmith::is_magick_on_path(&args.magick_bin) {
        tracing::warn!(
            bin = %args.magick_bin,
            "rasterizer not found on PATH; generation requests will fail"
        );
    }

    let cfg = logosmith::ServerConfig {
        addr: args.addr,
        static_dir: args.static_dir,
        workers: args.workers,
        render: logosmith::RenderConfig {
            magick_bin: args.magick_bin,
            ..logosmith::RenderConfig::default()
        }
        .with_output_dir(args.output_dir),
    };

    logosmith::serve(cfg)?;
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let cfg = logosmith::RenderConfig {
        magick_bin: args.magick_bin,
        ..logosmith::RenderConfig::default()
    }
    .with_output_dir(args.output_dir);
    let service = logosmith::LogoService::new(cfg)?;

    let req = logosmith::LogoRequest {
        shape: args.shape,
        text: args.text,
        color: args.color,
        text_color: args.text_color,
        scale: args.scale,
        font_size: args.font_size,
        text_x: args.text_x,
        text_y: args.text_y,
    };

    let generated = service.generate(&req)?;
    let out = service.config().output_dir.join(&generated.image);
    eprintln!("wrote {}", out.display());
    Ok(())
}
