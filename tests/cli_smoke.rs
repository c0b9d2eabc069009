use std::path::PathBuf;

use logosmith::is_magick_on_path;

#[test]
fn cli_render_writes_png() {
    if !is_magick_on_path("magick") {
        eprintln!("skipping cli_render_writes_png: magick not on PATH");
        return;
    }

    let dir = PathBuf::from("target").join("cli_smoke").join("generated");
    std::fs::create_dir_all(&dir).unwrap();
    let out_path = dir.join("logo_Smoke_chair.png");
    let _ = std::fs::remove_file(&out_path);

    let exe = std::env::var_os("CARGO_BIN_EXE_logosmith")
        .map(PathBuf::from)
        .unwrap_or_else(|| {
            let mut p = PathBuf::from("target").join("debug");
            p.push(if cfg!(windows) {
                "logosmith.exe"
            } else {
                "logosmith"
            });
            p
        });

    let dir_arg = dir.to_string_lossy().to_string();
    let status = std::process::Command::new(exe)
        .args([
            "render",
            "--shape",
            "chair",
            "--text",
            "Smoke",
            "--color",
            "brown",
            "--output-dir",
        ])
        .arg(dir_arg.as_str())
        .status()
        .unwrap();

    assert!(status.success());
    assert!(out_path.exists());
}
