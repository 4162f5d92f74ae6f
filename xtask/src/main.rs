//! Build automation tasks for vpad-player
//!
//! Usage:
//!   cargo xtask build-web       # Build WASM and assemble dist/web
//!   cargo xtask package         # Zip dist/web for upload

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::Command;

const MQ_JS_BUNDLE_URL: &str =
    "https://raw.githubusercontent.com/not-fl3/macroquad/v0.4.14/js/mq_js_bundle.js";

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Build automation for vpad-player")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build WASM and copy the page, plugin and assets to dist/web
    BuildWeb {
        /// Mark as dev build (adds DEV to the page title)
        #[arg(long)]
        dev: bool,
    },
    /// Create dist/vpad-player-web.zip from dist/web
    Package,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::BuildWeb { dev } => build_web(dev),
        Commands::Package => package(),
    }
}

/// Get the project root directory
fn project_root() -> Result<PathBuf> {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .map(Path::to_path_buf)
        .context("xtask must live one level below the project root")
}

/// Run a command and check for success
fn run_cmd(cmd: &mut Command) -> Result<()> {
    let status = cmd.status().context("Failed to execute command")?;
    if !status.success() {
        anyhow::bail!("Command failed with status: {}", status);
    }
    Ok(())
}

/// Copy directory recursively
fn copy_dir_recursive(src: &Path, dst: &Path) -> Result<()> {
    std::fs::create_dir_all(dst)?;
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

fn build_web(dev: bool) -> Result<()> {
    let root = project_root()?;
    let dist = root.join("dist/web");

    println!("Building WASM...");
    run_cmd(
        Command::new("cargo")
            .current_dir(&root)
            .args(["build", "--release", "--target", "wasm32-unknown-unknown", "--bin", "vpad-player"]),
    )?;

    if dist.exists() {
        std::fs::remove_dir_all(&dist)?;
    }
    std::fs::create_dir_all(&dist)?;

    println!("Copying files to dist/web...");
    std::fs::copy(
        root.join("target/wasm32-unknown-unknown/release/vpad-player.wasm"),
        dist.join("vpad-player.wasm"),
    )
    .context("WASM binary missing after build")?;

    copy_dir_recursive(&root.join("web"), &dist)?;
    copy_dir_recursive(&root.join("assets"), &dist.join("assets"))?;
    let config = root.join("vpad.ron");
    if config.exists() {
        std::fs::copy(&config, dist.join("vpad.ron"))?;
    }

    let mq_js = dist.join("mq_js_bundle.js");
    println!("Downloading {}...", MQ_JS_BUNDLE_URL);
    run_cmd(Command::new("curl").args(["-L", "-o"]).arg(&mq_js).arg(MQ_JS_BUNDLE_URL))?;

    if dev {
        println!("Applying DEV build modifications...");
        let index_path = dist.join("index.html");
        let index = std::fs::read_to_string(&index_path)?;
        std::fs::write(&index_path, index.replace("<title>vpad-player", "<title>[DEV] vpad-player"))?;
    }

    println!("Web build complete: dist/web/");
    Ok(())
}

fn package() -> Result<()> {
    build_web(false)?;

    let dist = project_root()?.join("dist");
    let zip_path = dist.join("vpad-player-web.zip");
    if zip_path.exists() {
        std::fs::remove_file(&zip_path)?;
    }

    println!("Creating zip...");
    run_cmd(
        Command::new("zip")
            .current_dir(dist.join("web"))
            .args(["-r", "../vpad-player-web.zip", "."]),
    )?;

    println!("Package ready: dist/vpad-player-web.zip");
    Ok(())
}
