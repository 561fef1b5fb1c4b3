//! First-person raycaster.
//!
//! ```bash
//! cargo run --release -- --assets assets
//! ```

use std::{
    path::PathBuf,
    thread,
    time::{Duration, Instant},
};

use anyhow::Context;
use clap::Parser;
use minifb::{ScaleMode, Window, WindowOptions};
use tracing_subscriber::EnvFilter;

use mini_fps::{
    assets,
    config::Settings,
    engine::Engine,
    renderer::Software,
    sim::{has_collided, poll},
    world::Camera,
};

#[derive(Parser, Debug)]
#[command(version, about = "First-person grid raycaster")]
struct Cli {
    /// Folder holding the settings file, the level and the textures.
    #[arg(long, default_value = "assets")]
    assets: PathBuf,

    /// Settings file, relative to the assets folder.
    #[arg(long, default_value = "settings.json")]
    settings: String,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    run(Cli::parse()).inspect_err(|e| tracing::error!("{e:#}"))
}

fn run(cli: Cli) -> anyhow::Result<()> {
    // ─────────── settings & assets ────────────
    let settings_path = assets::resolve(&cli.assets, &cli.settings);
    let settings = Settings::load(&settings_path)
        .with_context(|| format!("loading settings from {}", settings_path.display()))?;
    tracing::info!(path = %settings_path.display(), "settings loaded");

    let level = assets::load_level(assets::resolve(&cli.assets, &settings.level_path))?;
    tracing::debug!("level layout:\n{level}");

    let texture_paths: Vec<PathBuf> = settings
        .texture_paths
        .iter()
        .map(|p| assets::resolve(&cli.assets, p))
        .collect();
    let texture_bank = assets::load_textures(&texture_paths)?;
    let materials = level.max_material() as usize;
    if materials > texture_bank.len() - 1 {
        tracing::warn!(
            materials,
            textures = texture_bank.len() - 1,
            "more wall materials than textures, textures will repeat"
        );
    }

    let camera = Camera::from_settings(&settings);
    if has_collided(&level, camera.pos()) {
        tracing::warn!(pos = ?camera.pos(), "player starts inside a wall and cannot move");
    }
    let (vw, vh) = camera.viewport();
    tracing::info!(columns = vw, rows = vh, "viewport");

    // ─────────── window ────────────
    let mut win = Window::new(
        &settings.window_title,
        settings.screen_width,
        settings.screen_height,
        WindowOptions {
            resize: true,
            scale_mode: ScaleMode::Stretch,
            ..WindowOptions::default()
        },
    )
    .context("creating window")?;
    if settings.v_sync {
        win.set_target_fps(60);
    }
    tracing::info!("window initialized");

    let mut engine = Engine::new(
        Software::from_settings(&settings),
        level,
        camera,
        texture_bank,
        settings,
    );

    // ────────────────── benchmarking state ──────────────────────────────
    let mut acc_time = Duration::ZERO; // cumulated render time
    let mut acc_frames = 0usize; // frames in the current window
    let mut last_print = Instant::now(); // when we printed last

    let mut last_mouse = None;
    let mut last_tick = Instant::now();

    loop {
        let now = Instant::now();
        let dt = (now - last_tick).as_secs_f32();
        last_tick = now;

        let input = poll(&win, &mut last_mouse);
        if input.quit {
            break;
        }

        let state = engine.update(&input, dt);
        if state.changed {
            let t0 = Instant::now(); // ┌─ frame timer start
            let mut presented = Ok(());
            engine.render_frame(|fb, w, h| presented = win.update_with_buffer(fb, w, h));
            presented.context("presenting frame")?;
            acc_time += t0.elapsed();
            acc_frames += 1;
        } else {
            // keep pumping events so input and close requests arrive
            win.update();
            thread::sleep(Duration::from_millis(1));
        }

        if acc_frames > 0 && last_print.elapsed() >= Duration::from_secs(3) {
            let avg_ms = acc_time.as_secs_f64() * 1000.0 / acc_frames as f64;
            tracing::info!(
                "avg render: {:.2} ms  ({:.1} FPS)",
                avg_ms,
                1000.0 / avg_ms
            );
            acc_time = Duration::ZERO;
            acc_frames = 0;
            last_print = Instant::now();
        }
    }

    tracing::info!("close requested, exiting");
    Ok(())
}
