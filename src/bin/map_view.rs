//! Top-down level viewer: grid, player and the edges of the view cone.
//!
//! Walks with the same controls and collision as the main binary, which makes
//! it handy for checking a level image before texturing it.
//!
//! ```bash
//! cargo run --bin map_view -- --assets assets
//! ```

use std::{path::PathBuf, time::Instant};

use anyhow::Context;
use clap::Parser;
use glam::Vec2;
use minifb::{Window, WindowOptions};
use tracing_subscriber::EnvFilter;

use mini_fps::{
    assets,
    config::Settings,
    engine::cast_ray,
    renderer::{ARGB_BLACK, ARGB_BLUE, ARGB_GREEN, ARGB_RED, ARGB_WHITE, Rgba},
    sim::{advance, poll},
    world::{Camera, Cell, EMPTY, Level},
};

const WIDTH: usize = 768;
const HEIGHT: usize = 768;

const FLOOR: Rgba = 0xFF_20_20_20;
const PLAYER: Rgba = 0xFF_FF_FF_00;
const RAY: Rgba = 0xFF_C0_C0_C0;

#[derive(Parser, Debug)]
#[command(about = "Top-down view of a raycaster level")]
struct Cli {
    #[arg(long, default_value = "assets")]
    assets: PathBuf,

    #[arg(long, default_value = "settings.json")]
    settings: String,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    let cli = Cli::parse();

    // ─────────── load settings & level ───────
    let settings_path = assets::resolve(&cli.assets, &cli.settings);
    let settings = Settings::load(&settings_path)
        .with_context(|| format!("loading settings from {}", settings_path.display()))?;
    let level = assets::load_level(assets::resolve(&cli.assets, &settings.level_path))?;
    tracing::debug!("level layout:\n{level}");

    let mut camera = Camera::from_settings(&settings);

    // ─────────── grid‑space → screen‑space transform ────────────
    let scale = (WIDTH as f32 / level.width() as f32).min(HEIGHT as f32 / level.height() as f32);
    let to_screen = |p: Vec2| -> (i32, i32) { ((p.x * scale) as i32, (p.y * scale) as i32) };

    // ─────────── show window ────────────
    let mut window = Window::new("Level map", WIDTH, HEIGHT, WindowOptions::default())?;
    window.set_target_fps(60);

    let mut buffer = vec![0u32; WIDTH * HEIGHT];
    let mut last_mouse = None;
    let mut last_tick = Instant::now();

    loop {
        let now = Instant::now();
        let dt = (now - last_tick).as_secs_f32();
        last_tick = now;

        let input = poll(&window, &mut last_mouse);
        if input.quit {
            break;
        }
        advance(&mut camera, &level, &input, dt, &settings);

        draw_grid(&mut buffer, &level, scale);

        // view cone: leftmost, centre and rightmost ray
        let proj = *camera.projection();
        let eye = to_screen(camera.pos());
        let last_col = proj.viewport_width.saturating_sub(1);
        for offset in [proj.ray_offset(0), 0.0, proj.ray_offset(last_col)] {
            let end = cast_ray(
                &level,
                camera.pos(),
                camera.angle() + offset,
                offset,
                proj.render_distance,
            )
            .map(|hit| hit.point)
            .unwrap_or_else(|| {
                let (s, c) = (camera.angle() + offset).sin_cos();
                camera.pos() + Vec2::new(c, s) * proj.render_distance
            });
            let (x1, y1) = to_screen(end);
            draw_line(&mut buffer, WIDTH, HEIGHT, eye.0, eye.1, x1, y1, RAY);
        }
        fill_rect(&mut buffer, eye.0 - 2, eye.1 - 2, 5, 5, PLAYER);

        window.update_with_buffer(&buffer, WIDTH, HEIGHT)?;
    }
    Ok(())
}

fn material_colour(c: Cell) -> Rgba {
    match c {
        EMPTY => FLOOR,
        1 => ARGB_WHITE, // black walls would vanish on the dark floor
        2 => ARGB_RED,
        3 => ARGB_GREEN,
        4 => ARGB_BLUE,
        _ => 0xFF_80_80_80,
    }
}

fn draw_grid(buf: &mut [u32], level: &Level, scale: f32) {
    buf.fill(ARGB_BLACK);
    let cell_px = scale.max(1.0) as i32;
    for y in 0..level.height() {
        for x in 0..level.width() {
            let colour = material_colour(level.get(x as i32, y as i32));
            let sx = (x as f32 * scale) as i32;
            let sy = (y as f32 * scale) as i32;
            // 1px gap keeps the grid readable
            fill_rect(buf, sx, sy, cell_px - 1, cell_px - 1, colour);
        }
    }
}

fn fill_rect(buf: &mut [u32], x0: i32, y0: i32, w: i32, h: i32, colour: u32) {
    for y in y0.max(0)..(y0 + h).min(HEIGHT as i32) {
        for x in x0.max(0)..(x0 + w).min(WIDTH as i32) {
            buf[y as usize * WIDTH + x as usize] = colour;
        }
    }
}

/// Integer Bresenham line‑drawing algorithm.
#[allow(clippy::too_many_arguments)]
fn draw_line(
    buf: &mut [u32],
    w: usize,
    h: usize,
    mut x0: i32,
    mut y0: i32,
    x1: i32,
    y1: i32,
    colour: u32,
) {
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if (0..w as i32).contains(&x0) && (0..h as i32).contains(&y0) {
            buf[y0 as usize * w + x0 as usize] = colour;
        }
        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            if x0 == x1 {
                break;
            }
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            if y0 == y1 {
                break;
            }
            err += dx;
            y0 += sy;
        }
    }
}
