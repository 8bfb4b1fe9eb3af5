//! # Snapshot
//!
//! Renders the field headlessly through a manual host and writes the final
//! frame as a PNG.
//!
//! Run with: `cargo run --example snapshot --release -- 1280 720 120 dark field.png`

use starfield::prelude::*;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let width: u32 = args.next().and_then(|s| s.parse().ok()).unwrap_or(1280);
    let height: u32 = args.next().and_then(|s| s.parse().ok()).unwrap_or(720);
    let frames: u32 = args.next().and_then(|s| s.parse().ok()).unwrap_or(120);
    let theme = match args.next().as_deref() {
        Some("light") => Theme::Light,
        _ => Theme::Dark,
    };
    let path = args.next().unwrap_or_else(|| "field.png".to_string());

    let host = ManualHost::new(width, height);
    let mut background = Background::mount_with_seed(
        &host,
        Some(PixelCanvas::new(width, height)),
        ThemeFlag::new(theme),
        FieldConfig::default(),
        42,
    )?;

    for _ in 1..frames {
        match host.take_frame() {
            Some(frame) => {
                background.on_frame(frame);
            }
            None => break,
        }
    }

    let stats = background.last_stats();
    println!(
        "{} frames, {} particles, {} links -> {}",
        background.clock().frame(),
        stats.particles,
        stats.links,
        path
    );
    background.surface().save_png(&path)?;
    background.unmount();
    Ok(())
}
