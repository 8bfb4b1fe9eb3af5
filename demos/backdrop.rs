//! # Backdrop
//!
//! Opens a window with the animated particle field.
//!
//! Press `T` to switch between the dark and light theme, `Escape` to quit.
//!
//! Run with: `cargo run --example backdrop --release`
//! Optional argument: `light` to start in the light theme.

use starfield::prelude::*;

fn main() -> Result<(), RunError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let theme = match std::env::args().nth(1).as_deref() {
        Some("light") => Theme::Light,
        _ => Theme::Dark,
    };

    Backdrop::new()
        .with_title("starfield")
        .with_size(1280, 720)
        .with_theme(theme)
        .run()
}
