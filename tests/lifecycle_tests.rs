//! Integration tests for the mounted background.
//!
//! These drive a [`Background`] through a [`ManualHost`] the way a page
//! would: mount, deliver frames, resize, flip the theme and unmount.

use starfield::{
    Background, DrawCommand, DrawSurface, FieldConfig, Host, ManualHost, PixelCanvas,
    RecordingSurface, Theme, ThemeFlag,
};

fn mount<'h>(
    host: &'h ManualHost,
    surface: RecordingSurface,
    theme: &ThemeFlag,
) -> Background<&'h ManualHost, RecordingSurface> {
    Background::mount_with_seed(host, Some(surface), theme.clone(), FieldConfig::default(), 1234)
        .expect("mount succeeds")
}

fn pump(host: &ManualHost, bg: &mut Background<&ManualHost, RecordingSurface>, frames: usize) {
    for _ in 0..frames {
        let frame = host.take_frame().expect("a frame is always scheduled");
        assert!(bg.on_frame(frame));
    }
}

// ============================================================================
// Seeding
// ============================================================================

#[test]
fn test_800x600_dark_has_19_particles() {
    let host = ManualHost::new(800, 600);
    let theme = ThemeFlag::new(Theme::Dark);
    let bg = mount(&host, RecordingSurface::new(0, 0), &theme);

    assert_eq!(bg.field().particles().len(), 19);
    assert_eq!(bg.last_stats().particles, 19);
}

#[test]
fn test_tiny_viewport_runs_without_particles() {
    let host = ManualHost::new(100, 100);
    let theme = ThemeFlag::new(Theme::Dark);
    let surface = RecordingSurface::new(0, 0);
    let observer = surface.clone();
    let mut bg = mount(&host, surface, &theme);

    pump(&host, &mut bg, 30);

    assert!(bg.field().particles().is_empty());
    assert_eq!(observer.circle_count(), 0);
    assert_eq!(observer.line_count(), 0);
    // clear + background gradient on each of 31 frames
    assert_eq!(observer.draw_count(), 31 * 2);
}

// ============================================================================
// Wraparound over many frames
// ============================================================================

#[test]
fn test_positions_stay_in_range_over_many_frames() {
    let host = ManualHost::new(1024, 768);
    let theme = ThemeFlag::new(Theme::Light);
    let mut bg = mount(&host, RecordingSurface::new(0, 0), &theme);

    for _ in 0..2000 {
        let frame = host.take_frame().unwrap();
        bg.on_frame(frame);
        for p in bg.field().particles() {
            assert!(p.position.x >= 0.0 && p.position.x < 1024.0);
            assert!(p.position.y >= 0.0 && p.position.y < 768.0);
            assert!(p.position.z >= 0.0 && p.position.z < 1000.0);
        }
    }
}

#[test]
fn test_fast_particles_wrap_with_overshoot() {
    let config = FieldConfig::default().with_speeds(900.0, 2500.0);
    let mut field = starfield::ParticleField::with_seed(300, 200, config, 9).unwrap();
    assert!(!field.particles().is_empty());

    for _ in 0..500 {
        field.advance();
        for p in field.particles() {
            assert!((0.0..300.0).contains(&p.position.x));
            assert!((0.0..200.0).contains(&p.position.y));
            assert!((0.0..1000.0).contains(&p.position.z));
        }
    }
}

// ============================================================================
// Theme
// ============================================================================

#[test]
fn test_theme_toggle_only_changes_colors() {
    let host_a = ManualHost::new(800, 600);
    let host_b = ManualHost::new(800, 600);
    let dark = ThemeFlag::new(Theme::Dark);
    let toggled = ThemeFlag::new(Theme::Dark);
    let mut a = mount(&host_a, RecordingSurface::new(0, 0), &dark);
    let mut b = mount(&host_b, RecordingSurface::new(0, 0), &toggled);

    pump(&host_a, &mut a, 5);
    pump(&host_b, &mut b, 5);

    toggled.set(Theme::Light);
    let surface_b = b.surface().clone();
    surface_b.reset();
    pump(&host_a, &mut a, 1);
    pump(&host_b, &mut b, 1);

    assert_eq!(a.field().particles(), b.field().particles());
    assert_eq!(a.field().epoch(), b.field().epoch());

    let commands = surface_b.commands();
    match &commands[1] {
        DrawCommand::VerticalGradient { stops } => {
            assert_eq!(stops.as_slice(), &Theme::Light.palette().background[..]);
        }
        other => panic!("expected background gradient, got {other:?}"),
    }
}

#[test]
fn test_theme_read_every_frame() {
    let host = ManualHost::new(800, 600);
    let theme = ThemeFlag::new(Theme::Dark);
    let surface = RecordingSurface::new(0, 0);
    let observer = surface.clone();
    let mut bg = mount(&host, surface, &theme);

    for expected in [Theme::Light, Theme::Dark, Theme::Light] {
        theme.set(expected);
        observer.reset();
        pump(&host, &mut bg, 1);

        let core = observer.commands().into_iter().find_map(|c| match c {
            DrawCommand::Circle {
                paint: starfield::Paint::Solid(color),
                ..
            } => Some(color),
            _ => None,
        });
        assert_eq!(core, Some(expected.palette().core));
    }
}

// ============================================================================
// Resize
// ============================================================================

#[test]
fn test_resize_reseeds_for_new_dimensions() {
    let host = ManualHost::new(800, 600);
    let theme = ThemeFlag::new(Theme::Dark);
    let surface = RecordingSurface::new(0, 0);
    let observer = surface.clone();
    let mut bg = mount(&host, surface, &theme);
    pump(&host, &mut bg, 3);

    let before = bg.field().particles().to_vec();
    host.set_viewport(500, 400);
    let (w, h) = host.viewport();
    bg.on_resize(w, h);

    assert_eq!((bg.field().width(), bg.field().height()), (500, 400));
    assert_eq!(bg.surface().size(), (500, 400));
    assert!(observer.commands().contains(&DrawCommand::Resize {
        width: 500,
        height: 400
    }));
    assert_eq!(bg.field().particles().len(), 8);
    assert_eq!(bg.field().epoch(), 2);
    assert!(before.iter().all(|p| !bg.field().particles().contains(p)));

    pump(&host, &mut bg, 10);
    for p in bg.field().particles() {
        assert!(p.position.x < 500.0 && p.position.y < 400.0);
    }
}

#[test]
fn test_resize_to_zero_area_is_valid() {
    let host = ManualHost::new(800, 600);
    let theme = ThemeFlag::new(Theme::Dark);
    let mut bg = mount(&host, RecordingSurface::new(0, 0), &theme);

    bg.on_resize(0, 0);
    pump(&host, &mut bg, 3);
    assert!(bg.field().particles().is_empty());
}

// ============================================================================
// Teardown
// ============================================================================

#[test]
fn test_no_draws_after_unmount() {
    let host = ManualHost::new(800, 600);
    let theme = ThemeFlag::new(Theme::Dark);
    let surface = RecordingSurface::new(0, 0);
    let observer = surface.clone();
    let mut bg = mount(&host, surface, &theme);
    pump(&host, &mut bg, 4);

    bg.unmount();
    let draws = observer.draw_count();

    // A refresh tick and a resize after teardown find nothing to deliver.
    assert_eq!(host.take_frame(), None);
    host.set_viewport(1024, 768);
    assert!(host.resize_listeners().is_empty());

    assert_eq!(observer.draw_count(), draws);
    assert_eq!(host.frames_cancelled(), 1);
}

#[test]
fn test_drop_is_teardown() {
    let host = ManualHost::new(800, 600);
    let theme = ThemeFlag::new(Theme::Dark);
    {
        let mut bg = mount(&host, RecordingSurface::new(0, 0), &theme);
        pump(&host, &mut bg, 2);
    }

    assert!(host.pending_frames().is_empty());
    assert!(!host.has_resize_listener());
}

#[test]
fn test_independent_instances() {
    let host = ManualHost::new(800, 600);
    let theme = ThemeFlag::new(Theme::Dark);
    let mut a = mount(&host, RecordingSurface::new(0, 0), &theme);
    let b = mount(&host, RecordingSurface::new(0, 0), &theme);

    assert_eq!(host.pending_frames().len(), 2);
    assert_eq!(host.resize_listeners().len(), 2);

    let frame_a = a.pending_frame().unwrap();
    b.unmount();

    assert_eq!(host.pending_frames(), vec![frame_a]);
    assert_eq!(host.resize_listeners().len(), 1);
    assert!(a.on_frame(host.take_frame().unwrap()));
}

// ============================================================================
// Pixel output
// ============================================================================

#[test]
fn test_canvas_output_follows_theme() {
    let host = ManualHost::new(320, 240);
    let theme = ThemeFlag::new(Theme::Dark);
    let mut bg = Background::mount_with_seed(
        &host,
        Some(PixelCanvas::new(0, 0)),
        theme.clone(),
        FieldConfig::default(),
        3,
    )
    .unwrap();

    let dark_corner = bg.surface().pixel(0, 0).unwrap();
    theme.set(Theme::Light);
    let frame = host.take_frame().unwrap();
    bg.on_frame(frame);
    let light_corner = bg.surface().pixel(0, 0).unwrap();

    assert!(dark_corner.x < 0.1);
    assert!(light_corner.x > 0.8);
    assert!(light_corner.w > 0.9);
}
