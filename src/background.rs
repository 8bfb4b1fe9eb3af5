//! A particle field mounted into a host.
//!
//! [`Background`] ties a [`ParticleField`] to a drawing surface, a theme flag
//! and a [`Host`]. Mounting seeds the field, registers for resizes and runs
//! the first frame; every delivered frame handle runs one more frame and
//! schedules the next. Dropping the background (or calling
//! [`Background::unmount`]) cancels the outstanding frame and removes the
//! resize listener, so no frame can run against a detached surface.
//!
//! ```ignore
//! let host = ManualHost::new(800, 600);
//! let theme = ThemeFlag::new(Theme::Dark);
//! let mut bg = Background::mount(&host, Some(PixelCanvas::new(0, 0)), theme, FieldConfig::default())?;
//!
//! while let Some(frame) = host.take_frame() {
//!     bg.on_frame(frame);
//! }
//! bg.unmount();
//! ```

use crate::config::FieldConfig;
use crate::error::{ConfigError, MountError};
use crate::field::{FrameStats, ParticleField};
use crate::host::{FrameHandle, Host, ListenerHandle, ThemeFlag};
use crate::surface::DrawSurface;
use crate::time::FrameClock;

/// A running particle background.
pub struct Background<H: Host, S: DrawSurface> {
    host: H,
    surface: S,
    field: ParticleField,
    theme: ThemeFlag,
    clock: FrameClock,
    last_stats: FrameStats,
    pending: Option<FrameHandle>,
    listener: Option<ListenerHandle>,
}

impl<H: Host, S: DrawSurface> Background<H, S> {
    /// Mount with an entropy-seeded field.
    ///
    /// Fails without registering anything when `surface` is `None` or the
    /// configuration is invalid.
    pub fn mount(
        host: H,
        surface: Option<S>,
        theme: ThemeFlag,
        config: FieldConfig,
    ) -> Result<Self, MountError> {
        Self::mount_inner(host, surface, theme, |w, h| ParticleField::new(w, h, config))
    }

    /// Mount with a deterministic field.
    pub fn mount_with_seed(
        host: H,
        surface: Option<S>,
        theme: ThemeFlag,
        config: FieldConfig,
        seed: u64,
    ) -> Result<Self, MountError> {
        Self::mount_inner(host, surface, theme, |w, h| {
            ParticleField::with_seed(w, h, config, seed)
        })
    }

    fn mount_inner<F>(
        host: H,
        surface: Option<S>,
        theme: ThemeFlag,
        make_field: F,
    ) -> Result<Self, MountError>
    where
        F: FnOnce(u32, u32) -> Result<ParticleField, ConfigError>,
    {
        let Some(mut surface) = surface else {
            log::warn!("particle background not started: no drawing surface");
            return Err(MountError::SurfaceUnavailable);
        };

        let (width, height) = host.viewport();
        let field = make_field(width, height)?;
        surface.resize(width, height);

        // From here on, Drop releases whatever has been registered.
        let mut background = Self {
            host,
            surface,
            field,
            theme,
            clock: FrameClock::new(),
            last_stats: FrameStats::default(),
            pending: None,
            listener: None,
        };
        background.listener = Some(background.host.add_resize_listener());
        background.run_frame();

        log::info!(
            "particle background mounted at {}x{} with {} particles",
            width,
            height,
            background.field.particles().len()
        );
        Ok(background)
    }

    /// Deliver a scheduled frame.
    ///
    /// Runs one frame and schedules the next when `handle` is the outstanding
    /// request. Stale or cancelled handles are ignored and return `false`.
    pub fn on_frame(&mut self, handle: FrameHandle) -> bool {
        if self.pending != Some(handle) {
            log::trace!("ignoring stale frame {:?}", handle);
            return false;
        }
        self.pending = None;
        self.run_frame();
        true
    }

    /// Deliver a viewport resize: resize the surface and reseed the field.
    pub fn on_resize(&mut self, width: u32, height: u32) {
        if self.listener.is_none() {
            return;
        }
        self.surface.resize(width, height);
        self.field.resize(width, height);
    }

    /// Tear down: cancel the scheduled frame and drop the resize listener.
    pub fn unmount(self) {
        drop(self);
    }

    fn run_frame(&mut self) {
        let theme = self.theme.get();
        self.last_stats = self.field.frame(&mut self.surface, theme);
        self.clock.tick();
        self.pending = Some(self.host.request_frame());
    }

    fn release(&mut self) {
        let frame = self.pending.take();
        let listener = self.listener.take();
        if let Some(handle) = frame {
            self.host.cancel_frame(handle);
        }
        if let Some(handle) = listener {
            self.host.remove_resize_listener(handle);
        }
        if frame.is_some() || listener.is_some() {
            log::info!(
                "particle background unmounted after {} frames",
                self.clock.frame()
            );
        }
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn theme(&self) -> &ThemeFlag {
        &self.theme
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Counts from the most recent frame.
    pub fn last_stats(&self) -> FrameStats {
        self.last_stats
    }

    /// The frame currently scheduled with the host.
    pub fn pending_frame(&self) -> Option<FrameHandle> {
        self.pending
    }
}

impl<H: Host, S: DrawSurface> Drop for Background<H, S> {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::ManualHost;
    use crate::palette::Theme;
    use crate::surface::RecordingSurface;

    fn mount(host: &ManualHost) -> Background<&ManualHost, RecordingSurface> {
        Background::mount_with_seed(
            host,
            Some(RecordingSurface::new(1, 1)),
            ThemeFlag::new(Theme::Dark),
            FieldConfig::default(),
            5,
        )
        .unwrap()
    }

    #[test]
    fn test_mount_runs_first_frame_and_schedules_next() {
        let host = ManualHost::new(800, 600);
        let bg = mount(&host);

        assert_eq!(bg.surface().size(), (800, 600));
        assert_eq!(bg.clock().frame(), 1);
        assert_eq!(host.pending_frames(), vec![bg.pending_frame().unwrap()]);
        assert!(host.has_resize_listener());
    }

    #[test]
    fn test_stale_handle_ignored() {
        let host = ManualHost::new(800, 600);
        let mut bg = mount(&host);
        let current = host.take_frame().unwrap();

        assert!(!bg.on_frame(FrameHandle(9999)));
        assert!(bg.on_frame(current));
        assert!(!bg.on_frame(current));
        assert_eq!(bg.clock().frame(), 2);
    }

    #[test]
    fn test_single_outstanding_frame() {
        let host = ManualHost::new(800, 600);
        let mut bg = mount(&host);
        for _ in 0..10 {
            let frame = host.take_frame().unwrap();
            bg.on_frame(frame);
            assert_eq!(host.pending_frames().len(), 1);
        }
    }

    #[test]
    fn test_missing_surface_registers_nothing() {
        let host = ManualHost::new(800, 600);
        let result = Background::<_, RecordingSurface>::mount(
            &host,
            None,
            ThemeFlag::default(),
            FieldConfig::default(),
        );

        assert!(matches!(result, Err(MountError::SurfaceUnavailable)));
        assert_eq!(host.frames_requested(), 0);
        assert!(!host.has_resize_listener());
    }

    #[test]
    fn test_bad_config_registers_nothing() {
        let host = ManualHost::new(800, 600);
        let surface = RecordingSurface::new(0, 0);
        let observer = surface.clone();
        let result = Background::mount(
            &host,
            Some(surface),
            ThemeFlag::default(),
            FieldConfig::default().with_depth(-5.0),
        );

        assert!(matches!(result, Err(MountError::Config(_))));
        assert_eq!(host.frames_requested(), 0);
        assert!(!host.has_resize_listener());
        assert_eq!(observer.draw_count(), 0);
    }

    #[test]
    fn test_unmount_releases_everything() {
        let host = ManualHost::new(800, 600);
        let bg = mount(&host);
        bg.unmount();

        assert!(host.pending_frames().is_empty());
        assert!(!host.has_resize_listener());
        assert_eq!(host.frames_cancelled(), 1);
    }
}
