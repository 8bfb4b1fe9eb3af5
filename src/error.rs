//! Error types for starfield.
//!
//! Configuration, mounting, GPU initialization and the windowed runner each
//! have their own error enum. None of them are raised by a running frame:
//! once mounted, a field degrades to drawing nothing rather than failing.

use thiserror::Error;

/// A [`FieldConfig`](crate::FieldConfig) parameter is out of range.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// A value that must be strictly positive was not.
    #[error("{name} must be positive and finite, got {value}")]
    NotPositive { name: &'static str, value: f32 },
    /// A value that must be zero or more was not.
    #[error("{name} must be non-negative and finite, got {value}")]
    Negative { name: &'static str, value: f32 },
    /// A range was empty, inverted or outside its domain.
    #[error("{name} must be a non-empty range within its domain, got {start}..{end}")]
    InvalidRange {
        name: &'static str,
        start: f32,
        end: f32,
    },
}

/// Errors that prevent a [`Background`](crate::Background) from starting.
#[derive(Debug, Error)]
pub enum MountError {
    /// The host did not provide a drawing surface.
    #[error("drawing surface unavailable")]
    SurfaceUnavailable,
    /// The field configuration was rejected.
    #[error("invalid field configuration: {0}")]
    Config(#[from] ConfigError),
}

/// Errors that can occur during GPU initialization.
#[derive(Debug, Error)]
pub enum GpuError {
    /// Failed to create a surface for the window.
    #[error("failed to create GPU surface: {0}")]
    SurfaceCreation(#[from] wgpu::CreateSurfaceError),
    /// No compatible GPU adapter found.
    #[error("no compatible GPU adapter found: {0}")]
    NoAdapter(#[from] wgpu::RequestAdapterError),
    /// Failed to create the GPU device.
    #[error("failed to create GPU device: {0}")]
    DeviceCreation(#[from] wgpu::RequestDeviceError),
    /// The surface reports no usable texture format.
    #[error("surface has no supported texture format")]
    NoSurfaceFormat,
}

/// Errors that can occur when running the windowed backdrop.
#[derive(Debug, Error)]
pub enum RunError {
    /// Failed to create or run the event loop.
    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    /// Failed to create the window.
    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),
    /// GPU initialization failed.
    #[error("GPU error: {0}")]
    Gpu(#[from] GpuError),
    /// The background refused to mount.
    #[error("mount failed: {0}")]
    Mount(#[from] MountError),
}
