//! Error types for linetrails.
//!
//! The simulation core itself has no failure modes: containment divergence
//! respawns the line and out-of-range depths are clamped. Errors only arise
//! at the outer surfaces: named parameters, strategy selection and the
//! window/GPU setup of the app.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrailError {
    /// A parameter name did not match any tunable.
    #[error("unknown parameter '{0}'")]
    UnknownParameter(String),

    /// A strategy name did not match any variant of its category.
    #[error("unknown {category} strategy '{name}'")]
    UnknownStrategy {
        category: &'static str,
        name: String,
    },

    /// A tunable received a value it cannot run with.
    #[error("invalid value {value} for {parameter}: {reason}")]
    InvalidParameter {
        parameter: &'static str,
        value: f64,
        reason: &'static str,
    },

    /// The drawing canvas could not be allocated at this size.
    #[error("cannot create a {width}x{height} canvas")]
    CanvasSize { width: u32, height: u32 },

    #[error("failed to create event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("failed to create GPU surface: {0}")]
    SurfaceCreation(#[from] wgpu::CreateSurfaceError),

    #[error("no compatible GPU adapter found: {0}")]
    NoAdapter(#[from] wgpu::RequestAdapterError),

    #[error("failed to create GPU device: {0}")]
    DeviceCreation(#[from] wgpu::RequestDeviceError),

    /// The surface could not be recovered by reconfiguring it.
    #[error("surface error: {0}")]
    Surface(#[from] wgpu::SurfaceError),
}

pub type Result<T> = std::result::Result<T, TrailError>;
