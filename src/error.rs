//! Error types for aurora-backdrop.
//!
//! Nothing inside a simulation tick can fail. Errors only come out of setup:
//! opening the window, bringing up the GPU, and loading or validating
//! parameter sets.

use std::fmt;

/// Errors that can occur during GPU initialization.
#[derive(Debug)]
pub enum GpuError {
    /// Failed to create a surface for rendering.
    SurfaceCreation(wgpu::CreateSurfaceError),
    /// No compatible GPU adapter found.
    NoAdapter,
    /// Failed to create GPU device.
    DeviceCreation(wgpu::RequestDeviceError),
    /// The surface reports no usable texture format.
    NoSurfaceFormat,
}

impl fmt::Display for GpuError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GpuError::SurfaceCreation(e) => write!(f, "Failed to create GPU surface: {}", e),
            GpuError::NoAdapter => write!(f, "No compatible GPU adapter found. Ensure your system has a GPU with WebGPU/Vulkan/Metal/DX12 support."),
            GpuError::DeviceCreation(e) => write!(f, "Failed to create GPU device: {}", e),
            GpuError::NoSurfaceFormat => write!(f, "Surface does not support any texture format"),
        }
    }
}

impl std::error::Error for GpuError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GpuError::SurfaceCreation(e) => Some(e),
            GpuError::DeviceCreation(e) => Some(e),
            _ => None,
        }
    }
}

impl From<wgpu::CreateSurfaceError> for GpuError {
    fn from(e: wgpu::CreateSurfaceError) -> Self {
        GpuError::SurfaceCreation(e)
    }
}

impl From<wgpu::RequestDeviceError> for GpuError {
    fn from(e: wgpu::RequestDeviceError) -> Self {
        GpuError::DeviceCreation(e)
    }
}

/// A parameter set that cannot drive a simulation.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamError {
    /// A field holds NaN or an infinity.
    NotFinite { field: &'static str },
    /// A field that must be zero or positive is negative.
    Negative { field: &'static str, value: f32 },
    /// The lower bound of a range is above its upper bound.
    InvertedRange {
        min_field: &'static str,
        max_field: &'static str,
        min: f32,
        max: f32,
    },
    /// A field is outside the interval it is allowed to take.
    OutOfRange {
        field: &'static str,
        value: f32,
        interval: &'static str,
    },
    /// An entity count is above the largest the simulation accepts.
    TooMany {
        field: &'static str,
        count: u32,
        max: u32,
    },
}

impl fmt::Display for ParamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamError::NotFinite { field } => write!(f, "`{}` must be a finite number", field),
            ParamError::Negative { field, value } => {
                write!(f, "`{}` must not be negative (got {})", field, value)
            }
            ParamError::InvertedRange { min_field, max_field, min, max } => write!(
                f,
                "`{}` ({}) must not exceed `{}` ({})",
                min_field, min, max_field, max
            ),
            ParamError::OutOfRange { field, value, interval } => {
                write!(f, "`{}` must lie in {} (got {})", field, interval, value)
            }
            ParamError::TooMany { field, count, max } => {
                write!(f, "`{}` must be at most {} (got {})", field, max, count)
            }
        }
    }
}

impl std::error::Error for ParamError {}

/// Errors that can occur while loading or saving a parameter file.
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to read or write the file.
    Io(std::io::Error),
    /// The file is not valid parameter JSON.
    Json(serde_json::Error),
    /// The file parsed but describes an unusable parameter set.
    Invalid(ParamError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "Failed to access parameter file: {}", e),
            ConfigError::Json(e) => write!(f, "Malformed parameter JSON: {}", e),
            ConfigError::Invalid(e) => write!(f, "Invalid parameters: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Json(e) => Some(e),
            ConfigError::Invalid(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Json(e)
    }
}

impl From<ParamError> for ConfigError {
    fn from(e: ParamError) -> Self {
        ConfigError::Invalid(e)
    }
}

/// Errors that can occur when running the backdrop window.
#[derive(Debug)]
pub enum BackdropError {
    /// Failed to create event loop.
    EventLoop(winit::error::EventLoopError),
    /// Failed to create window.
    Window(winit::error::OsError),
    /// GPU initialization failed.
    Gpu(GpuError),
    /// The initial parameter set was rejected.
    Params(ParamError),
}

impl fmt::Display for BackdropError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackdropError::EventLoop(e) => write!(f, "Failed to create event loop: {}", e),
            BackdropError::Window(e) => write!(f, "Failed to create window: {}", e),
            BackdropError::Gpu(e) => write!(f, "GPU error: {}", e),
            BackdropError::Params(e) => write!(f, "Invalid parameters: {}", e),
        }
    }
}

impl std::error::Error for BackdropError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BackdropError::EventLoop(e) => Some(e),
            BackdropError::Window(e) => Some(e),
            BackdropError::Gpu(e) => Some(e),
            BackdropError::Params(e) => Some(e),
        }
    }
}

impl From<winit::error::EventLoopError> for BackdropError {
    fn from(e: winit::error::EventLoopError) -> Self {
        BackdropError::EventLoop(e)
    }
}

impl From<winit::error::OsError> for BackdropError {
    fn from(e: winit::error::OsError) -> Self {
        BackdropError::Window(e)
    }
}

impl From<GpuError> for BackdropError {
    fn from(e: GpuError) -> Self {
        BackdropError::Gpu(e)
    }
}

impl From<ParamError> for BackdropError {
    fn from(e: ParamError) -> Self {
        BackdropError::Params(e)
    }
}
