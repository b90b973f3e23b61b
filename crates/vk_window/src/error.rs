//! Error types for window and Vulkan context lifecycle

use ash::vk;
use thiserror::Error;

use crate::window::LifecycleState;

/// Errors reported by [`WindowContext`](crate::WindowContext) operations
#[derive(Error, Debug)]
pub enum WindowError {
    /// The windowing backend could not be bootstrapped
    #[error("Windowing backend initialization failed: {0}")]
    BackendInit(String),

    /// The windowing backend cannot present Vulkan surfaces
    #[error("Vulkan is not supported by the windowing backend")]
    Capability,

    /// The native window could not be created
    #[error("Could not create {width}x{height} window '{title}'")]
    WindowCreation {
        /// Requested client width in pixels
        width: u32,
        /// Requested client height in pixels
        height: u32,
        /// Requested window title
        title: String,
    },

    /// Vulkan instance or surface bootstrap failed
    #[error("Could not init Vulkan: {0}")]
    GraphicsInit(#[from] GraphicsInitError),

    /// A windowing backend call failed after initialization
    #[error("Windowing backend error: {0}")]
    Backend(String),

    /// The operation is not valid in the current lifecycle state
    #[error("Cannot {operation} while window context is {state:?}")]
    InvalidState {
        /// Operation that was rejected
        operation: &'static str,
        /// State the context was in
        state: LifecycleState,
    },
}

/// Failures of the Vulkan context bootstrap
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphicsInitError {
    /// The windowing backend reported no required instance extensions
    #[error("No Vulkan extensions found, need at least 'VK_KHR_surface'")]
    NoExtensions,

    /// The Vulkan loader could not be found or initialized
    #[error("Vulkan loader unavailable: {0}")]
    Loader(String),

    /// A name passed to Vulkan contains an interior NUL byte
    #[error("Name {0:?} contains an interior NUL byte")]
    InvalidName(String),

    /// `vkCreateInstance` returned a non-success result
    #[error("Could not create Vulkan instance ({})", .0.as_raw())]
    InstanceCreation(vk::Result),

    /// Physical device enumeration failed
    #[error("Could not enumerate physical devices ({})", .0.as_raw())]
    DeviceEnumeration(vk::Result),

    /// The instance reported zero physical devices
    #[error("No Vulkan capable GPU found")]
    NoDevice,

    /// Surface creation for the window failed
    #[error("Could not create Vulkan surface ({})", .0.as_raw())]
    SurfaceCreation(vk::Result),
}

/// Result type for window context operations
pub type WindowResult<T> = Result<T, WindowError>;
