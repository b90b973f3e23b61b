//! Windowing backend contract
//!
//! [`WindowContext`](super::WindowContext) drives the windowing system only
//! through this trait, so the lifecycle can run against GLFW in production and
//! against a recording fake in tests.

use ash::vk;

use crate::input::WindowEventHandler;

/// Opaque identifier of a window created by a [`WindowingBackend`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowId(pub u64);

/// Parameters for window creation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowDescriptor {
    /// Client area width in pixels
    pub width: u32,
    /// Client area height in pixels
    pub height: u32,
    /// Title bar text
    pub title: String,
    /// Whether the user may resize the window
    pub resizable: bool,
}

impl WindowDescriptor {
    /// Reject parameters no windowing library can create a window from
    pub fn validate(&self) -> Result<(), BackendError> {
        if self.width == 0 || self.height == 0 {
            return Err(BackendError::InvalidDescriptor(format!(
                "window size {}x{} is empty",
                self.width, self.height
            )));
        }
        if self.title.contains('\0') {
            return Err(BackendError::InvalidDescriptor(
                "title contains an interior NUL byte".to_string(),
            ));
        }
        Ok(())
    }
}

/// Errors raised by windowing backends
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    /// Library bootstrap failed
    #[error("Initialization failed: {0}")]
    Initialization(String),

    /// Operation needs a bootstrapped backend
    #[error("Backend is not initialized")]
    NotInitialized,

    /// The backend returned no window
    #[error("Window creation failed")]
    WindowCreation,

    /// The window parameters were rejected before reaching the library
    #[error("Invalid window parameters: {0}")]
    InvalidDescriptor(String),

    /// The id does not name a live window of this backend
    #[error("Unknown window {0:?}")]
    UnknownWindow(WindowId),
}

/// Contract every windowing backend implements
///
/// Window hints are fixed by the caller through [`WindowDescriptor`]; backends
/// always create windows without a client graphics API because Vulkan owns the
/// device binding.
///
/// # Thread Safety
/// No `Send` bound: GLFW calls must stay on the main thread.
pub trait WindowingBackend {
    /// Bootstrap the windowing library
    fn initialize(&mut self) -> Result<(), BackendError>;

    /// Release the windowing library; every window must already be destroyed
    fn terminate(&mut self);

    /// Whether the library can create Vulkan presentation surfaces
    fn vulkan_supported(&self) -> bool;

    /// Create a window with no client API
    ///
    /// Implementations call [`WindowDescriptor::validate`] first.
    fn create_window(&mut self, descriptor: &WindowDescriptor) -> Result<WindowId, BackendError>;

    /// Destroy a window created by this backend
    fn destroy_window(&mut self, window: WindowId);

    /// Instance extensions needed to present onto this backend's windows
    fn required_instance_extensions(&self) -> Vec<String>;

    /// Create a presentation surface for `window` on `instance`
    fn create_surface(
        &mut self,
        window: WindowId,
        instance: vk::Instance,
    ) -> Result<vk::SurfaceKHR, vk::Result>;

    /// Start delivering close, key and mouse-button events for `window`
    fn enable_input_events(&mut self, window: WindowId) -> Result<(), BackendError>;

    /// Process pending events, dispatching each one to `handler`
    fn poll_events(&mut self, window: WindowId, handler: &mut dyn WindowEventHandler);

    /// Whether the window's close flag is set; unknown windows report `true`
    fn should_close(&self, window: WindowId) -> bool;

    /// Set or clear the window's close flag
    fn set_should_close(&mut self, window: WindowId, should_close: bool);
}
