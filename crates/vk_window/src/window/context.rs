//! Window context: owner of the native window and its Vulkan surface
//!
//! [`WindowContext`] walks an explicit lifecycle:
//!
//! ```text
//! Uninitialized --init--> Ready --cleanup--> Destroyed
//!       ^                   |
//!       +-- failed init ----+ (nothing left acquired)
//! ```
//!
//! Resources are acquired leaves first (windowing backend, window, instance,
//! surface, input events) and released by a single teardown routine in the
//! reverse order. The surface holds a back-reference into the instance, which
//! is why the two are never destroyed independently.

use crate::config::WindowConfig;
use crate::error::{WindowError, WindowResult};
use crate::graphics::{bootstrap, GraphicsBackend, GraphicsContext, PhysicalDeviceSummary, VulkanBackend};
use crate::input::{InputDispatcher, WindowEventHandler};
use crate::window::backend::{WindowDescriptor, WindowId, WindowingBackend};
use crate::window::glfw_backend::GlfwBackend;

/// Observable lifecycle state of a [`WindowContext`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleState {
    /// Nothing acquired; `init` may be called
    Uninitialized,
    /// Window, instance and surface are live
    Ready,
    /// Everything released; terminal
    Destroyed,
}

/// Handles owned while the context is ready
struct Resources {
    window: WindowId,
    graphics: GraphicsContext,
}

enum Lifecycle {
    Uninitialized,
    Ready(Resources),
    Destroyed,
}

impl Lifecycle {
    const fn state(&self) -> LifecycleState {
        match self {
            Self::Uninitialized => LifecycleState::Uninitialized,
            Self::Ready(_) => LifecycleState::Ready,
            Self::Destroyed => LifecycleState::Destroyed,
        }
    }
}

/// Owns one native window together with its Vulkan instance and surface
///
/// All backend handles are exclusively owned here and used from the thread that
/// created the context. Input events are routed to the configured
/// [`WindowEventHandler`], an [`InputDispatcher`] unless replaced.
pub struct WindowContext {
    config: WindowConfig,
    windowing: Box<dyn WindowingBackend>,
    graphics: Box<dyn GraphicsBackend>,
    handler: Box<dyn WindowEventHandler>,
    lifecycle: Lifecycle,
}

impl WindowContext {
    /// Create an uninitialized context over the given backends
    pub fn new(
        config: WindowConfig,
        windowing: Box<dyn WindowingBackend>,
        graphics: Box<dyn GraphicsBackend>,
    ) -> Self {
        Self {
            config,
            windowing,
            graphics,
            handler: Box::new(InputDispatcher),
            lifecycle: Lifecycle::Uninitialized,
        }
    }

    /// Create an uninitialized context using GLFW and the system Vulkan loader
    pub fn with_glfw(config: WindowConfig) -> Self {
        Self::new(
            config,
            Box::new(GlfwBackend::new()),
            Box::new(VulkanBackend::new()),
        )
    }

    /// Window title, also reported to Vulkan as the application name
    pub fn application_name(&self) -> &str {
        &self.config.title
    }

    /// Configuration this context was created with
    pub const fn config(&self) -> &WindowConfig {
        &self.config
    }

    /// Current lifecycle state
    pub const fn state(&self) -> LifecycleState {
        self.lifecycle.state()
    }

    /// Native window id while ready
    pub const fn window_id(&self) -> Option<WindowId> {
        match &self.lifecycle {
            Lifecycle::Ready(resources) => Some(resources.window),
            _ => None,
        }
    }

    /// Vulkan instance and surface while ready
    pub const fn graphics_context(&self) -> Option<&GraphicsContext> {
        match &self.lifecycle {
            Lifecycle::Ready(resources) => Some(&resources.graphics),
            _ => None,
        }
    }

    /// Physical devices seen during initialization; empty unless ready
    pub fn physical_devices(&self) -> &[PhysicalDeviceSummary] {
        match self.graphics_context() {
            Some(graphics) => graphics.devices(),
            None => &[],
        }
    }

    /// Replace the receiver of window events
    pub fn set_event_handler(&mut self, handler: Box<dyn WindowEventHandler>) {
        self.handler = handler;
    }

    /// Create the window, the Vulkan instance and the surface
    ///
    /// On failure everything acquired by this call has been released again and
    /// the context stays [`LifecycleState::Uninitialized`].
    pub fn init(&mut self) -> WindowResult<()> {
        if !matches!(self.lifecycle, Lifecycle::Uninitialized) {
            let error = self.invalid_state("init");
            log::error!("{}", error);
            return Err(error);
        }

        let resources = self.acquire()?;
        self.lifecycle = Lifecycle::Ready(resources);

        log::info!("Window successfully initialized");
        Ok(())
    }

    fn acquire(&mut self) -> WindowResult<Resources> {
        self.windowing.initialize().map_err(|e| {
            log::error!("Windowing backend init error: {}", e);
            WindowError::BackendInit(e.to_string())
        })?;

        if !self.windowing.vulkan_supported() {
            self.windowing.terminate();
            log::error!("Vulkan is not supported");
            return Err(WindowError::Capability);
        }

        let descriptor = WindowDescriptor {
            width: self.config.width,
            height: self.config.height,
            title: self.config.title.clone(),
            resizable: false,
        };

        let window = match self.windowing.create_window(&descriptor) {
            Ok(window) => window,
            Err(e) => {
                log::error!("Could not create window: {}", e);
                self.windowing.terminate();
                return Err(WindowError::WindowCreation {
                    width: descriptor.width,
                    height: descriptor.height,
                    title: descriptor.title,
                });
            }
        };

        let graphics = match bootstrap(
            self.windowing.as_mut(),
            self.graphics.as_mut(),
            window,
            &self.config,
        ) {
            Ok(graphics) => graphics,
            Err(e) => {
                log::error!("Could not init Vulkan");
                self.windowing.destroy_window(window);
                self.windowing.terminate();
                return Err(e.into());
            }
        };

        let resources = Resources { window, graphics };

        if let Err(e) = self.windowing.enable_input_events(window) {
            log::error!("Could not register input events: {}", e);
            self.release(resources);
            return Err(WindowError::Backend(e.to_string()));
        }

        Ok(resources)
    }

    /// Poll events until the window's close flag is set
    ///
    /// Blocks the calling thread; every event is handled on this thread by the
    /// configured event handler.
    pub fn main_loop(&mut self) -> WindowResult<()> {
        let Some(window) = self.window_id() else {
            return Err(self.invalid_state("run main loop"));
        };

        while !self.windowing.should_close(window) {
            self.windowing.poll_events(window, self.handler.as_mut());
        }

        Ok(())
    }

    /// Set the close flag so the main loop returns after the current poll
    pub fn request_close(&mut self) -> WindowResult<()> {
        let Some(window) = self.window_id() else {
            return Err(self.invalid_state("request close"));
        };

        self.windowing.set_should_close(window, true);
        Ok(())
    }

    /// Release surface, instance, window and windowing backend, in that order
    ///
    /// Only valid once after a successful [`init`](Self::init); any other call
    /// returns [`WindowError::InvalidState`] without touching the backends.
    pub fn cleanup(&mut self) -> WindowResult<()> {
        match std::mem::replace(&mut self.lifecycle, Lifecycle::Destroyed) {
            Lifecycle::Ready(resources) => {
                log::info!("Terminating Window");
                self.release(resources);
                Ok(())
            }
            previous => {
                self.lifecycle = previous;
                Err(self.invalid_state("cleanup"))
            }
        }
    }

    fn release(&mut self, resources: Resources) {
        resources.graphics.destroy(self.graphics.as_mut());
        self.windowing.destroy_window(resources.window);
        self.windowing.terminate();
    }

    const fn invalid_state(&self, operation: &'static str) -> WindowError {
        WindowError::InvalidState {
            operation,
            state: self.lifecycle.state(),
        }
    }
}

impl Drop for WindowContext {
    fn drop(&mut self) {
        if matches!(self.lifecycle, Lifecycle::Ready(_)) {
            log::warn!("Window context dropped while ready, releasing resources");
            if let Err(e) = self.cleanup() {
                log::error!("Teardown on drop failed: {}", e);
            }
        }
    }
}
