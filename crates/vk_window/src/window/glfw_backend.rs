//! GLFW-based windowing backend
//!
//! Provides window creation, event polling and Vulkan surface creation through
//! GLFW. Events arrive through GLFW's per-window event receiver and are routed
//! to the handler passed to [`WindowingBackend::poll_events`], so no callback
//! needs to recover its owner from a user pointer.

use ash::vk;

use crate::input::{KeyEvent, MouseButtonEvent, WindowEventHandler};
use crate::window::backend::{BackendError, WindowDescriptor, WindowId, WindowingBackend};

/// A live GLFW window and its event queue
struct GlfwWindow {
    id: WindowId,
    window: glfw::PWindow,
    events: glfw::GlfwReceiver<(f64, glfw::WindowEvent)>,
}

/// GLFW windowing backend
///
/// Holds at most one window. Dropping the [`glfw::Glfw`] handle in
/// [`WindowingBackend::terminate`] releases the library.
#[derive(Default)]
pub struct GlfwBackend {
    glfw: Option<glfw::Glfw>,
    window: Option<GlfwWindow>,
    next_id: u64,
}

impl GlfwBackend {
    /// Create an uninitialized backend
    pub fn new() -> Self {
        Self::default()
    }

    fn window(&self, id: WindowId) -> Result<&GlfwWindow, BackendError> {
        self.window
            .as_ref()
            .filter(|window| window.id == id)
            .ok_or(BackendError::UnknownWindow(id))
    }

    fn window_mut(&mut self, id: WindowId) -> Result<&mut GlfwWindow, BackendError> {
        self.window
            .as_mut()
            .filter(|window| window.id == id)
            .ok_or(BackendError::UnknownWindow(id))
    }
}

/// Printable name of a key; GLFW has none for unmapped keys
fn key_name(key: glfw::Key, scancode: glfw::Scancode) -> Option<String> {
    if key == glfw::Key::Unknown {
        return None;
    }
    glfw::get_key_name(Some(key), Some(scancode))
}

fn dispatch(event: glfw::WindowEvent, handler: &mut dyn WindowEventHandler) {
    match event {
        glfw::WindowEvent::Close => handler.on_close(),
        glfw::WindowEvent::Key(key, scancode, action, mods) => {
            handler.on_key(&KeyEvent {
                key: key as i32,
                scancode,
                action: action as i32,
                mods: mods.bits(),
                name: key_name(key, scancode),
            });
        }
        glfw::WindowEvent::MouseButton(button, action, mods) => {
            handler.on_mouse_button(&MouseButtonEvent {
                button: button as i32,
                action: action as i32,
                mods: mods.bits(),
            });
        }
        other => log::trace!("Ignoring window event {:?}", other),
    }
}

impl WindowingBackend for GlfwBackend {
    fn initialize(&mut self) -> Result<(), BackendError> {
        // Failures also surface as return values; the callback must not panic
        let library = glfw::init(|error, description| {
            log::error!("GLFW error {:?}: {}", error, description);
        })
        .map_err(|e| BackendError::Initialization(format!("{e:?}")))?;
        self.glfw = Some(library);
        Ok(())
    }

    fn terminate(&mut self) {
        if self.window.is_some() {
            log::warn!("Terminating GLFW with a live window");
            self.window = None;
        }
        self.glfw = None;
    }

    fn vulkan_supported(&self) -> bool {
        self.glfw.as_ref().is_some_and(glfw::Glfw::vulkan_supported)
    }

    fn create_window(&mut self, descriptor: &WindowDescriptor) -> Result<WindowId, BackendError> {
        descriptor.validate()?;
        let library = self.glfw.as_mut().ok_or(BackendError::NotInitialized)?;

        // Hints apply to the next window created
        library.window_hint(glfw::WindowHint::Resizable(descriptor.resizable));
        library.window_hint(glfw::WindowHint::ClientApi(glfw::ClientApiHint::NoApi));

        let (window, events) = library
            .create_window(
                descriptor.width,
                descriptor.height,
                &descriptor.title,
                glfw::WindowMode::Windowed,
            )
            .ok_or(BackendError::WindowCreation)?;

        self.next_id += 1;
        let id = WindowId(self.next_id);
        self.window = Some(GlfwWindow { id, window, events });
        Ok(id)
    }

    fn destroy_window(&mut self, window: WindowId) {
        if self.window.as_ref().is_some_and(|live| live.id == window) {
            // PWindow destroys the native window on drop
            self.window = None;
        } else {
            log::warn!("destroy_window: unknown window {:?}", window);
        }
    }

    fn required_instance_extensions(&self) -> Vec<String> {
        self.glfw
            .as_ref()
            .and_then(glfw::Glfw::get_required_instance_extensions)
            .unwrap_or_default()
    }

    fn create_surface(
        &mut self,
        window: WindowId,
        instance: vk::Instance,
    ) -> Result<vk::SurfaceKHR, vk::Result> {
        let live = self
            .window_mut(window)
            .map_err(|_| vk::Result::ERROR_INITIALIZATION_FAILED)?;

        let mut surface = vk::SurfaceKHR::null();
        let result = live
            .window
            .create_window_surface(instance, std::ptr::null(), &mut surface);

        if result == vk::Result::SUCCESS {
            Ok(surface)
        } else {
            Err(result)
        }
    }

    fn enable_input_events(&mut self, window: WindowId) -> Result<(), BackendError> {
        let live = self.window_mut(window)?;
        live.window.set_close_polling(true);
        live.window.set_key_polling(true);
        live.window.set_mouse_button_polling(true);
        Ok(())
    }

    fn poll_events(&mut self, window: WindowId, handler: &mut dyn WindowEventHandler) {
        let Some(library) = self.glfw.as_mut() else {
            return;
        };
        library.poll_events();

        if let Ok(live) = self.window(window) {
            for (_, event) in glfw::flush_messages(&live.events) {
                dispatch(event, handler);
            }
        }
    }

    fn should_close(&self, window: WindowId) -> bool {
        self.window(window).map_or(true, |live| live.window.should_close())
    }

    fn set_should_close(&mut self, window: WindowId, should_close: bool) {
        match self.window_mut(window) {
            Ok(live) => live.window.set_should_close(should_close),
            Err(e) => log::warn!("set_should_close: {}", e),
        }
    }
}
