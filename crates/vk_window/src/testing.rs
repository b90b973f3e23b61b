//! Recording fake backends for lifecycle tests

use ash::vk::{self, Handle};
use std::cell::RefCell;
use std::rc::Rc;

use crate::error::GraphicsInitError;
use crate::graphics::backend::{GraphicsBackend, InstanceDescriptor, PhysicalDeviceSummary};
use crate::input::{KeyEvent, MouseButtonEvent, WindowEventHandler, ACTION_PRESS};
use crate::window::backend::{BackendError, WindowDescriptor, WindowId, WindowingBackend};

pub const FAKE_INSTANCE: u64 = 0x1000;
pub const FAKE_SURFACE: u64 = 0x2000;

/// Backend call, recorded in invocation order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Call {
    Initialize,
    Terminate,
    CreateWindow,
    DestroyWindow,
    EnableInput,
    Poll,
    SetShouldClose,
    CreateInstance,
    EnumerateDevices,
    CreateSurface,
    DestroySurface,
    DestroyInstance,
}

#[derive(Debug, Default)]
struct JournalState {
    calls: Vec<Call>,
    outstanding: i64,
    window_descriptor: Option<WindowDescriptor>,
}

/// Call log and acquisition counter shared by both fakes
#[derive(Debug, Clone, Default)]
pub struct Journal(Rc<RefCell<JournalState>>);

impl Journal {
    fn record(&self, call: Call) {
        self.0.borrow_mut().calls.push(call);
    }

    fn acquire(&self) {
        self.0.borrow_mut().outstanding += 1;
    }

    fn release(&self) {
        self.0.borrow_mut().outstanding -= 1;
    }

    /// Acquisitions not yet released
    pub fn outstanding(&self) -> i64 {
        self.0.borrow().outstanding
    }

    /// Descriptor passed to the last window creation
    pub fn window_descriptor(&self) -> Option<WindowDescriptor> {
        self.0.borrow().window_descriptor.clone()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.0.borrow().calls.clone()
    }

    pub fn contains(&self, call: &Call) -> bool {
        self.0.borrow().calls.contains(call)
    }

    pub fn count(&self, call: &Call) -> usize {
        self.0.borrow().calls.iter().filter(|c| *c == call).count()
    }

    pub fn position(&self, call: &Call) -> Option<usize> {
        self.0.borrow().calls.iter().position(|c| c == call)
    }
}

/// Scriptable windowing backend
pub struct FakeWindowing {
    journal: Journal,
    pub fail_init: bool,
    pub vulkan_supported: bool,
    pub fail_window: bool,
    pub fail_input: bool,
    pub extensions: Vec<String>,
    pub surface_result: Option<vk::Result>,
    /// Poll on which the close request arrives; `None` never closes
    pub close_on_poll: Option<usize>,
    /// Key and mouse events delivered on every poll
    pub events_per_poll: usize,
    initialized: bool,
    window: Option<WindowId>,
    polls: usize,
    close_flag: bool,
}

impl FakeWindowing {
    pub fn new(journal: Journal) -> Self {
        Self {
            journal,
            fail_init: false,
            vulkan_supported: true,
            fail_window: false,
            fail_input: false,
            extensions: vec!["VK_KHR_surface".to_string(), "VK_KHR_xcb_surface".to_string()],
            surface_result: None,
            close_on_poll: Some(1),
            events_per_poll: 0,
            initialized: false,
            window: None,
            polls: 0,
            close_flag: false,
        }
    }
}

impl WindowingBackend for FakeWindowing {
    fn initialize(&mut self) -> Result<(), BackendError> {
        self.journal.record(Call::Initialize);
        if self.fail_init {
            return Err(BackendError::Initialization("no display".to_string()));
        }
        self.initialized = true;
        self.journal.acquire();
        Ok(())
    }

    fn terminate(&mut self) {
        self.journal.record(Call::Terminate);
        if self.initialized {
            self.initialized = false;
            self.journal.release();
        }
    }

    fn vulkan_supported(&self) -> bool {
        self.vulkan_supported
    }

    fn create_window(&mut self, descriptor: &WindowDescriptor) -> Result<WindowId, BackendError> {
        self.journal.record(Call::CreateWindow);
        self.journal.0.borrow_mut().window_descriptor = Some(descriptor.clone());
        descriptor.validate()?;
        if !self.initialized {
            return Err(BackendError::NotInitialized);
        }
        if self.fail_window {
            return Err(BackendError::WindowCreation);
        }
        let id = WindowId(7);
        self.window = Some(id);
        self.journal.acquire();
        Ok(id)
    }

    fn destroy_window(&mut self, window: WindowId) {
        self.journal.record(Call::DestroyWindow);
        if self.window == Some(window) {
            self.window = None;
            self.journal.release();
        }
    }

    fn required_instance_extensions(&self) -> Vec<String> {
        self.extensions.clone()
    }

    fn create_surface(
        &mut self,
        window: WindowId,
        instance: vk::Instance,
    ) -> Result<vk::SurfaceKHR, vk::Result> {
        self.journal.record(Call::CreateSurface);
        assert_eq!(Some(window), self.window, "surface requires a live window");
        assert_eq!(instance.as_raw(), FAKE_INSTANCE, "surface requires a live instance");
        if let Some(result) = self.surface_result {
            return Err(result);
        }
        // Released by FakeGraphics::destroy_surface
        self.journal.acquire();
        Ok(vk::SurfaceKHR::from_raw(FAKE_SURFACE))
    }

    fn enable_input_events(&mut self, window: WindowId) -> Result<(), BackendError> {
        self.journal.record(Call::EnableInput);
        if self.fail_input {
            return Err(BackendError::UnknownWindow(window));
        }
        Ok(())
    }

    fn poll_events(&mut self, _window: WindowId, handler: &mut dyn WindowEventHandler) {
        self.journal.record(Call::Poll);
        self.polls += 1;

        for i in 0..self.events_per_poll {
            let code = i32::try_from(i).unwrap_or(i32::MAX);
            handler.on_key(&KeyEvent {
                key: 65 + code,
                scancode: code,
                action: ACTION_PRESS,
                mods: 0,
                name: None,
            });
            handler.on_mouse_button(&MouseButtonEvent {
                button: code,
                action: code,
                mods: 0,
            });
        }

        if self.close_on_poll == Some(self.polls) {
            self.close_flag = true;
            handler.on_close();
        }
    }

    fn should_close(&self, _window: WindowId) -> bool {
        self.close_flag
    }

    fn set_should_close(&mut self, _window: WindowId, should_close: bool) {
        self.journal.record(Call::SetShouldClose);
        self.close_flag = should_close;
    }
}

/// Scriptable graphics backend
pub struct FakeGraphics {
    journal: Journal,
    /// Error returned by instance creation, if any
    pub instance_result: Option<vk::Result>,
    pub device_count: usize,
    pub available_extensions: Vec<String>,
    pub last_descriptor: Option<InstanceDescriptor>,
}

impl FakeGraphics {
    pub fn new(journal: Journal) -> Self {
        Self {
            journal,
            instance_result: None,
            device_count: 1,
            available_extensions: Vec::new(),
            last_descriptor: None,
        }
    }
}

impl GraphicsBackend for FakeGraphics {
    fn available_instance_extensions(&mut self) -> Result<Vec<String>, GraphicsInitError> {
        Ok(self.available_extensions.clone())
    }

    fn create_instance(
        &mut self,
        descriptor: &InstanceDescriptor,
    ) -> Result<vk::Instance, GraphicsInitError> {
        self.journal.record(Call::CreateInstance);
        self.last_descriptor = Some(descriptor.clone());
        if let Some(result) = self.instance_result {
            return Err(GraphicsInitError::InstanceCreation(result));
        }
        self.journal.acquire();
        Ok(vk::Instance::from_raw(FAKE_INSTANCE))
    }

    fn enumerate_physical_devices(
        &self,
        _instance: vk::Instance,
    ) -> Result<Vec<PhysicalDeviceSummary>, vk::Result> {
        self.journal.record(Call::EnumerateDevices);
        Ok((0..self.device_count)
            .map(|i| PhysicalDeviceSummary {
                handle: vk::PhysicalDevice::from_raw(0x3000 + i as u64),
                name: format!("Fake GPU {i}"),
                device_type: vk::PhysicalDeviceType::DISCRETE_GPU,
                api_version: vk::API_VERSION_1_1,
            })
            .collect())
    }

    fn destroy_surface(&mut self, _instance: vk::Instance, surface: vk::SurfaceKHR) {
        self.journal.record(Call::DestroySurface);
        assert_eq!(surface.as_raw(), FAKE_SURFACE);
        self.journal.release();
    }

    fn destroy_instance(&mut self, instance: vk::Instance) {
        self.journal.record(Call::DestroyInstance);
        assert_eq!(instance.as_raw(), FAKE_INSTANCE);
        self.journal.release();
    }
}

#[derive(Debug, Default)]
pub struct HandledEvents {
    pub closes: usize,
    pub keys: usize,
    pub mouse_buttons: usize,
    pub last_key: Option<KeyEvent>,
    pub last_mouse_button: Option<MouseButtonEvent>,
}

/// Event handler that counts what it receives and keeps the latest events
#[derive(Debug, Clone, Default)]
pub struct RecordingHandler(pub Rc<RefCell<HandledEvents>>);

impl WindowEventHandler for RecordingHandler {
    fn on_close(&mut self) {
        self.0.borrow_mut().closes += 1;
    }

    fn on_key(&mut self, event: &KeyEvent) {
        let mut events = self.0.borrow_mut();
        events.keys += 1;
        events.last_key = Some(event.clone());
    }

    fn on_mouse_button(&mut self, event: &MouseButtonEvent) {
        let mut events = self.0.borrow_mut();
        events.mouse_buttons += 1;
        events.last_mouse_button = Some(*event);
    }
}
