//! ash-based graphics backend
//!
//! Loads the Vulkan loader lazily on first use and keeps the function tables
//! of the instance it created, so callers only ever hold raw handles.

use ash::extensions::khr::Surface as SurfaceLoader;
use ash::{vk, Entry, Instance};
use std::ffi::{c_char, CStr, CString};

use crate::error::GraphicsInitError;
use crate::graphics::backend::{GraphicsBackend, InstanceDescriptor, PhysicalDeviceSummary};

/// Instance function tables plus the surface extension loader
struct LoadedInstance {
    instance: Instance,
    surface_loader: SurfaceLoader,
}

/// Vulkan graphics backend using the system loader
#[derive(Default)]
pub struct VulkanBackend {
    entry: Option<Entry>,
    loaded: Option<LoadedInstance>,
}

impl VulkanBackend {
    /// Create a backend; the loader is opened on first use
    pub fn new() -> Self {
        Self::default()
    }

    fn entry(&mut self) -> Result<&Entry, GraphicsInitError> {
        if self.entry.is_none() {
            let entry = unsafe { Entry::load() }
                .map_err(|e| GraphicsInitError::Loader(format!("Failed to load Vulkan: {e}")))?;
            self.entry = Some(entry);
        }
        self.entry
            .as_ref()
            .ok_or_else(|| GraphicsInitError::Loader("Vulkan entry missing".to_string()))
    }

    fn loaded(&self, instance: vk::Instance) -> Option<&LoadedInstance> {
        self.loaded
            .as_ref()
            .filter(|loaded| loaded.instance.handle() == instance)
    }
}

fn c_string(value: &str) -> Result<CString, GraphicsInitError> {
    CString::new(value).map_err(|_| GraphicsInitError::InvalidName(value.to_string()))
}

impl GraphicsBackend for VulkanBackend {
    fn available_instance_extensions(&mut self) -> Result<Vec<String>, GraphicsInitError> {
        let entry = self.entry()?;
        let properties = entry.enumerate_instance_extension_properties(None).map_err(|e| {
            GraphicsInitError::Loader(format!("Failed to enumerate instance extensions: {e:?}"))
        })?;

        Ok(properties
            .iter()
            .map(|property| {
                unsafe { CStr::from_ptr(property.extension_name.as_ptr()) }
                    .to_string_lossy()
                    .into_owned()
            })
            .collect())
    }

    fn create_instance(
        &mut self,
        descriptor: &InstanceDescriptor,
    ) -> Result<vk::Instance, GraphicsInitError> {
        if self.loaded.is_some() {
            log::error!("Vulkan instance already created by this backend");
            return Err(GraphicsInitError::InstanceCreation(
                vk::Result::ERROR_INITIALIZATION_FAILED,
            ));
        }

        let app_name = c_string(&descriptor.application_name)?;
        let engine_name = c_string(&descriptor.engine_name)?;
        let extension_names = descriptor
            .extensions
            .iter()
            .map(|name| c_string(name))
            .collect::<Result<Vec<_>, _>>()?;
        let extension_ptrs: Vec<*const c_char> =
            extension_names.iter().map(|name| name.as_ptr()).collect();

        let app_info = vk::ApplicationInfo::builder()
            .application_name(&app_name)
            .application_version(descriptor.application_version)
            .engine_name(&engine_name)
            .engine_version(descriptor.engine_version)
            .api_version(descriptor.api_version);

        let create_info = vk::InstanceCreateInfo::builder()
            .flags(descriptor.flags)
            .application_info(&app_info)
            .enabled_extension_names(&extension_ptrs);

        let entry = self.entry()?;
        let instance = unsafe { entry.create_instance(&create_info, None) }
            .map_err(GraphicsInitError::InstanceCreation)?;
        let surface_loader = SurfaceLoader::new(entry, &instance);
        let handle = instance.handle();

        self.loaded = Some(LoadedInstance {
            instance,
            surface_loader,
        });
        Ok(handle)
    }

    fn enumerate_physical_devices(
        &self,
        instance: vk::Instance,
    ) -> Result<Vec<PhysicalDeviceSummary>, vk::Result> {
        let loaded = self
            .loaded(instance)
            .ok_or(vk::Result::ERROR_INITIALIZATION_FAILED)?;
        let devices = unsafe { loaded.instance.enumerate_physical_devices() }?;

        Ok(devices
            .into_iter()
            .map(|device| {
                let properties =
                    unsafe { loaded.instance.get_physical_device_properties(device) };
                let name = unsafe { CStr::from_ptr(properties.device_name.as_ptr()) }
                    .to_string_lossy()
                    .into_owned();
                PhysicalDeviceSummary {
                    handle: device,
                    name,
                    device_type: properties.device_type,
                    api_version: properties.api_version,
                }
            })
            .collect())
    }

    fn destroy_surface(&mut self, instance: vk::Instance, surface: vk::SurfaceKHR) {
        match self.loaded(instance) {
            Some(loaded) => unsafe { loaded.surface_loader.destroy_surface(surface, None) },
            None => log::warn!("destroy_surface: unknown instance {:?}", instance),
        }
    }

    fn destroy_instance(&mut self, instance: vk::Instance) {
        if self.loaded(instance).is_none() {
            log::warn!("destroy_instance: unknown instance {:?}", instance);
            return;
        }
        if let Some(loaded) = self.loaded.take() {
            unsafe { loaded.instance.destroy_instance(None) };
        }
    }
}
