//! Vulkan context bootstrap
//!
//! Creates the instance and the presentation surface for an existing window.
//! Every failure is terminal for the call: whatever this module created before
//! the failing step is destroyed again before the error is returned.

use ash::vk;

use crate::config::{PortabilityMode, WindowConfig};
use crate::error::GraphicsInitError;
use crate::graphics::backend::{GraphicsBackend, InstanceDescriptor, PhysicalDeviceSummary};
use crate::window::backend::{WindowId, WindowingBackend};

/// Name of the extension that exposes non-conformant (portability) drivers
pub const PORTABILITY_ENUMERATION_EXTENSION: &str = "VK_KHR_portability_enumeration";

/// A Vulkan instance and the surface bound to it
///
/// The surface keeps a back-reference into the instance, so both live in one
/// value and [`GraphicsContext::destroy`] is the only way to release them.
#[derive(Debug)]
pub struct GraphicsContext {
    instance: vk::Instance,
    surface: vk::SurfaceKHR,
    devices: Vec<PhysicalDeviceSummary>,
}

impl GraphicsContext {
    /// Instance handle
    pub const fn instance(&self) -> vk::Instance {
        self.instance
    }

    /// Presentation surface handle
    pub const fn surface(&self) -> vk::SurfaceKHR {
        self.surface
    }

    /// Physical devices found during bootstrap
    pub fn devices(&self) -> &[PhysicalDeviceSummary] {
        &self.devices
    }

    /// Destroy the surface, then the instance
    pub(crate) fn destroy(self, graphics: &mut dyn GraphicsBackend) {
        graphics.destroy_surface(self.instance, self.surface);
        graphics.destroy_instance(self.instance);
    }
}

/// Build the instance extension list and creation flags
///
/// `required` comes from the windowing backend and is kept in order; the
/// portability extension is appended once, according to `mode`.
pub fn instance_extensions(
    required: &[String],
    mode: PortabilityMode,
    graphics: &mut dyn GraphicsBackend,
) -> Result<(Vec<String>, vk::InstanceCreateFlags), GraphicsInitError> {
    let enable_portability = match mode {
        PortabilityMode::Always => true,
        PortabilityMode::Never => false,
        PortabilityMode::Auto => graphics
            .available_instance_extensions()?
            .iter()
            .any(|name| name == PORTABILITY_ENUMERATION_EXTENSION),
    };

    let mut extensions = required.to_vec();
    let mut flags = vk::InstanceCreateFlags::empty();

    if enable_portability {
        if !extensions.iter().any(|name| name == PORTABILITY_ENUMERATION_EXTENSION) {
            extensions.push(PORTABILITY_ENUMERATION_EXTENSION.to_string());
        }
        flags |= vk::InstanceCreateFlags::ENUMERATE_PORTABILITY_KHR;
    } else {
        log::debug!("Portability enumeration not requested ({:?})", mode);
    }

    Ok((extensions, flags))
}

/// Create the Vulkan instance and a surface for `window`
pub fn bootstrap(
    windowing: &mut dyn WindowingBackend,
    graphics: &mut dyn GraphicsBackend,
    window: WindowId,
    config: &WindowConfig,
) -> Result<GraphicsContext, GraphicsInitError> {
    let required = windowing.required_instance_extensions();
    if required.is_empty() {
        log::error!("No Vulkan extensions found, need at least 'VK_KHR_surface'");
        return Err(GraphicsInitError::NoExtensions);
    }

    log::info!("Found {} Vulkan extensions", required.len());
    for name in &required {
        log::info!("  {}", name);
    }

    let (extensions, flags) = instance_extensions(&required, config.portability, graphics)?;

    let descriptor = InstanceDescriptor {
        application_name: config.title.clone(),
        application_version: config.application_version.to_vulkan(),
        engine_name: config.engine_name.clone(),
        engine_version: config.engine_version.to_vulkan(),
        api_version: config.api_version.to_vulkan(),
        extensions,
        flags,
    };

    let instance = graphics.create_instance(&descriptor).map_err(|e| {
        log::error!("{}", e);
        e
    })?;
    log::debug!("Created Vulkan instance (API {})", config.api_version);

    let devices = match graphics.enumerate_physical_devices(instance) {
        Ok(devices) if !devices.is_empty() => devices,
        Ok(_) => {
            log::error!("No Vulkan capable GPU found");
            graphics.destroy_instance(instance);
            return Err(GraphicsInitError::NoDevice);
        }
        Err(result) => {
            let error = GraphicsInitError::DeviceEnumeration(result);
            log::error!("{}", error);
            graphics.destroy_instance(instance);
            return Err(error);
        }
    };

    log::info!("Found {} physical device(s)", devices.len());
    for device in &devices {
        log::info!(
            "  {} ({:?}, Vulkan {}.{}.{})",
            device.name,
            device.device_type,
            vk::api_version_major(device.api_version),
            vk::api_version_minor(device.api_version),
            vk::api_version_patch(device.api_version)
        );
    }

    let surface = match windowing.create_surface(window, instance) {
        Ok(surface) => surface,
        Err(result) => {
            let error = GraphicsInitError::SurfaceCreation(result);
            log::error!("{}", error);
            graphics.destroy_instance(instance);
            return Err(error);
        }
    };

    Ok(GraphicsContext {
        instance,
        surface,
        devices,
    })
}
