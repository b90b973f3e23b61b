//! Graphics backend contract
//!
//! The bootstrap and teardown code talks to Vulkan only through
//! [`GraphicsBackend`]. Handles crossing the trait are raw `vk` handles so a
//! test backend can hand out fabricated ones.

use ash::vk;

use crate::error::GraphicsInitError;

/// Everything needed to create a Vulkan instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceDescriptor {
    /// Application name reported to the driver
    pub application_name: String,
    /// Packed application version
    pub application_version: u32,
    /// Engine name reported to the driver
    pub engine_name: String,
    /// Packed engine version
    pub engine_version: u32,
    /// Packed API version
    pub api_version: u32,
    /// Instance extensions to enable
    pub extensions: Vec<String>,
    /// Instance creation flags
    pub flags: vk::InstanceCreateFlags,
}

/// Diagnostic summary of a physical device
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhysicalDeviceSummary {
    /// Device handle, valid while its instance lives
    pub handle: vk::PhysicalDevice,
    /// Driver-reported device name
    pub name: String,
    /// Integrated, discrete, virtual, CPU or other
    pub device_type: vk::PhysicalDeviceType,
    /// Highest supported packed API version
    pub api_version: u32,
}

/// Contract every graphics backend implements
pub trait GraphicsBackend {
    /// Names of the instance extensions the loader advertises
    fn available_instance_extensions(&mut self) -> Result<Vec<String>, GraphicsInitError>;

    /// Create an instance
    fn create_instance(
        &mut self,
        descriptor: &InstanceDescriptor,
    ) -> Result<vk::Instance, GraphicsInitError>;

    /// List the physical devices visible through `instance`
    fn enumerate_physical_devices(
        &self,
        instance: vk::Instance,
    ) -> Result<Vec<PhysicalDeviceSummary>, vk::Result>;

    /// Destroy a surface created on `instance`
    fn destroy_surface(&mut self, instance: vk::Instance, surface: vk::SurfaceKHR);

    /// Destroy an instance; all its surfaces must already be destroyed
    fn destroy_instance(&mut self, instance: vk::Instance);
}
