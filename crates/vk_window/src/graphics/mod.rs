//! Vulkan execution context: instance and presentation surface

pub mod backend;
pub mod bootstrap;
pub mod vulkan;

pub use backend::{GraphicsBackend, InstanceDescriptor, PhysicalDeviceSummary};
pub use bootstrap::{bootstrap, GraphicsContext, PORTABILITY_ENUMERATION_EXTENSION};
pub use vulkan::VulkanBackend;
