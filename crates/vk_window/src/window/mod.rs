//! Window management subsystem
//!
//! - **`context`**: the lifecycle owner applications use
//! - **`backend`**: the windowing backend contract
//! - **`glfw_backend`**: GLFW implementation of that contract

pub mod backend;
pub mod context;
pub mod glfw_backend;

pub use backend::{BackendError, WindowDescriptor, WindowId, WindowingBackend};
pub use context::{LifecycleState, WindowContext};
pub use glfw_backend::GlfwBackend;
